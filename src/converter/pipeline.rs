//! # 缩放流水线模块
//!
//! ## 设计思路
//!
//! 每个目标尺寸都从同一份 RGBA 源像素出发独立缩放，避免逐级缩小带来的累积误差。
//! 缩放强制输出目标宽高，不做裁剪或留白，非正方形源图会被拉伸到目标正方形。
//!
//! ## 实现思路
//!
//! 1. 按配置决定是否跳过比源图更大的尺寸
//! 2. 优先使用 `fast_image_resize`，失败时回退 `image::imageops::resize`
//! 3. 校验输出字节长度与 `width * height * 4` 一致

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::RgbaImage;

use super::source::{IconSize, RenderedFrame, SourceImage};
use super::{ConvertError, IcoConverter};

impl IcoConverter {
    /// 为配置中的每个尺寸生成一帧。
    pub(super) fn render_frames(&self, image: &SourceImage) -> Result<Vec<RenderedFrame>, ConvertError> {
        let targets = self.select_target_sizes(image.width, image.height);
        let mut frames = Vec::with_capacity(targets.len());

        // 源像素只借用一次，所有尺寸共用同一视图与 resizer
        let src_view = match fr::images::ImageRef::new(
            image.width,
            image.height,
            image.pixels.as_raw(),
            fr::PixelType::U8x4,
        ) {
            Ok(view) => Some(view),
            Err(err) => {
                log::warn!("⚠️ 构建 fast_image_resize 源视图失败，全部回退 image 缩放：{}", err);
                None
            }
        };
        let mut resizer = fr::Resizer::new();

        for size in targets {
            let bytes = if size.width == image.width && size.height == image.height {
                image.pixels.as_raw().clone()
            } else {
                Self::resize_rgba(
                    &image.pixels,
                    src_view.as_ref(),
                    &mut resizer,
                    size,
                    self.config.resize_filter,
                )
            };

            let expected_len = (size.width as usize)
                .checked_mul(size.height as usize)
                .and_then(|pixels| pixels.checked_mul(4))
                .ok_or_else(|| ConvertError::ResourceLimit("目标尺寸导致内存溢出风险".to_string()))?;

            if bytes.len() != expected_len {
                return Err(ConvertError::UnsupportedFormat(format!(
                    "{} 帧像素数据长度异常：{}（期望 {}）",
                    size,
                    bytes.len(),
                    expected_len
                )));
            }

            log::debug!(
                "🧩 已生成帧：{}x{} -> {}（filter={:?}）",
                image.width,
                image.height,
                size,
                self.config.resize_filter
            );

            frames.push(RenderedFrame { size, bytes });
        }

        Ok(frames)
    }

    /// 按 `skip_larger_than_source` 过滤尺寸。
    ///
    /// 全部尺寸都大于源图时，保留最小的一个，保证 ICO 至少包含一帧。
    fn select_target_sizes(&self, width: u32, height: u32) -> Vec<IconSize> {
        if !self.config.skip_larger_than_source {
            return self.config.sizes.clone();
        }

        let kept: Vec<IconSize> = self
            .config
            .sizes
            .iter()
            .copied()
            .filter(|size| !size.exceeds(width, height))
            .collect();

        if !kept.is_empty() {
            if kept.len() < self.config.sizes.len() {
                log::info!(
                    "↪️ 源图 {}x{} 较小，跳过 {} 个更大的尺寸",
                    width,
                    height,
                    self.config.sizes.len() - kept.len()
                );
            }
            return kept;
        }

        let smallest = self
            .config
            .sizes
            .iter()
            .copied()
            .min_by_key(|size| (size.width as u64) * (size.height as u64));

        log::warn!(
            "⚠️ 所有尺寸都大于源图 {}x{}，仅保留最小尺寸并放大",
            width,
            height
        );

        smallest.into_iter().collect()
    }

    fn resize_rgba(
        src: &RgbaImage,
        src_view: Option<&fr::images::ImageRef<'_>>,
        resizer: &mut fr::Resizer,
        size: IconSize,
        filter: FilterType,
    ) -> Vec<u8> {
        if let Some(view) = src_view {
            match Self::resize_with_fast_image_resize(view, resizer, size, filter) {
                Ok(bytes) => return bytes,
                Err(err) => log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                    err
                ),
            }
        }
        image::imageops::resize(src, size.width, size.height, filter).into_raw()
    }

    fn resize_with_fast_image_resize(
        src_view: &fr::images::ImageRef<'_>,
        resizer: &mut fr::Resizer,
        size: IconSize,
        filter: FilterType,
    ) -> Result<Vec<u8>, ConvertError> {
        let mut dst_image = fr::images::Image::new(size.width, size.height, fr::PixelType::U8x4);

        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(src_view, &mut dst_image, Some(&options))
            .map_err(|e| ConvertError::UnsupportedFormat(format!("fast_image_resize 执行失败：{}", e)))?;

        Ok(dst_image.into_vec())
    }

    fn to_fast_filter(filter: FilterType) -> fr::FilterType {
        match filter {
            FilterType::Nearest => fr::FilterType::Box,
            FilterType::Triangle => fr::FilterType::Bilinear,
            FilterType::CatmullRom => fr::FilterType::CatmullRom,
            FilterType::Gaussian => fr::FilterType::Mitchell,
            FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }
}
