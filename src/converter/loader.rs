//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 在完整解码之前尽可能早地拒绝非法输入，减少不必要的内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! 1. 存在性 + metadata 体积限制
//! 2. 读取字节，`infer` 明确识别为非图片类型时直接拒绝
//! 3. 按内容猜测格式，猜不出时回退到文件扩展名（TGA 等无魔数格式）
//! 4. 仅读取 header 尺寸，按像素上限快速拒绝
//! 5. 完整解码并统一转换为 RGBA8

use std::io::Cursor;
use std::path::Path;

use image::{GenericImageView, ImageFormat, ImageReader};

use super::source::SourceImage;
use super::{ConvertError, IcoConverter};

impl IcoConverter {
    /// 从本地路径加载并解码源图像。
    pub(super) fn load_from_file(&self, path: &Path) -> Result<SourceImage, ConvertError> {
        log::info!("📁 开始读取源图像 - 路径: {}", path.display());

        if !path.exists() {
            return Err(ConvertError::Decode(format!("文件不存在：{}", path.display())));
        }

        let metadata = std::fs::metadata(path)
            .map_err(|e| ConvertError::Decode(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(ConvertError::Decode(format!("不是普通文件：{}", path.display())));
        }

        if metadata.len() > self.config.max_file_size {
            return Err(ConvertError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                self.config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path)
            .map_err(|e| ConvertError::Decode(format!("无法读取图片文件：{}", e)))?;

        let extension_hint = ImageFormat::from_path(path).ok();
        self.decode_bytes(&bytes, &path.display().to_string(), extension_hint)
    }

    /// 从内存字节解码源图像，格式只能由内容判断。
    pub(super) fn load_from_memory(
        &self,
        bytes: &[u8],
        source_hint: &str,
    ) -> Result<SourceImage, ConvertError> {
        self.decode_bytes(bytes, source_hint, None)
    }

    fn decode_bytes(
        &self,
        bytes: &[u8],
        source_hint: &str,
        extension_hint: Option<ImageFormat>,
    ) -> Result<SourceImage, ConvertError> {
        if bytes.len() as u64 > self.config.max_file_size {
            return Err(ConvertError::ResourceLimit(format!(
                "输入过大：{:.2} MB（限制：{:.2} MB）",
                bytes.len() as f64 / 1024.0 / 1024.0,
                self.config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        Self::validate_image_signature(bytes)?;

        let (header_width, header_height) = Self::reader_for(bytes, extension_hint)?
            .into_dimensions()
            .map_err(|e| ConvertError::Decode(format!("无法读取图片尺寸：{}", e)))?;
        self.validate_pixel_limits(header_width, header_height)?;

        let decoded = Self::reader_for(bytes, extension_hint)?
            .decode()
            .map_err(|e| ConvertError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        self.validate_pixel_limits(width, height)?;

        log::info!(
            "✅ 图片解码成功 - 来源: {} 尺寸: {}x{} 色彩: {:?}",
            source_hint,
            width,
            height,
            decoded.color()
        );

        Ok(SourceImage {
            width,
            height,
            pixels: decoded.into_rgba8(),
            source_hint: source_hint.to_string(),
        })
    }

    /// 签名检查只拒绝被 `infer` 明确识别为非图片的内容。
    ///
    /// `infer` 不认识的格式（PNM、QOI、TGA 等）交给 `image` 自己判断。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), ConvertError> {
        if bytes.is_empty() {
            return Err(ConvertError::Decode("图片内容为空".to_string()));
        }

        if let Some(kind) = infer::get(bytes) {
            if kind.matcher_type() != infer::MatcherType::Image {
                return Err(ConvertError::Decode(format!(
                    "文件签名不是图片类型：{}",
                    kind.mime_type()
                )));
            }
        }

        Ok(())
    }

    /// 构建解码器：优先按内容猜测格式，猜不出时使用扩展名提示。
    fn reader_for(
        bytes: &[u8],
        extension_hint: Option<ImageFormat>,
    ) -> Result<ImageReader<Cursor<&[u8]>>, ConvertError> {
        let mut reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| ConvertError::Decode(format!("无法识别图片格式：{}", e)))?;

        if reader.format().is_none() {
            match extension_hint {
                Some(format) => reader.set_format(format),
                None => return Err(ConvertError::Decode("无法识别图片类型".to_string())),
            }
        }

        Ok(reader)
    }

    fn validate_pixel_limits(&self, width: u32, height: u32) -> Result<(), ConvertError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ConvertError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > self.config.max_decoded_pixels {
            return Err(ConvertError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, self.config.max_decoded_pixels
            )));
        }

        Ok(())
    }
}
