//! # 数据模型与中间结果
//!
//! ## 设计思路
//!
//! 将“外部输入”和“流水线中间结果”解耦：
//! - `IconSize` 表示一个目标分辨率
//! - `SourceImage` 表示已解码的源图像
//! - `RenderedFrame` 表示缩放完成、可写入 ICO 目录的 RGBA 帧
//! - `ConversionReport` 表示一次成功转换的结果摘要

use std::fmt;
use std::path::PathBuf;

use image::RgbaImage;

/// ICO 目录项允许的最大边长（目录中以 0 表示 256）。
pub const MAX_ICO_DIMENSION: u32 = 256;

/// Windows 标准图标尺寸，从大到小排列。
pub const DEFAULT_ICON_SIZES: [IconSize; 6] = [
    IconSize::square(256),
    IconSize::square(128),
    IconSize::square(64),
    IconSize::square(48),
    IconSize::square(32),
    IconSize::square(16),
];

/// 单个目标分辨率。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconSize {
    pub width: u32,
    pub height: u32,
}

impl IconSize {
    pub const fn square(side: u32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// 是否落在 ICO 目录可表示的范围内（`1..=256`）。
    pub fn fits_ico(&self) -> bool {
        (1..=MAX_ICO_DIMENSION).contains(&self.width) && (1..=MAX_ICO_DIMENSION).contains(&self.height)
    }

    /// 是否比源图像大（任一边超出即视为需要放大）。
    pub(crate) fn exceeds(&self, width: u32, height: u32) -> bool {
        self.width > width || self.height > height
    }
}

impl fmt::Display for IconSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// 加载阶段输出：解码后的源图像。
///
/// 统一转换为 RGBA8，后续每个尺寸的缩放都从这份像素出发。
pub(crate) struct SourceImage {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixels: RgbaImage,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: String,
}

/// 缩放阶段输出：单个 ICO 帧的 RGBA 数据。
pub(crate) struct RenderedFrame {
    pub(crate) size: IconSize,
    /// RGBA 字节数组（`width * height * 4`）。
    pub(crate) bytes: Vec<u8>,
}

/// 一次成功转换的结果摘要。
#[derive(Debug, Clone)]
pub struct ConversionReport {
    pub source: PathBuf,
    pub destination: PathBuf,
    /// 源图像尺寸。
    pub source_size: (u32, u32),
    /// 实际写入 ICO 的尺寸，顺序与配置一致。
    pub entries: Vec<IconSize>,
    pub bytes_written: u64,
}
