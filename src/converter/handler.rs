//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IcoConverter` 只负责流程编排，处理链路固定为：
//! 1. 校验配置
//! 2. 加载并解码源图像
//! 3. 按尺寸列表逐个缩放
//! 4. 编码并原子写入 ICO 文件
//!
//! ## 实现思路
//!
//! - 单次转换内使用同一份配置，转换器本身不持有可变状态。
//! - 记录 `load/resize/write/total` 阶段耗时，便于性能诊断。

use std::path::Path;
use std::time::Instant;

use super::source::ConversionReport;
use super::{ConvertConfig, ConvertError};

/// 图标转换器。
pub struct IcoConverter {
    pub(super) config: ConvertConfig,
}

impl IcoConverter {
    /// 根据配置创建转换器。
    ///
    /// # 示例
    /// ```rust
    /// use ico_converter::{ConvertConfig, IcoConverter};
    ///
    /// let converter = IcoConverter::new(ConvertConfig::default())?;
    /// assert_eq!(converter.config().sizes.len(), 6);
    /// # Ok::<(), ico_converter::ConvertError>(())
    /// ```
    pub fn new(config: ConvertConfig) -> Result<Self, ConvertError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ConvertConfig {
        &self.config
    }

    /// 处理主入口：读取 `source`，生成多分辨率 ICO 并写入 `destination`。
    ///
    /// 失败时不会在 `destination` 留下半成品；已存在的目标文件保持原样。
    ///
    /// # 示例
    /// ```rust,no_run
    /// use ico_converter::{ConvertConfig, IcoConverter};
    /// use std::path::Path;
    ///
    /// let converter = IcoConverter::new(ConvertConfig::default())?;
    /// let report = converter.convert(Path::new("icon_1024.png"), Path::new("icon.ico"))?;
    /// assert_eq!(report.entries.len(), 6);
    /// # Ok::<(), ico_converter::ConvertError>(())
    /// ```
    pub fn convert(&self, source: &Path, destination: &Path) -> Result<ConversionReport, ConvertError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let image = self.load_from_file(source)?;
        let load_ms = load_start.elapsed().as_millis();

        let resize_start = Instant::now();
        let frames = self.render_frames(&image)?;
        let resize_ms = resize_start.elapsed().as_millis();

        let write_start = Instant::now();
        let bytes_written = self.write_ico_atomically(destination, &frames)?;
        let write_ms = write_start.elapsed().as_millis();

        log::info!(
            "⏱️ 转换耗时 - 来源: {} load={}ms resize={}ms write={}ms total={}ms",
            image.source_hint,
            load_ms,
            resize_ms,
            write_ms,
            total_start.elapsed().as_millis()
        );

        Ok(ConversionReport {
            source: source.to_path_buf(),
            destination: destination.to_path_buf(),
            source_size: (image.width, image.height),
            entries: frames.iter().map(|f| f.size).collect(),
            bytes_written,
        })
    }

    /// 内存版本：输入任意位图字节，返回 ICO 文件字节。
    pub fn convert_bytes(&self, bytes: &[u8]) -> Result<Vec<u8>, ConvertError> {
        let image = self.load_from_memory(bytes, "memory")?;
        let frames = self.render_frames(&image)?;
        let mut out = Vec::new();
        Self::encode_ico(&mut out, &frames)?;
        Ok(out)
    }
}

/// 使用默认配置（256/128/64/48/32/16，Lanczos3）完成一次转换。
pub fn convert(source: &Path, destination: &Path) -> Result<ConversionReport, ConvertError> {
    IcoConverter::new(ConvertConfig::default())?.convert(source, destination)
}
