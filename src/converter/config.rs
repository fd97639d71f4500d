//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ConvertConfig`，保证转换行为可观测、可调整、可测试。
//! 其中缩放档位（quality / balanced / speed）作为高层语义，映射到具体的重采样滤镜。
//!
//! ## 实现思路
//!
//! - `Default` 提供与 Windows 标准图标一致的配置，滤镜固定为 Lanczos3。
//! - `ResizeProfile` 负责档位字符串解析与反向输出。
//! - `ConvertSettings` 是 JSON 设置文件的反序列化模型，字段全部可选，
//!   经 `apply_settings` 校验后覆盖到默认配置上。

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::source::{DEFAULT_ICON_SIZES, IconSize, MAX_ICO_DIMENSION};
use super::ConvertError;

const MIN_FILE_SIZE_MB: u64 = 1;
const MAX_FILE_SIZE_MB: u64 = 1024;
const MIN_DECODED_PIXELS: u64 = (MAX_ICO_DIMENSION as u64) * (MAX_ICO_DIMENSION as u64);

/// 图标转换配置。
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// 需要嵌入的分辨率列表，顺序即 ICO 目录顺序。
    pub sizes: Vec<IconSize>,
    /// 缩放滤镜。
    pub resize_filter: FilterType,
    /// 源图比目标尺寸小时，是否跳过该尺寸而不是放大。
    pub skip_larger_than_source: bool,
    /// 源文件允许的最大体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            sizes: DEFAULT_ICON_SIZES.to_vec(),
            resize_filter: FilterType::Lanczos3,
            skip_larger_than_source: false,
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
        }
    }
}

/// 缩放档位。
///
/// - `Quality`：Lanczos3，尽量保真
/// - `Balanced`：CatmullRom
/// - `Speed`：Triangle，优先速度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeProfile {
    Quality,
    Balanced,
    Speed,
}

impl ResizeProfile {
    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use ico_converter::ResizeProfile;
    ///
    /// let p = ResizeProfile::parse(" Balanced ")?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), ico_converter::ConvertError>(())
    /// ```
    pub fn parse(profile: &str) -> Result<Self, ConvertError> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(ConvertError::InvalidConfig(format!(
                "未知缩放档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }

    fn filter(self) -> FilterType {
        match self {
            Self::Quality => FilterType::Lanczos3,
            Self::Balanced => FilterType::CatmullRom,
            Self::Speed => FilterType::Triangle,
        }
    }
}

/// JSON 设置文件模型，所有字段可选。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvertSettings {
    #[serde(default)]
    pub sizes: Option<Vec<u32>>,
    #[serde(default)]
    pub profile: Option<String>,
    #[serde(default)]
    pub skip_larger_than_source: Option<bool>,
    #[serde(default)]
    pub max_file_size_mb: Option<u64>,
    #[serde(default)]
    pub max_decoded_pixels: Option<u64>,
}

impl ConvertConfig {
    /// 从 JSON 设置文件加载配置，未出现的字段保持默认值。
    pub fn load_from_path(path: &Path) -> Result<Self, ConvertError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConvertError::InvalidConfig(format!("无法读取设置文件 {}：{}", path.display(), e))
        })?;
        let settings: ConvertSettings = serde_json::from_str(&content).map_err(|e| {
            ConvertError::InvalidConfig(format!("解析设置文件 {} 失败：{}", path.display(), e))
        })?;

        let mut config = Self::default();
        config.apply_settings(&settings)?;

        log::info!(
            "⚙️ 已加载设置文件：{}（sizes={:?}, profile={}, skip_larger={}）",
            path.display(),
            config.sizes.iter().map(|s| s.width).collect::<Vec<_>>(),
            config.profile_label(),
            config.skip_larger_than_source
        );

        Ok(config)
    }

    /// 校验并应用设置。任一字段非法时整体失败，配置保持不变。
    pub fn apply_settings(&mut self, settings: &ConvertSettings) -> Result<(), ConvertError> {
        let sizes = match &settings.sizes {
            Some(sides) => Some(Self::validate_sizes(sides)?),
            None => None,
        };
        let profile = settings
            .profile
            .as_deref()
            .map(ResizeProfile::parse)
            .transpose()?;

        if let Some(mb) = settings.max_file_size_mb {
            if !(MIN_FILE_SIZE_MB..=MAX_FILE_SIZE_MB).contains(&mb) {
                return Err(ConvertError::InvalidConfig(format!(
                    "max_file_size_mb 必须在 {}~{} 之间",
                    MIN_FILE_SIZE_MB, MAX_FILE_SIZE_MB
                )));
            }
        }
        if let Some(pixels) = settings.max_decoded_pixels {
            if pixels < MIN_DECODED_PIXELS {
                return Err(ConvertError::InvalidConfig(format!(
                    "max_decoded_pixels 不能小于 {}",
                    MIN_DECODED_PIXELS
                )));
            }
        }

        if let Some(sizes) = sizes {
            self.sizes = sizes;
        }
        if let Some(profile) = profile {
            self.apply_profile(profile);
        }
        if let Some(skip) = settings.skip_larger_than_source {
            self.skip_larger_than_source = skip;
        }
        if let Some(mb) = settings.max_file_size_mb {
            self.max_file_size = mb * 1024 * 1024;
        }
        if let Some(pixels) = settings.max_decoded_pixels {
            self.max_decoded_pixels = pixels;
        }

        Ok(())
    }

    pub fn apply_profile(&mut self, profile: ResizeProfile) {
        self.resize_filter = profile.filter();
    }

    /// 基于当前滤镜反推档位；非档位内置的滤镜返回 `None`。
    pub fn infer_profile(&self) -> Option<ResizeProfile> {
        [ResizeProfile::Quality, ResizeProfile::Balanced, ResizeProfile::Speed]
            .into_iter()
            .find(|p| p.filter() == self.resize_filter)
    }

    /// 当前档位名称，用于日志展示。
    pub(crate) fn profile_label(&self) -> &'static str {
        self.infer_profile().map(ResizeProfile::as_str).unwrap_or("custom")
    }

    /// 校验尺寸配置本身是否可用于生成 ICO。
    pub(crate) fn validate(&self) -> Result<(), ConvertError> {
        if self.sizes.is_empty() {
            return Err(ConvertError::InvalidConfig("尺寸列表不能为空".to_string()));
        }
        if let Some(bad) = self.sizes.iter().find(|s| !s.fits_ico()) {
            return Err(ConvertError::UnsupportedFormat(format!(
                "ICO 不支持尺寸 {}（单边必须在 1~{} 之间）",
                bad, MAX_ICO_DIMENSION
            )));
        }
        Ok(())
    }

    fn validate_sizes(sides: &[u32]) -> Result<Vec<IconSize>, ConvertError> {
        if sides.is_empty() {
            return Err(ConvertError::InvalidConfig("sizes 不能为空".to_string()));
        }

        let mut seen = HashSet::new();
        let mut sizes = Vec::with_capacity(sides.len());
        for &side in sides {
            if !(1..=MAX_ICO_DIMENSION).contains(&side) {
                return Err(ConvertError::InvalidConfig(format!(
                    "尺寸 {} 超出范围（1~{}）",
                    side, MAX_ICO_DIMENSION
                )));
            }
            if !seen.insert(side) {
                return Err(ConvertError::InvalidConfig(format!("尺寸 {} 重复", side)));
            }
            sizes.push(IconSize::square(side));
        }
        Ok(sizes)
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use image::imageops::FilterType;

    use super::{ConvertConfig, ConvertSettings, ResizeProfile};
    use crate::converter::{ConvertError, IconSize};

    fn unique_temp_dir() -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("ico-converter-config-test-{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn default_config_pins_lanczos_and_six_sizes() {
        let config = ConvertConfig::default();
        assert_eq!(config.sizes.len(), 6);
        assert_eq!(config.resize_filter, FilterType::Lanczos3);
        assert_eq!(config.infer_profile(), Some(ResizeProfile::Quality));
        assert!(config.validate().is_ok());
        assert_eq!(config.profile_label(), "quality");
    }

    #[test]
    fn filters_outside_profiles_are_labelled_custom() {
        let config = ConvertConfig {
            resize_filter: FilterType::Gaussian,
            ..Default::default()
        };
        assert_eq!(config.infer_profile(), None);
        assert_eq!(config.profile_label(), "custom");
    }

    #[test]
    fn profile_parse_is_case_insensitive_and_rejects_unknown() {
        assert_eq!(ResizeProfile::parse("SPEED").unwrap(), ResizeProfile::Speed);
        assert!(matches!(
            ResizeProfile::parse("ultra"),
            Err(ConvertError::InvalidConfig(_))
        ));
    }

    #[test]
    fn apply_settings_overrides_only_given_fields() {
        let mut config = ConvertConfig::default();
        let settings = ConvertSettings {
            sizes: Some(vec![48, 16]),
            profile: Some("speed".to_string()),
            ..Default::default()
        };

        config.apply_settings(&settings).expect("apply settings");

        assert_eq!(config.sizes, vec![IconSize::square(48), IconSize::square(16)]);
        assert_eq!(config.resize_filter, FilterType::Triangle);
        assert!(!config.skip_larger_than_source);
        assert_eq!(config.max_file_size, 50 * 1024 * 1024);
    }

    #[test]
    fn apply_settings_is_all_or_nothing() {
        let mut config = ConvertConfig::default();
        let settings = ConvertSettings {
            sizes: Some(vec![32]),
            max_file_size_mb: Some(0),
            ..Default::default()
        };

        assert!(config.apply_settings(&settings).is_err());
        assert_eq!(config.sizes.len(), 6);
    }

    #[test]
    fn rejects_out_of_range_and_duplicate_sizes() {
        let mut config = ConvertConfig::default();
        for sides in [vec![], vec![0], vec![512], vec![32, 32]] {
            let settings = ConvertSettings {
                sizes: Some(sides),
                ..Default::default()
            };
            assert!(matches!(
                config.apply_settings(&settings),
                Err(ConvertError::InvalidConfig(_))
            ));
        }
    }

    #[test]
    fn validate_rejects_sizes_outside_ico_range() {
        let config = ConvertConfig {
            sizes: vec![IconSize::square(300)],
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConvertError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn load_from_path_reads_json_settings() {
        let dir = unique_temp_dir();
        let path = dir.join("settings.json");
        std::fs::write(
            &path,
            r#"{ "sizes": [64, 32], "profile": "balanced", "skip_larger_than_source": true }"#,
        )
        .expect("write settings");

        let config = ConvertConfig::load_from_path(&path).expect("load settings");

        assert_eq!(config.sizes, vec![IconSize::square(64), IconSize::square(32)]);
        assert_eq!(config.infer_profile(), Some(ResizeProfile::Balanced));
        assert!(config.skip_larger_than_source);
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn load_from_path_rejects_bad_json_and_unknown_keys() {
        let dir = unique_temp_dir();
        let bad = dir.join("bad.json");
        std::fs::write(&bad, "not-json").expect("write bad settings");
        let unknown = dir.join("unknown.json");
        std::fs::write(&unknown, r#"{ "colors": 256 }"#).expect("write unknown settings");

        assert!(matches!(
            ConvertConfig::load_from_path(&bad),
            Err(ConvertError::InvalidConfig(_))
        ));
        assert!(matches!(
            ConvertConfig::load_from_path(&unknown),
            Err(ConvertError::InvalidConfig(_))
        ));
        assert!(matches!(
            ConvertConfig::load_from_path(&dir.join("missing.json")),
            Err(ConvertError::InvalidConfig(_))
        ));
        let _ = std::fs::remove_dir_all(dir);
    }
}
