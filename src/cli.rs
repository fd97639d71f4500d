//! 命令行入口适配
//!
//! 仅做入参/出参适配（薄封装）：两个位置参数，外加可选的
//! `ICO_CONVERTER_CONFIG` 环境变量指向 JSON 设置文件。

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::converter::{ConversionReport, ConvertConfig, IcoConverter};
use crate::error::AppError;

/// 设置文件路径所在的环境变量名。
pub const CONFIG_ENV: &str = "ICO_CONVERTER_CONFIG";

const USAGE: &str = "ico-converter <source> <dest>";

/// 一次调用的源路径与目标路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// 解析位置参数（不含程序名）。
pub fn parse_args<I>(args: I) -> Result<Invocation, AppError>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    match (args.next(), args.next(), args.next()) {
        (Some(source), Some(destination), None) => Ok(Invocation {
            source: PathBuf::from(source),
            destination: PathBuf::from(destination),
        }),
        _ => Err(AppError::Usage(USAGE.to_string())),
    }
}

/// 有设置文件时加载并校验，否则使用默认配置。
pub fn load_config(config_path: Option<&Path>) -> Result<ConvertConfig, AppError> {
    match config_path {
        Some(path) => Ok(ConvertConfig::load_from_path(path)?),
        None => Ok(ConvertConfig::default()),
    }
}

pub fn run(invocation: &Invocation, config: ConvertConfig) -> Result<ConversionReport, AppError> {
    let converter = IcoConverter::new(config)?;
    log::debug!(
        "开始转换：{} -> {}（{} 个尺寸，profile={}）",
        invocation.source.display(),
        invocation.destination.display(),
        converter.config().sizes.len(),
        converter.config().profile_label()
    );
    Ok(converter.convert(&invocation.source, &invocation.destination)?)
}

/// 成功后输出到 stdout 的唯一一行。
pub fn success_message(report: &ConversionReport) -> String {
    format!(
        "Successfully converted {} to {}",
        report.source.display(),
        report.destination.display()
    )
}
