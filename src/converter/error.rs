//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载转换链路中的所有错误来源，避免字符串拼接式错误处理。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。

/// 图标转换统一错误类型。
///
/// 该类型会在入口层被上转为 `AppError`，最终输出到 stderr。
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// 源文件缺失、不可读，或不是有效的位图。
    #[error("解码错误：{0}")]
    Decode(String),

    /// 目标目录不存在或不可写。
    #[error("写入错误：{0}")]
    Write(String),

    /// 无法为当前图像生成 ICO 输出。
    #[error("格式不支持：{0}")]
    UnsupportedFormat(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),
}

