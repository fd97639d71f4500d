//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 入口层只面对一个 `AppError`：命令行参数错误、设置文件错误与转换流水线错误
//! 都收敛到这里，`main` 据此决定退出码。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ConvertError` 提供 `From` 转换，无需手动 map。

use crate::converter::ConvertError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 命令行参数不符合 `<source> <dest>` 形式
    #[error("用法: {0}")]
    Usage(String),

    /// 图标转换流水线错误（解码 / 缩放 / 写入）
    #[error("{0}")]
    Convert(#[from] ConvertError),
}

impl AppError {
    /// 进程退出码：参数错误为 2，其余失败为 1。
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Usage(_) => 2,
            Self::Convert(_) => 1,
        }
    }
}
