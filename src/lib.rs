//! # ICO 图标转换工具 — 库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  main.rs  (env_logger + 退出码)               │
//! │     ↓                                        │
//! │  cli ──────── 位置参数 / 设置文件 / 成功消息   │
//! │     ↓                                        │
//! │  converter ── IcoConverter                   │
//! │   ├─ loader    读取·签名校验·解码             │
//! │   ├─ pipeline  256/128/64/48/32/16 缩放       │
//! │   └─ writer    ICO 编码·原子写入              │
//! │     ↓                                        │
//! │  error ────── AppError (统一错误类型)          │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，决定进程退出码 |
//! | [`cli`] | 命令行参数与设置文件适配 |
//! | [`converter`] | 将位图转换为多分辨率 ICO |

pub mod cli;
pub mod converter;
pub mod error;

pub use converter::{
    ConversionReport, ConvertConfig, ConvertError, ConvertSettings, DEFAULT_ICON_SIZES, IcoConverter,
    IconSize, ResizeProfile, convert,
};
pub use error::AppError;
