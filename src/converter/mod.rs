//! # 图标转换模块（converter）
//!
//! ## 设计思路
//!
//! 该模块将“加载校验 → 逐尺寸缩放 → ICO 编码 → 原子写入”按职责拆分为多个子模块，
//! 避免单文件膨胀与耦合。
//!
//! - `handler`：编排整条处理流水线，记录阶段耗时
//! - `loader`：负责文件读取、签名校验、像素上限与解码
//! - `pipeline`：负责逐尺寸缩放
//! - `writer`：负责 ICO 编码与临时文件 + 重命名写入
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! main.rs / 库调用方
//!    ↓
//! handler.rs（IcoConverter::convert）
//!    ├─ loader.rs（读取 + 校验 + 解码）
//!    ├─ pipeline.rs（256/128/64/48/32/16 缩放）
//!    └─ writer.rs（编码 + 原子写入）
//!    ↓
//! ConversionReport / ConvertError
//! ```

mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;
mod writer;

pub use config::{ConvertConfig, ConvertSettings, ResizeProfile};
pub use error::ConvertError;
pub use handler::{IcoConverter, convert};
pub use source::{ConversionReport, DEFAULT_ICON_SIZES, IconSize, MAX_ICO_DIMENSION};
