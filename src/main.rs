//! # ICO 图标转换工具 — 命令行入口
//!
//! 本文件仅负责日志初始化、调用转换与退出码。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use ico_converter::cli;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let result = cli::parse_args(std::env::args_os().skip(1)).and_then(|invocation| {
        let config_path = std::env::var_os(cli::CONFIG_ENV).map(PathBuf::from);
        let config = cli::load_config(config_path.as_deref())?;
        cli::run(&invocation, config)
    });

    match result {
        Ok(report) => {
            log::info!(
                "转换完成：{} 帧，{} 字节",
                report.entries.len(),
                report.bytes_written
            );
            println!("{}", cli::success_message(&report));
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("转换失败: {err}");
            eprintln!("{err}");
            ExitCode::from(err.exit_code())
        }
    }
}
