//! # Favicon 转换工具 — 应用入口
//!
//! 不读取任何命令行参数：输入、输出与尺寸均取默认值。
//! 输入缺失属于正常结束；其余失败以非零退出码结束并输出诊断信息。

use std::process::ExitCode;

use favicon_converter::error::AppError;
use favicon_converter::icon_converter;

fn run() -> Result<(), AppError> {
    log::info!("start: 默认配置 {:?}", icon_converter::ConvertConfig::default());
    icon_converter::convert_with_defaults()?;
    Ok(())
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("图标转换失败: {err}");
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        }
    }
}
