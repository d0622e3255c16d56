use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter, Registry};

/// 运行时替换过滤器的句柄，仅在本进程首次成功初始化日志时设置
static FILTER_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

/// 解析日志级别字符串（大小写不敏感）
pub fn parse_log_level(level: &str) -> Result<log::LevelFilter, String> {
    match level.to_lowercase().as_str() {
        "error" => Ok(log::LevelFilter::Error),
        "warn" => Ok(log::LevelFilter::Warn),
        "info" => Ok(log::LevelFilter::Info),
        "debug" => Ok(log::LevelFilter::Debug),
        "trace" => Ok(log::LevelFilter::Trace),
        "off" => Ok(log::LevelFilter::Off),
        other => Err(format!("无效的日志级别: {}", other)),
    }
}

/// 初始化日志输出（stderr）
///
/// 设置了 `RUST_LOG` 时以其为准，否则使用传入的级别。
/// `log` 宏的记录由 tracing-subscriber 统一输出，重复调用不会报错。
pub fn init_logging(level: log::LevelFilter) {
    let from_env = EnvFilter::try_from_default_env().ok();
    let env_configured = from_env.is_some();
    let filter =
        from_env.unwrap_or_else(|| EnvFilter::new(level.as_str().to_lowercase()));

    let (filter_layer, handle) = reload::Layer::new(filter);
    let installed = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .try_init()
        .is_ok();
    if installed {
        let _ = FILTER_HANDLE.set(handle);
    }

    if !env_configured {
        log::set_max_level(level);
    }
}

/// 动态设置日志输出级别（不持久化）
pub fn set_log_level(level: &str) -> Result<(), String> {
    let level = parse_log_level(level)?;
    if let Some(handle) = FILTER_HANDLE.get() {
        handle
            .reload(EnvFilter::new(level.as_str().to_lowercase()))
            .map_err(|e| format!("更新日志过滤器失败: {}", e))?;
    }
    log::set_max_level(level);
    Ok(())
}

/// 获取当前日志级别
pub fn get_log_level() -> LogLevel {
    match log::max_level() {
        log::LevelFilter::Error => LogLevel::Error,
        log::LevelFilter::Warn => LogLevel::Warn,
        log::LevelFilter::Info => LogLevel::Info,
        log::LevelFilter::Debug => LogLevel::Debug,
        log::LevelFilter::Trace => LogLevel::Trace,
        log::LevelFilter::Off => LogLevel::Off,
    }
}
