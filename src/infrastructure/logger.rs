//! 日志基础设施

use anyhow::Result;
use std::io;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::infrastructure::config::LoggingConfig;

/// 初始化日志系统
///
/// 1. 创建日志目录
/// 2. 按日期分割的文件日志
/// 3. 可选的控制台输出
///
/// `RUST_LOG` 优先于配置中的级别。返回的 guard 必须活到进程结束，
/// 否则缓冲中的日志会丢失。
pub fn init(config: &LoggingConfig) -> Result<WorkerGuard> {
    std::fs::create_dir_all(&config.log_dir)?;

    let file_appender = rolling::daily(&config.log_dir, &config.file_prefix);
    let (non_blocking, guard) = non_blocking(file_appender);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let console = config
        .console_output
        .then(|| fmt::layer().with_writer(io::stdout).with_ansi(true));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false) // 文件中不使用颜色
                .with_target(false)
                .with_thread_names(true),
        )
        .with(console)
        .try_init()?;

    Ok(guard)
}
