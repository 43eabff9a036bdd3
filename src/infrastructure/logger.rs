//! 日志基础设施

use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;

pub struct Logger;

impl Logger {
    /// 初始化日志系统
    ///
    /// `RUST_LOG` 优先于配置中的级别。设置了 `log_dir` 时额外写入按日期分割的日志文件，
    /// 返回的 guard 需要保持到进程结束，否则缓冲中的日志会丢失。
    pub fn init(config: &LoggingConfig) -> std::io::Result<Option<WorkerGuard>> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

        let console_layer = fmt::layer().with_target(false).compact();

        match &config.log_dir {
            Some(log_dir) => {
                std::fs::create_dir_all(log_dir)?;

                let file_appender = rolling::daily(log_dir, &config.file_prefix);
                let (writer, guard) = non_blocking(file_appender);

                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(console_layer)
                    .with(
                        // 文件中不使用颜色
                        fmt::layer()
                            .with_writer(writer)
                            .with_ansi(false)
                            .with_thread_names(true),
                    )
                    .init();

                Ok(Some(guard))
            }
            None => {
                tracing_subscriber::registry()
                    .with(env_filter)
                    .with(console_layer)
                    .init();

                Ok(None)
            }
        }
    }
}
