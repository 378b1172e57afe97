//! 使用 `tracing_subscriber` 初始化日志。
//!
//! 日志写入标准错误，标准输出只留给解码出的消息。

use crate::constants::LOG_LEVELS;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// 根据 `-v` 的次数选择默认过滤指令；设置了 `RUST_LOG` 时以环境变量为准。
pub fn setup_logging(verbosity: u8) {
    let directives = directives_for(verbosity);
    let main_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directives)))
        .with(main_layer)
        .init()
}

fn directives_for(verbosity: u8) -> &'static str {
    LOG_LEVELS[usize::from(verbosity).min(LOG_LEVELS.len() - 1)]
}
