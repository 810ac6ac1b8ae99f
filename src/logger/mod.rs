use std::io::Write;

use colored::*;
use log::{Level, LevelFilter};

fn label(level: Level) -> ColoredString {
    match level {
        Level::Error => "Error".red(),
        Level::Warn => "Warning".yellow(),
        Level::Info => "INFO".blue(),
        Level::Debug => "DEBUG".magenta(),
        Level::Trace => "TRACE".normal(),
    }
}

/// 解析日志级别，无法识别时使用 info
pub fn parse_level(level: &str, silent: bool) -> LevelFilter {
    if silent {
        return LevelFilter::Warn;
    }
    level.parse().unwrap_or(LevelFilter::Info)
}

/// 初始化日志
///
/// 先读取 `RUST_LOG`，再用命令行指定的级别覆盖。重复初始化时静默忽略。
pub fn init_logger(level: &str, silent: bool) {
    let level = parse_level(level, silent);

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    // 大量解析失败是正常现象，不输出解析库自身的告警
    builder.filter_module("trust_dns_proto", LevelFilter::Error);
    builder.filter_module("trust_dns_resolver", LevelFilter::Error);
    builder.format(|buf, record| writeln!(buf, "[{}] {}", label(record.level()), record.args()));

    let _ = builder.try_init();
}
