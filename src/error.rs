use std::io;
use std::process::ExitStatus;

use thiserror::Error;

/// 库的统一错误类型
///
/// DNS 解析失败不在这里：单次查询失败是常态，只会表现为 [`Resolution::Unresolved`]。
///
/// [`Resolution::Unresolved`]: crate::dns_resolver::Resolution::Unresolved
#[derive(Debug, Error)]
pub enum Error {
    /// 被动收集工具以非零状态退出
    #[error("error occurred while running {tool} ({status}): {output}")]
    PassiveDiscovery {
        tool: String,
        status: ExitStatus,
        output: String,
    },

    /// 被动收集工具无法启动
    #[error("failed to launch {tool}: {source}")]
    ToolLaunch {
        tool: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: io::Error,
    },

    /// 命令行参数组合不完整
    #[error("missing required argument: {0}")]
    MissingArgument(&'static str),

    #[error("failed to serialize results: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
