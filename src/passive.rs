//! 被动子域名收集
//!
//! 调用外部工具（默认 `subfinder -d <domain> -silent`），标准输出每行一个子域名。
//! 工具以非零状态退出时整个流程直接失败，不保留部分结果。

use log::debug;
use tokio::process::Command;

use crate::error::{Error, Result};

/// 参数中的域名占位符
pub const DOMAIN_PLACEHOLDER: &str = "{domain}";

#[derive(Debug, Clone)]
pub struct PassiveDiscovery {
    tool: String,
    args: Vec<String>,
}

impl PassiveDiscovery {
    /// 使用自定义工具，`args` 中的 `{domain}` 会被替换成目标域名
    pub fn new(tool: impl Into<String>, args: Vec<String>) -> Self {
        PassiveDiscovery {
            tool: tool.into(),
            args,
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    /// 运行工具并收集子域名
    pub async fn discover(&self, domain: &str) -> Result<Vec<String>> {
        let args: Vec<String> = self
            .args
            .iter()
            .map(|arg| arg.replace(DOMAIN_PLACEHOLDER, domain))
            .collect();
        debug!("running {} {}", self.tool, args.join(" "));

        let output = Command::new(&self.tool)
            .args(&args)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| Error::ToolLaunch {
                tool: self.tool.clone(),
                source,
            })?;

        if !output.status.success() {
            let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
            combined.push_str(&String::from_utf8_lossy(&output.stderr));
            return Err(Error::PassiveDiscovery {
                tool: self.tool.clone(),
                status: output.status,
                output: combined.trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

impl Default for PassiveDiscovery {
    fn default() -> Self {
        PassiveDiscovery::new(
            "subfinder",
            vec![
                "-d".to_string(),
                DOMAIN_PLACEHOLDER.to_string(),
                "-silent".to_string(),
            ],
        )
    }
}
