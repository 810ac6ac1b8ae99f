//! # subhunt
//!
//! 子域名枚举工具库：检测DNS服务器可用性、用字典生成多级子域名、并发解析候选域名。
//!
//! ## 特性
//!
//! - 🚀 **有界并发**: 所有DNS查询都在同一个限流任务池中执行，默认并发 50
//! - 🔁 **逐个回退**: 每个候选域名按顺序尝试DNS服务器，第一个成功即停止
//! - 🧩 **字典组合**: 支持多层字典组合，也可以从已知子域名中提取字典
//! - 🔍 **被动收集**: 调用 subfinder 等外部工具获取已公开的子域名
//!
//! ## 快速开始
//!
//! ```rust,no_run
//! use subhunt::{brute_force_subdomains, find_working_resolvers};
//!
//! #[tokio::main]
//! async fn main() {
//!     let resolvers = vec!["8.8.8.8".to_string(), "1.1.1.1".to_string()];
//!     let working = find_working_resolvers(resolvers).await;
//!     println!("可用DNS服务器: {:?}", working);
//!
//!     let wordlist = vec!["www".to_string(), "api".to_string()];
//!     let results = brute_force_subdomains("example.com", wordlist).await;
//!     println!("发现 {} 个子域名", results.len());
//! }
//! ```
//!
//! ## 高级配置
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use subhunt::{EnumConfig, SubdomainEngine};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = EnumConfig {
//!         domain: "example.com".to_string(),
//!         levels: 1,
//!         concurrency: 100,
//!         query_timeout: Duration::from_secs(2),
//!         resolvers: vec!["9.9.9.9".to_string()],
//!         ..Default::default()
//!     };
//!
//!     let engine = SubdomainEngine::new(config);
//!     let resolved = engine.run_active(vec!["dev".to_string(), "mail".to_string()]).await;
//!     for name in resolved {
//!         println!("{}", name);
//!     }
//! }
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod api;
pub mod dns_resolver;
pub mod error;
pub mod gen;
pub mod input;
pub mod logger;
pub mod output;
pub mod passive;
pub mod pool;
pub mod state;
pub mod verify;

// 重新导出主要的公共API
pub use api::{
    brute_force_subdomains, find_working_resolvers, passive_subdomains, EnumConfig,
    SubdomainEngine, CANARY_DOMAIN, DEFAULT_CONCURRENCY, DEFAULT_LEVELS, DEFAULT_QUERY_TIMEOUT,
    DEFAULT_RESOLVERS,
};

pub use dns_resolver::{DnsResolver, Nameserver, Resolution};
pub use error::{Error, Result};
pub use gen::{dedup_wordlist, generate_permutations, generate_wordlist_from_subdomains};
pub use input::OutputFormat;
pub use output::export_results;
pub use passive::PassiveDiscovery;
pub use pool::WorkerPool;
pub use state::{ProgressKind, ProgressState, PROGRESS_INTERVAL};
pub use verify::ResolverVerifier;
