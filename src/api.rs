use std::time::Duration;

use log::info;

use crate::dns_resolver::DnsResolver;
use crate::error::Result;
use crate::gen;
use crate::passive::PassiveDiscovery;
use crate::verify::ResolverVerifier;

/// 默认并发数
pub const DEFAULT_CONCURRENCY: usize = 50;
/// 默认字典组合层数
pub const DEFAULT_LEVELS: usize = 2;
/// 单次查询超时
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(3);
/// 检测DNS服务器可用性时查询的域名
pub const CANARY_DOMAIN: &str = "google.com";
/// 未指定DNS服务器时使用
pub const DEFAULT_RESOLVERS: [&str; 2] = ["8.8.8.8", "1.1.1.1"];

/// 枚举配置
#[derive(Debug, Clone)]
pub struct EnumConfig {
    /// 目标域名
    pub domain: String,
    /// 字典组合层数
    pub levels: usize,
    /// 同时进行的查询数
    pub concurrency: usize,
    /// 单次查询超时
    pub query_timeout: Duration,
    /// 探测域名
    pub canary_domain: String,
    /// DNS服务器列表，为空时使用 [`DEFAULT_RESOLVERS`]
    pub resolvers: Vec<String>,
}

impl Default for EnumConfig {
    fn default() -> Self {
        EnumConfig {
            domain: String::new(),
            levels: DEFAULT_LEVELS,
            concurrency: DEFAULT_CONCURRENCY,
            query_timeout: DEFAULT_QUERY_TIMEOUT,
            canary_domain: CANARY_DOMAIN.to_string(),
            resolvers: Vec::new(),
        }
    }
}

/// 子域名枚举引擎
pub struct SubdomainEngine {
    config: EnumConfig,
    verifier: ResolverVerifier,
    resolver: DnsResolver,
}

impl SubdomainEngine {
    pub fn new(config: EnumConfig) -> Self {
        let verifier = ResolverVerifier::new(
            config.canary_domain.clone(),
            config.concurrency,
            config.query_timeout,
        );
        let resolver = DnsResolver::new(&config.resolvers, config.concurrency, config.query_timeout);

        SubdomainEngine {
            config,
            verifier,
            resolver,
        }
    }

    /// 解析子域名时实际使用的DNS服务器
    pub fn resolvers(&self) -> Vec<String> {
        self.resolver.resolvers()
    }

    /// 从候选列表中筛选可用的DNS服务器
    pub async fn check_resolvers(&self, candidates: Vec<String>) -> Vec<String> {
        self.verifier.check_resolvers(candidates).await
    }

    /// 解析候选域名，返回解析成功的子集
    pub async fn resolve(&self, candidates: Vec<String>) -> Vec<String> {
        self.resolver.resolve_all(candidates).await
    }

    /// 从已知子域名提取字典
    pub fn wordlist_from_subdomains(&self, subdomains: &[String]) -> Vec<String> {
        let wordlist = gen::generate_wordlist_from_subdomains(subdomains, &self.config.domain);
        info!("Generated {} words from subdomains.", wordlist.len());
        wordlist
    }

    /// 按配置的层数生成候选域名
    pub fn permutations(&self, wordlist: &[String]) -> Vec<String> {
        let permutations =
            gen::generate_permutations(wordlist, &self.config.domain, self.config.levels);
        info!("Generated {} permutations.", permutations.len());
        permutations
    }

    /// 主动枚举：字典去重、组合、解析
    pub async fn run_active(&self, wordlist: Vec<String>) -> Vec<String> {
        let wordlist = gen::dedup_wordlist(wordlist);
        let candidates = self.permutations(&wordlist);
        let resolved = self.resolve(candidates).await;
        info!("Resolved: {} subdomains.", resolved.len());
        resolved
    }

    /// 被动收集
    pub async fn run_passive(&self, discovery: &PassiveDiscovery) -> Result<Vec<String>> {
        info!("Discovering subdomains for: {}", self.config.domain);
        let found = discovery.discover(&self.config.domain).await?;
        info!("Found {} subdomains passively", found.len());
        Ok(found)
    }
}

/// 便捷的主动枚举函数
pub async fn brute_force_subdomains(domain: &str, wordlist: Vec<String>) -> Vec<String> {
    let config = EnumConfig {
        domain: domain.to_string(),
        ..Default::default()
    };
    SubdomainEngine::new(config).run_active(wordlist).await
}

/// 便捷的DNS服务器检测函数
pub async fn find_working_resolvers(resolvers: Vec<String>) -> Vec<String> {
    SubdomainEngine::new(EnumConfig::default())
        .check_resolvers(resolvers)
        .await
}

/// 便捷的被动收集函数，使用默认的 subfinder
pub async fn passive_subdomains(domain: &str) -> Result<Vec<String>> {
    let config = EnumConfig {
        domain: domain.to_string(),
        ..Default::default()
    };
    SubdomainEngine::new(config)
        .run_passive(&PassiveDiscovery::default())
        .await
}
