use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, trace};
use trust_dns_resolver::config::{NameServerConfig, Protocol, ResolverConfig, ResolverOpts};
use trust_dns_resolver::TokioAsyncResolver;

use crate::api::{DEFAULT_CONCURRENCY, DEFAULT_QUERY_TIMEOUT, DEFAULT_RESOLVERS};
use crate::pool::WorkerPool;
use crate::state::ProgressKind;

/// DNS默认端口
pub const DNS_PORT: u16 = 53;

/// 单次解析的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(String),
    Unresolved,
}

impl Resolution {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Resolution::Resolved(_))
    }

    pub fn into_name(self) -> Option<String> {
        match self {
            Resolution::Resolved(name) => Some(name),
            Resolution::Unresolved => None,
        }
    }
}

/// 解析 `8.8.8.8`、`8.8.8.8:5353`、`2606:4700::1111`、`[::1]:53` 这几种写法
pub fn parse_nameserver(resolver: &str) -> Option<SocketAddr> {
    let trimmed = resolver.trim();
    if let Ok(addr) = trimmed.parse::<SocketAddr>() {
        return Some(addr);
    }
    trimmed
        .parse::<IpAddr>()
        .ok()
        .map(|ip| SocketAddr::new(ip, DNS_PORT))
}

/// 只使用一个DNS服务器的解析器，不读hosts文件，不重试
pub fn build_resolver(nameserver: SocketAddr, query_timeout: Duration) -> TokioAsyncResolver {
    let mut config = ResolverConfig::new();
    config.add_name_server(NameServerConfig::new(nameserver, Protocol::Udp));

    let mut opts = ResolverOpts::default();
    opts.timeout = query_timeout;
    opts.attempts = 1;
    opts.use_hosts_file = false;

    TokioAsyncResolver::tokio(config, opts)
}

/// 绑定到单个DNS服务器的查询入口
///
/// 地址无法解析时 `client` 为空，所有查询都直接视为失败。
#[derive(Clone)]
pub struct Nameserver {
    address: String,
    client: Option<TokioAsyncResolver>,
    query_timeout: Duration,
}

impl Nameserver {
    pub fn new(address: &str, query_timeout: Duration) -> Self {
        let client = match parse_nameserver(address) {
            Some(addr) => Some(build_resolver(addr, query_timeout)),
            None => {
                debug!("invalid resolver address: {}", address);
                None
            }
        };

        Nameserver {
            address: address.to_string(),
            client,
            query_timeout,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// 查询A记录，至少拿到一条记录才算成功
    pub async fn lookup_a(&self, name: &str) -> Resolution {
        let client = match &self.client {
            Some(client) => client,
            None => return Resolution::Unresolved,
        };

        match tokio::time::timeout(self.query_timeout, client.ipv4_lookup(name)).await {
            Ok(Ok(lookup)) if lookup.iter().next().is_some() => {
                Resolution::Resolved(name.to_string())
            }
            Ok(Ok(_)) => {
                trace!("{} @{}: empty answer", name, self.address);
                Resolution::Unresolved
            }
            Ok(Err(e)) => {
                trace!("{} @{}: {}", name, self.address, e);
                Resolution::Unresolved
            }
            Err(_) => {
                trace!("{} @{}: timed out", name, self.address);
                Resolution::Unresolved
            }
        }
    }
}

/// 用指定的DNS服务器查询一次A记录
pub async fn query_a(name: &str, resolver: &str, query_timeout: Duration) -> Resolution {
    Nameserver::new(resolver, query_timeout).lookup_a(name).await
}

/// 按顺序尝试每个DNS服务器，第一个成功即返回
pub async fn resolve_with_fallback(candidate: String, nameservers: &[Nameserver]) -> Resolution {
    for nameserver in nameservers {
        if nameserver.lookup_a(&candidate).await.is_resolved() {
            return Resolution::Resolved(candidate);
        }
    }
    Resolution::Unresolved
}

/// 子域名批量解析器
pub struct DnsResolver {
    nameservers: Arc<Vec<Nameserver>>,
    pool: WorkerPool,
}

impl DnsResolver {
    /// 创建解析器，`resolvers` 为空时使用默认的两个公共DNS
    pub fn new(resolvers: &[String], concurrency: usize, query_timeout: Duration) -> Self {
        let nameservers: Vec<Nameserver> = if resolvers.is_empty() {
            DEFAULT_RESOLVERS
                .iter()
                .map(|r| Nameserver::new(r, query_timeout))
                .collect()
        } else {
            resolvers
                .iter()
                .map(|r| Nameserver::new(r, query_timeout))
                .collect()
        };

        DnsResolver {
            nameservers: Arc::new(nameservers),
            pool: WorkerPool::new(concurrency),
        }
    }

    /// 实际使用的DNS服务器，按尝试顺序排列
    pub fn resolvers(&self) -> Vec<String> {
        self.nameservers
            .iter()
            .map(|n| n.address().to_string())
            .collect()
    }

    /// 并发解析所有候选域名，返回解析成功的子集
    pub async fn resolve_all(&self, candidates: Vec<String>) -> Vec<String> {
        info!("Total subdomains to resolve: {}", candidates.len());
        info!("Resolving subdomains.....");

        let nameservers = Arc::clone(&self.nameservers);
        let resolved = self
            .pool
            .run(candidates, ProgressKind::Subdomains, move |candidate| {
                let nameservers = Arc::clone(&nameservers);
                async move { resolve_with_fallback(candidate, &nameservers).await }
            })
            .await;

        info!("Total successfully resolved subdomains: {}", resolved.len());
        resolved
    }
}

impl Default for DnsResolver {
    fn default() -> Self {
        Self::new(&[], DEFAULT_CONCURRENCY, DEFAULT_QUERY_TIMEOUT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_nameserver() {
        assert_eq!(
            parse_nameserver("8.8.8.8"),
            Some("8.8.8.8:53".parse().unwrap())
        );
        assert_eq!(
            parse_nameserver(" 1.1.1.1:5353 "),
            Some("1.1.1.1:5353".parse().unwrap())
        );
        assert_eq!(
            parse_nameserver("2606:4700::1111"),
            Some("[2606:4700::1111]:53".parse().unwrap())
        );
        assert_eq!(parse_nameserver("[::1]:53"), Some("[::1]:53".parse().unwrap()));
        assert_eq!(parse_nameserver("dns.google"), None);
        assert_eq!(parse_nameserver(""), None);
    }

    #[test]
    fn test_resolution_helpers() {
        let resolved = Resolution::Resolved("www.example.com".to_string());
        assert!(resolved.is_resolved());
        assert_eq!(resolved.into_name(), Some("www.example.com".to_string()));
        assert!(!Resolution::Unresolved.is_resolved());
        assert_eq!(Resolution::Unresolved.into_name(), None);
    }

    #[tokio::test]
    async fn test_invalid_resolver_is_unresolved() {
        let outcome = query_a("www.example.com", "not-an-ip", Duration::from_secs(1)).await;
        assert_eq!(outcome, Resolution::Unresolved);
    }

    #[tokio::test]
    async fn test_fallback_exhausts_bad_resolvers() {
        let nameservers = vec![
            Nameserver::new("bogus", Duration::from_secs(1)),
            Nameserver::new("also-bogus", Duration::from_secs(1)),
        ];
        let outcome = resolve_with_fallback("www.example.com".to_string(), &nameservers).await;
        assert_eq!(outcome, Resolution::Unresolved);
    }

    #[tokio::test]
    async fn test_default_resolvers_when_empty() {
        let resolver = DnsResolver::new(&[], 10, Duration::from_secs(1));
        assert_eq!(resolver.resolvers(), vec!["8.8.8.8", "1.1.1.1"]);

        let custom = DnsResolver::new(&["9.9.9.9".to_string()], 10, Duration::from_secs(1));
        assert_eq!(custom.resolvers(), vec!["9.9.9.9"]);
    }

    #[tokio::test]
    async fn test_resolve_all_with_unusable_resolvers() {
        let resolver = DnsResolver::new(&["nope".to_string()], 4, Duration::from_secs(1));
        let resolved = resolver
            .resolve_all(vec![
                "a.example.com".to_string(),
                "b.example.com".to_string(),
            ])
            .await;
        assert!(resolved.is_empty());
    }
}
