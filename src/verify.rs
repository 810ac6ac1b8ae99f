use std::sync::Arc;
use std::time::Duration;

use log::info;

use crate::api::{CANARY_DOMAIN, DEFAULT_CONCURRENCY, DEFAULT_QUERY_TIMEOUT};
use crate::dns_resolver::{query_a, Resolution};
use crate::pool::WorkerPool;
use crate::state::ProgressKind;

/// DNS服务器可用性检测器
///
/// 用每个DNS服务器单独查询一次探测域名的A记录，能在超时内返回结果的才算可用。
#[derive(Debug, Clone)]
pub struct ResolverVerifier {
    canary_domain: String,
    query_timeout: Duration,
    pool: WorkerPool,
}

impl ResolverVerifier {
    pub fn new(canary_domain: impl Into<String>, concurrency: usize, query_timeout: Duration) -> Self {
        ResolverVerifier {
            canary_domain: canary_domain.into(),
            query_timeout,
            pool: WorkerPool::new(concurrency),
        }
    }

    pub fn canary_domain(&self) -> &str {
        &self.canary_domain
    }

    /// 检测单个DNS服务器
    pub async fn verify_resolver(&self, resolver: String) -> Resolution {
        test_resolver(resolver, &self.canary_domain, self.query_timeout).await
    }

    /// 批量检测，返回可用的DNS服务器（按完成顺序）
    pub async fn check_resolvers(&self, resolvers: Vec<String>) -> Vec<String> {
        info!("Total resolvers to test: {}", resolvers.len());
        info!("Identifying functional resolvers...");

        let canary = Arc::new(self.canary_domain.clone());
        let query_timeout = self.query_timeout;
        self.pool
            .run(resolvers, ProgressKind::Resolvers, move |resolver| {
                let canary = Arc::clone(&canary);
                async move { test_resolver(resolver, &canary, query_timeout).await }
            })
            .await
    }
}

impl Default for ResolverVerifier {
    fn default() -> Self {
        Self::new(CANARY_DOMAIN, DEFAULT_CONCURRENCY, DEFAULT_QUERY_TIMEOUT)
    }
}

async fn test_resolver(resolver: String, canary: &str, query_timeout: Duration) -> Resolution {
    match query_a(canary, &resolver, query_timeout).await {
        Resolution::Resolved(_) => Resolution::Resolved(resolver),
        Resolution::Unresolved => Resolution::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_verifier() {
        let verifier = ResolverVerifier::default();
        assert_eq!(verifier.canary_domain(), "google.com");
    }

    #[tokio::test]
    async fn test_malformed_resolvers_are_discarded() {
        let verifier = ResolverVerifier::new("google.com", 8, Duration::from_secs(1));
        let working = verifier
            .check_resolvers(vec![
                "999.1.1.1".to_string(),
                "resolver.local".to_string(),
                String::new(),
            ])
            .await;
        assert!(working.is_empty());

        let single = verifier.verify_resolver("256.0.0.1".to_string()).await;
        assert_eq!(single, Resolution::Unresolved);
    }
}
