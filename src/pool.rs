//! 有界并发任务池
//!
//! 信号量限制同时在途的任务数，任务放进 `JoinSet`，结果由任务自己上报给
//! [`ProgressState`]。池子被丢弃时（例如收到中断信号）未完成的任务会一起被取消。

use std::future::Future;
use std::sync::Arc;

use log::warn;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};

use crate::dns_resolver::Resolution;
use crate::state::{ProgressKind, ProgressState};

#[derive(Debug, Clone)]
pub struct WorkerPool {
    limit: usize,
}

impl WorkerPool {
    /// 创建任务池，并发上限至少为 1
    pub fn new(limit: usize) -> Self {
        WorkerPool {
            limit: limit.max(1),
        }
    }

    /// 对每个任务执行 `work`，返回所有成功的结果（按完成顺序）
    ///
    /// 单个任务失败或崩溃都只算作一次未解析，整批任务总会执行完。
    pub async fn run<F, Fut>(&self, jobs: Vec<String>, kind: ProgressKind, work: F) -> Vec<String>
    where
        F: Fn(String) -> Fut,
        Fut: Future<Output = Resolution> + Send + 'static,
    {
        let progress = Arc::new(ProgressState::new(kind, jobs.len()));
        let semaphore = Arc::new(Semaphore::new(self.limit));
        let mut tasks = JoinSet::new();

        for job in jobs {
            let permit = match Arc::clone(&semaphore).acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };
            let unit = work(job);
            let task_progress = Arc::clone(&progress);
            tasks.spawn(async move {
                let outcome = unit.await;
                drop(permit);
                task_progress.record(outcome);
            });
            // 已完成的任务及时回收，JoinSet 的大小不随任务总数增长
            reap_finished(&mut tasks, &progress);
        }

        while let Some(joined) = tasks.join_next().await {
            settle(joined, &progress);
        }

        progress.take_results()
    }
}

/// 回收已经结束的任务，返回回收的数量
fn reap_finished(tasks: &mut JoinSet<()>, progress: &ProgressState) -> usize {
    let mut reaped = 0;
    while let Some(joined) = tasks.try_join_next() {
        settle(joined, progress);
        reaped += 1;
    }
    reaped
}

/// 崩溃或被取消的任务没有上报过结果，补记一次失败
fn settle(joined: Result<(), JoinError>, progress: &ProgressState) {
    if let Err(e) = joined {
        warn!("worker task failed: {}", e);
        progress.record(Resolution::Unresolved);
    }
}
