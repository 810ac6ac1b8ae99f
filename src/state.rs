//! 并发阶段的进度汇总
//!
//! 健康检查和子域名解析两个阶段共用 [`ProgressState`]：每个任务完成后自行上报结果，
//! 计数器用原子量累加，成功结果收集在互斥锁保护的列表里。进度按完成顺序输出，
//! 每完成 [`PROGRESS_INTERVAL`] 个或最后一个任务时打印一行。

use std::mem;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use log::info;

use crate::dns_resolver::Resolution;

/// 进度输出间隔
pub const PROGRESS_INTERVAL: usize = 1000;

/// 当前阶段处理的对象，决定进度行的格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressKind {
    Resolvers,
    Subdomains,
}

/// 一批任务的进度状态
#[derive(Debug)]
pub struct ProgressState {
    kind: ProgressKind,
    total: usize,
    checked: AtomicUsize,
    succeeded: AtomicUsize,
    results: Mutex<Vec<String>>,
}

impl ProgressState {
    pub fn new(kind: ProgressKind, total: usize) -> Self {
        ProgressState {
            kind,
            total,
            checked: AtomicUsize::new(0),
            succeeded: AtomicUsize::new(0),
            results: Mutex::new(Vec::new()),
        }
    }

    /// 记录一个任务的结果，返回它的完成序号（从 1 开始）
    pub fn record(&self, outcome: Resolution) -> usize {
        if let Resolution::Resolved(name) = outcome {
            self.results
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(name);
            self.succeeded.fetch_add(1, Ordering::SeqCst);
        }

        // 成功计数先于完成计数，最后一个任务读到的成功数一定是完整的
        let index = self.checked.fetch_add(1, Ordering::SeqCst) + 1;
        if should_report(index, self.total) {
            self.report(index, self.succeeded.load(Ordering::SeqCst));
        }
        index
    }

    pub fn checked(&self) -> usize {
        self.checked.load(Ordering::SeqCst)
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded.load(Ordering::SeqCst)
    }

    /// 取出已收集的成功结果
    pub fn take_results(&self) -> Vec<String> {
        let mut results = self.results.lock().unwrap_or_else(PoisonError::into_inner);
        mem::take(&mut *results)
    }

    fn report(&self, index: usize, succeeded: usize) {
        match self.kind {
            ProgressKind::Resolvers => info!(
                "Checked {}/{} resolvers. Working so far: {}",
                index, self.total, succeeded
            ),
            ProgressKind::Subdomains => info!(
                "Progress: {}/{} subdomains resolved, Successful: {}",
                index, self.total, succeeded
            ),
        }
    }
}

/// 第 `index` 个完成的任务是否需要输出进度
pub fn should_report(index: usize, total: usize) -> bool {
    index % PROGRESS_INTERVAL == 0 || index == total
}
