//! 取消句柄：外部请求中止本次下载。
//!
//! 所有在途分段任务在块与块之间检查该标志并尽快退出；
//! 已落盘的分段存储保留，下次运行据此续传。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 可克隆的取消句柄；所有克隆共享同一个标志。
#[derive(Clone, Debug, Default)]
pub struct CancelHandle {
    flag: Arc<AtomicBool>,
}

impl CancelHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 请求取消；幂等，可从任意线程调用。
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    /// 是否已请求取消。
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}
