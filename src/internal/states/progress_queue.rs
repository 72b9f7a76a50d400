//! # ProgressQueue — 进度事件队列
//!
//! 基于 tokio::sync::mpsc 的单向字节计数队列：每个分段任务持有一个生产者克隆，
//! 每落盘一块数据就推送一个字节数；聚合器是唯一消费者。
//!
//! ## 特性
//! - 无锁（mpsc::unbounded_channel），严格 FIFO
//! - 生产者可多个（Clone），消费者只有一个
//! - **关闭即终止信号**：所有生产者 drop 后，`recv` 返回 `None`，
//!   聚合器以此判定全部分段任务已结束
//!
//! 事件不携带分段归属——聚合器只需要累计总量，不关心来源。

use tokio::sync::mpsc;

/// 进度事件队列（生产者端）。
///
/// 每个分段任务各持有一个克隆；推送的值是「本次新落盘的字节数」。
#[derive(Clone, Debug)]
pub(crate) struct ProgressQueue {
    sender: mpsc::UnboundedSender<u64>,
}

/// 进度事件消费者。
///
/// 不可 Clone，只能有一个；按 FIFO 顺序消费事件。
#[derive(Debug)]
pub(crate) struct ProgressConsumer {
    receiver: mpsc::UnboundedReceiver<u64>,
}

/// 创建一对（生产者, 消费者）。
pub(crate) fn progress_channel() -> (ProgressQueue, ProgressConsumer) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ProgressQueue { sender }, ProgressConsumer { receiver })
}

impl ProgressQueue {
    /// 推送一个字节计数，立即返回。
    ///
    /// 消费者先退出时事件被丢弃——进度是观测面，不影响下载本身。
    pub(crate) fn send(&self, bytes: u64) {
        let _ = self.sender.send(bytes);
    }
}

impl ProgressConsumer {
    /// 异步接收下一个事件；队列为空则挂起等待。
    ///
    /// 所有生产者 drop 后返回 `None`。
    pub(crate) async fn recv(&mut self) -> Option<u64> {
        self.receiver.recv().await
    }
}
