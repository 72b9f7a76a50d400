//! 进度聚合：唯一消费者，累计所有分段任务上报的字节数并刷新统计快照。

use std::time::Instant;

use tokio::task::JoinHandle;

use crate::internal::downloader::structs::transfer_stats::TransferStats;
use crate::internal::states::progress_queue::ProgressConsumer;
use crate::internal::states::reactive_cell::ReactiveCell;

/// 启动聚合任务。
///
/// 逐事件累加运行总量，每个事件后整体刷新一次 [`TransferStats`]；
/// 队列关闭（全部生产者 drop，即全部分段任务返回）后结束，
/// 返回累计总字节数。事件不区分来源分段，聚合器只关心总和。
pub(crate) fn spawn_aggregator(
    mut consumer: ProgressConsumer,
    total: u64,
    started: Instant,
    stats: ReactiveCell<TransferStats>,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut bytes_done: u64 = 0;
        while let Some(n) = consumer.recv().await {
            bytes_done += n;
            stats.update(TransferStats {
                bytes_done,
                total,
                elapsed: started.elapsed(),
            });
        }
        bytes_done
    })
}
