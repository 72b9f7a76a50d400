//! 控制台状态行：单行 `\r` 覆写的实时进度输出。
//!
//! 纯观测面，不参与任何控制流；没有历史日志，永远只有当前这一行。

use tokio::task::JoinHandle;

use crate::internal::downloader::structs::transfer_stats::TransferStats;
use crate::internal::states::reactive_cell::ReactiveCell;

use super::format::{format_bytes, format_duration};

/// 启动状态行任务：监听统计快照，每次变化覆写同一行到 stderr。
///
/// 任务随统计状态销毁自然结束；下载器在运行结束时也会主动 abort 它。
pub fn spawn_status_line(stats: ReactiveCell<TransferStats>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut watcher = stats.watch();
        while let Ok(s) = watcher.changed().await {
            eprint!("\r{}", render_status_line(&s));
        }
    })
}

/// 渲染一行状态：已下载/总量、百分比、速度、已用、剩余。
pub fn render_status_line(s: &TransferStats) -> String {
    let pct = if s.total > 0 { s.pct() } else { 100.0 };
    let rate = match s.rate_bps() {
        Some(r) => format!("{}/s", format_bytes(r as u64)),
        None => "--".to_string(),
    };
    let eta = match s.eta() {
        Some(d) => format_duration(d),
        None => "--:--:--".to_string(),
    };

    format!(
        "已下载 {}/{} ({:.2}%) | 速度 {} | 已用 {} | 剩余 {}",
        format_bytes(s.bytes_done),
        format_bytes(s.total),
        pct,
        rate,
        format_duration(s.elapsed),
        eta
    )
}
