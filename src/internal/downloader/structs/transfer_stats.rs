//! 传输统计：响应式状态，由聚合器在每个进度事件后刷新整份快照。

use std::time::Duration;

/// 速率与剩余时间的最小耗时门槛；运行刚开始时耗时趋近 0，
/// 直接相除会得到无意义的巨大速率，低于门槛一律不计算。
pub const MIN_RATE_ELAPSED: Duration = Duration::from_millis(200);

/// 一次运行的传输统计快照。
///
/// 通过下载器的 `progress()` 读取或监听；速率与剩余时间由
/// [`TransferStats::rate_bps`] / [`TransferStats::eta`] 按需推导。
#[derive(Debug, Clone, Default)]
pub struct TransferStats {
    /// 已落盘的字节数（含续传存量）
    pub bytes_done: u64,
    /// 资源总大小（字节），来自探测阶段
    pub total: u64,
    /// 自运行开始的耗时
    pub elapsed: Duration,
}

impl TransferStats {
    /// 完成百分比（0～100）；总大小为 0 时返回 `f64::NAN`。
    pub fn pct(&self) -> f64 {
        if self.total > 0 {
            (self.bytes_done as f64 / self.total as f64) * 100.0
        } else {
            f64::NAN
        }
    }

    /// 平均速率（字节/秒）；耗时未过门槛时返回 `None`。
    pub fn rate_bps(&self) -> Option<f64> {
        if self.elapsed < MIN_RATE_ELAPSED {
            return None;
        }
        Some(self.bytes_done as f64 / self.elapsed.as_secs_f64())
    }

    /// 预计剩余时间；速率不可用或为 0 时返回 `None`。
    pub fn eta(&self) -> Option<Duration> {
        let rate = self.rate_bps()?;
        if rate <= 0.0 {
            return None;
        }
        let remaining = self.total.saturating_sub(self.bytes_done) as f64;
        Some(Duration::from_secs_f64(remaining / rate))
    }
}
