//! 分段下载器
//!
//! 本模块实现单个 HTTP 资源的分段并发下载：探测总大小、规划字节区间、
//! 一段一个任务并发拉取、聚合进度、按序合并、清理临时存储。
//!
//! ## 功能特性
//!
//! - **分段并发**：通过 HTTP Range 请求把资源切成连续区间同时下载
//! - **断点续传**：每段有独立的分段存储文件，重跑时只请求缺失的尾部
//! - **响应式进度**：通过 `progress()` 获取可监听的传输统计状态
//! - **失败不吞**：任何一段失败都会带着分段序号上报，合并不会执行
//! - **可取消**：`cancel_handle()` 可让所有在途任务在块间尽快退出
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use split_fetch::resource::Resource;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let resource = Resource::parse("https://example.com/big.zip")?;
//!
//! // 按可用并行度分段下载到指定路径
//! let report = resource
//!     .build_downloader()
//!     .save_to("big.zip")
//!     .send()
//!     .await?;
//!
//! // 指定 8 段并打开状态行
//! let report = resource
//!     .build_downloader()
//!     .save_to("big.zip")
//!     .sections(8)
//!     .status_line()
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## 运行流程
//!
//! 探测 → 规划 → 建临时目录 → 任务扇出（同时启动聚合器）→ 全部汇合 →
//! 进度队列关闭 → 全部成功才合并 → 清理临时目录 → 返回 [`RunReport`]。
//! 探测失败发生在建临时目录之前，不会留下任何磁盘痕迹；分段失败或
//! 取消时临时目录保留，下次运行续传。清理失败不作为错误——输出文件
//! 此时已经完整，报告里的 `partials_removed` 会是 `false`。
//!
//! ## 内部实现说明
//!
//! - `probe` / `plan`：大小探测与区间规划
//! - `segment_task` / `spawn`：单段传输与任务扇出、汇合
//! - `progress`：进度聚合任务
//! - `merge`：按序合并

mod merge;
mod plan;
mod probe;
mod progress;
mod segment_task;
mod spawn;

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::internal::client::structs::fetch_client::build_client;
use crate::internal::report::console::spawn_status_line;
use crate::internal::resource::structs::resource::Resource;
use crate::internal::states::progress_queue::progress_channel;
use crate::internal::states::reactive_cell::ReactiveCell;

use super::cancel_handle::CancelHandle;
use super::download_config::DownloadConfig;
use super::download_error::DownloadError;
use super::run_report::RunReport;
use super::transfer_stats::TransferStats;

pub(crate) use merge::merge_segments;
pub(crate) use plan::plan_segments;
pub(crate) use probe::probe_size;
pub(crate) use progress::spawn_aggregator;
pub(crate) use segment_task::{download_segment, SegmentTaskParams};
pub(crate) use spawn::{
    join_segment_tasks, spawn_segment_tasks, SpawnSegmentTasksParams,
};

/// 分段下载器
///
/// 拥有响应式统计状态（通过 `progress()` 获取）：已落盘字节数、总大小、
/// 耗时；速率/百分比/剩余时间由快照按需推导。
pub struct SplitDownloader {
    pub(crate) resource: Resource,
    pub(crate) config: DownloadConfig,
    pub(crate) stats_state: ReactiveCell<TransferStats>,
    pub(crate) cancelled: CancelHandle,
}

impl SplitDownloader {
    /// 由资源创建其专属下载器（供 [`Resource::build_downloader`] 使用）。
    pub(crate) fn new(resource: Resource) -> Self {
        Self {
            resource,
            config: DownloadConfig::default(),
            stats_state: ReactiveCell::new(TransferStats::default()),
            cancelled: CancelHandle::new(),
        }
    }

    /// 设置保存路径；传入已存在的目录时在其下用资源名落盘。
    /// 不调用则落到用户下载目录。
    pub fn save_to(mut self, path: impl AsRef<Path>) -> Self {
        let p = path.as_ref();
        self.config.save_path = if p.as_os_str().is_empty() {
            None
        } else {
            Some(p.to_path_buf())
        };
        self
    }

    /// 设置分段数（也是并发任务数）；不调用则用可用并行度。
    pub fn sections(mut self, n: usize) -> Self {
        self.config.sections = Some(n);
        self
    }

    /// 覆盖临时目录；不调用则用 `{目标路径}.parts`。
    pub fn temp_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.config.temp_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// 覆盖客户端标识头。
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config.user_agent = ua.into();
        self
    }

    /// 覆盖连接超时。
    pub fn connect_timeout(mut self, d: Duration) -> Self {
        self.config.connect_timeout = d;
        self
    }

    /// 覆盖读超时（两次读到数据的最大间隔）。
    pub fn read_timeout(mut self, d: Duration) -> Self {
        self.config.read_timeout = d;
        self
    }

    /// 覆盖探测请求的整体超时。
    pub fn probe_timeout(mut self, d: Duration) -> Self {
        self.config.probe_timeout = d;
        self
    }

    /// 开启单行覆写的控制台状态行（输出到 stderr）。
    pub fn status_line(mut self) -> Self {
        self.config.status_line = true;
        self
    }

    /// 内置的传输统计状态；返回可共享句柄，`.watch()` 后
    /// `changed().await` 监听进度。
    pub fn progress(&self) -> ReactiveCell<TransferStats> {
        self.stats_state.clone()
    }

    /// 取消句柄；在 `send` 之前克隆保存，之后任意时刻调用 `cancel()`。
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancelled.clone()
    }

    /// 执行下载；全部分段成功并合并完成后返回 [`RunReport`]。
    pub async fn send(self) -> Result<RunReport, DownloadError> {
        let console = if self.config.status_line {
            Some(spawn_status_line(self.stats_state.clone()))
        } else {
            None
        };

        let result = self.run().await;

        if let Some(handle) = console {
            handle.abort();
            let _ = handle.await;
            eprintln!();
        }

        result
    }

    async fn run(self) -> Result<RunReport, DownloadError> {
        let started = Instant::now();

        let requested_sections = match self.config.sections {
            Some(0) => return Err(DownloadError::InvalidSectionCount),
            Some(n) => n,
            None => default_parallelism(),
        };

        let client = build_client(
            &self.config.user_agent,
            self.config.connect_timeout,
            self.config.read_timeout,
        )
        .map_err(DownloadError::BuildClient)?;

        // 探测失败直接返回；此时临时目录尚未创建
        let total =
            probe_size(&client, &self.resource.url, self.config.probe_timeout)
                .await?;

        let segments = plan_segments(total, requested_sections);
        let target = self.target_path();
        let temp_dir = self.temp_dir_path(&target);

        tokio::fs::create_dir_all(&temp_dir)
            .await
            .map_err(DownloadError::CreateTempDir)?;

        self.stats_state.update(TransferStats {
            bytes_done: 0,
            total,
            elapsed: Duration::ZERO,
        });

        let (queue, consumer) = progress_channel();
        let aggregator =
            spawn_aggregator(consumer, total, started, self.stats_state.clone());

        let handles = spawn_segment_tasks(SpawnSegmentTasksParams {
            client: &client,
            url: self.resource.url.as_str(),
            segments: &segments,
            temp_dir: &temp_dir,
            progress: &queue,
            cancelled: &self.cancelled,
        });
        // 只留任务内的生产者克隆；全部任务返回后队列随之关闭
        drop(queue);

        let failures = join_segment_tasks(handles).await?;

        // 队列已关，聚合器此刻必然收尾
        let _bytes_seen = aggregator.await?;

        if self.cancelled.is_cancelled() {
            return Err(DownloadError::Cancelled);
        }
        if !failures.is_empty() {
            return Err(DownloadError::SegmentsFailed(failures));
        }

        merge_segments(&segments, &temp_dir, &target).await?;

        // 清理失败不致命：输出文件已完整，只在报告中如实记录
        let partials_removed =
            tokio::fs::remove_dir_all(&temp_dir).await.is_ok();

        Ok(RunReport {
            target,
            total_bytes: total,
            sections: segments.len(),
            elapsed: started.elapsed(),
            partials_removed,
        })
    }

    /// 解析输出路径：显式路径 > 显式目录 + 资源名 > 用户下载目录 + 资源名。
    fn target_path(&self) -> PathBuf {
        match &self.config.save_path {
            Some(p) if p.is_dir() => p.join(&self.resource.name),
            Some(p) => p.clone(),
            None => dirs::download_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(&self.resource.name),
        }
    }

    /// 解析临时目录：显式配置优先，否则挂在目标路径旁（`{目标}.parts`），
    /// 续传因此能跨进程重启存活。
    fn temp_dir_path(&self, target: &Path) -> PathBuf {
        match &self.config.temp_dir {
            Some(d) => d.clone(),
            None => {
                let mut os = target.as_os_str().to_os_string();
                os.push(".parts");
                PathBuf::from(os)
            }
        }
    }
}

/// 默认分段数：可用并行度，取不到时退到 4。
fn default_parallelism() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(4)
}
