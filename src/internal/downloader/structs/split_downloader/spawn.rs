//! 分段任务的生成与汇合：一段一个任务，同时启动，逐个等待。

use std::path::Path;

use reqwest::Client;
use tokio::task::JoinHandle;

use crate::internal::downloader::structs::cancel_handle::CancelHandle;
use crate::internal::resource::structs::segment::Segment;
use crate::internal::states::progress_queue::ProgressQueue;

use super::super::download_error::{DownloadError, SegmentError, SegmentFailure};
use super::segment_task::{download_segment, SegmentTaskParams};

/// 单个分段任务句柄：(分段序号, JoinHandle)。
pub(crate) type SegmentTaskHandle = (usize, JoinHandle<Result<(), SegmentError>>);

/// 生成分段任务时的参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct SpawnSegmentTasksParams<'a> {
    pub client: &'a Client,
    pub url: &'a str,
    pub segments: &'a [Segment],
    pub temp_dir: &'a Path,
    pub progress: &'a ProgressQueue,
    pub cancelled: &'a CancelHandle,
}

/// 为每个分段 spawn 一个下载任务，全部同时启动，返回任务句柄列表。
pub(crate) fn spawn_segment_tasks(
    params: SpawnSegmentTasksParams<'_>,
) -> Vec<SegmentTaskHandle> {
    params
        .segments
        .iter()
        .map(|segment| {
            let task_params = SegmentTaskParams {
                client: params.client.clone(),
                url: params.url.to_string(),
                segment: *segment,
                store_path: segment.store_path(params.temp_dir),
                progress: params.progress.clone(),
                cancelled: params.cancelled.clone(),
            };
            (segment.index, tokio::spawn(download_segment(task_params)))
        })
        .collect()
}

/// 等待全部分段任务完成并收集各段失败。
///
/// 不因个别失败提前返回——兄弟任务继续跑完，失败逐段记录；
/// 调用方据此决定是否合并（有任何失败则不合并）。
pub(crate) async fn join_segment_tasks(
    handles: Vec<SegmentTaskHandle>,
) -> Result<Vec<SegmentFailure>, DownloadError> {
    let mut failures = Vec::new();
    for (index, handle) in handles {
        match handle.await {
            Ok(Ok(())) => {}
            Ok(Err(error)) => failures.push(SegmentFailure { index, error }),
            Err(join_err) => return Err(DownloadError::TaskJoin(join_err)),
        }
    }
    Ok(failures)
}
