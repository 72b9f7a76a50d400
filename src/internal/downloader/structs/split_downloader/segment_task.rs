//! 分段任务：续传检查、Range 请求、流式写入分段存储、逐块上报进度。

use std::path::PathBuf;

use futures_util::StreamExt;
use reqwest::header::RANGE;
use reqwest::{Client, StatusCode};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::internal::downloader::structs::cancel_handle::CancelHandle;
use crate::internal::resource::structs::segment::Segment;
use crate::internal::states::progress_queue::ProgressQueue;

use super::super::download_error::SegmentError;

/// 执行单个分段任务时的参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct SegmentTaskParams {
    pub client: Client,
    pub url: String,
    pub segment: Segment,
    pub store_path: PathBuf,
    pub progress: ProgressQueue,
    pub cancelled: CancelHandle,
}

/// 下载一个分段到其分段存储。
///
/// 以追加模式打开存储（不存在则创建），文件长度即已有进度：
/// 先把存量上报给聚合器，再只请求 `[start+存量, end]` 的剩余区间。
/// 存量已覆盖全段时不发请求直接结束；存量超出段长说明存储已损坏，
/// 清空重下。只改写自己的存储，不触碰任何兄弟分段的文件。
pub(crate) async fn download_segment(
    params: SegmentTaskParams,
) -> Result<(), SegmentError> {
    if params.cancelled.is_cancelled() {
        return Err(SegmentError::Cancelled);
    }

    let mut store = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&params.store_path)
        .await
        .map_err(SegmentError::OpenStore)?;

    let mut already = store
        .metadata()
        .await
        .map_err(SegmentError::StatStore)?
        .len();

    if already > params.segment.len() {
        store
            .set_len(0)
            .await
            .map_err(SegmentError::TruncateStore)?;
        already = 0;
    }

    // 存量先入账，聚合器才能把续传部分计入总进度
    params.progress.send(already);

    if already == params.segment.len() {
        return Ok(()); // 上次运行已把本段完整落盘
    }

    let resp = params
        .client
        .get(&params.url)
        .header(RANGE, params.segment.range_header(already))
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(SegmentError::BadStatus(status));
    }
    if status != StatusCode::PARTIAL_CONTENT {
        return Err(SegmentError::RangeIgnored(status));
    }

    let mut stream = resp.bytes_stream();
    while let Some(chunk_result) = stream.next().await {
        if params.cancelled.is_cancelled() {
            return Err(SegmentError::Cancelled);
        }

        let chunk = chunk_result.map_err(SegmentError::Request)?;
        write_one_chunk(&mut store, &chunk, &params.progress).await?;
    }

    store.flush().await.map_err(SegmentError::FlushStore)?;
    Ok(())
}

/// 将一块数据追加到分段存储并上报其字节数。
async fn write_one_chunk(
    store: &mut File,
    chunk: &bytes::Bytes,
    progress: &ProgressQueue,
) -> Result<(), SegmentError> {
    store
        .write_all(chunk)
        .await
        .map_err(SegmentError::WriteStore)?;
    progress.send(chunk.len() as u64);
    Ok(())
}
