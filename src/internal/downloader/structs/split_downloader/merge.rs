//! 合并：按分段序号升序把各分段存储拼接成目标文件。

use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::internal::resource::structs::segment::Segment;

use super::super::download_error::MergeError;

/// 合并全部分段存储到目标路径，返回写入的总字节数。
///
/// 只在每个分段都成功落盘后才会被调用；分段任务完成顺序任意，
/// 输出顺序只由 `index` 决定。目标已存在且非空时拒绝执行——在
/// 陈旧目标上追加会产生损坏输出；通过检查后以创建/截断方式打开。
/// 每个存储在拼接前校验长度与规划一致，不一致视为不完整。
pub(crate) async fn merge_segments(
    segments: &[Segment],
    temp_dir: &Path,
    target: &Path,
) -> Result<u64, MergeError> {
    if let Ok(meta) = tokio::fs::metadata(target).await {
        if meta.len() > 0 {
            return Err(MergeError::TargetNotFresh(target.to_path_buf()));
        }
    }

    let mut out = File::create(target)
        .await
        .map_err(MergeError::CreateTarget)?;
    let mut written: u64 = 0;

    for segment in segments {
        let store_path = segment.store_path(temp_dir);
        let meta = tokio::fs::metadata(&store_path)
            .await
            .map_err(|_| MergeError::MissingStore(store_path.clone()))?;
        if meta.len() != segment.len() {
            return Err(MergeError::StoreIncomplete {
                index: segment.index,
                expected: segment.len(),
                actual: meta.len(),
            });
        }

        let bytes = tokio::fs::read(&store_path)
            .await
            .map_err(MergeError::ReadStore)?;
        out.write_all(&bytes)
            .await
            .map_err(MergeError::WriteTarget)?;
        written += bytes.len() as u64;
    }

    out.flush().await.map_err(MergeError::FlushTarget)?;
    Ok(written)
}
