//! 分段：资源字节空间的一个连续切片。各段按 `index` 升序，互不重叠，
//! 且并集恰好覆盖 `[0, size-1]`。

use std::path::{Path, PathBuf};

/// 单个分段：0 起始的序号与闭区间字节范围。
///
/// `index` 决定合并时的输出顺序；`start`/`end` 均为含端点偏移，
/// `start[i] = end[i-1] + 1`，最后一段 `end = size - 1`。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// 分段序号（0 起始，决定合并顺序）
    pub index: usize,
    /// 起始偏移（含）
    pub start: u64,
    /// 结束偏移（含）
    pub end: u64,
}

impl Segment {
    /// 本段的字节数。
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// 生成 Range 请求头值：`bytes={start+resumed}-{end}`，两端都含。
    ///
    /// `resumed` 是分段存储中已有的字节数，续传时从其后继续请求。
    pub fn range_header(&self, resumed: u64) -> String {
        format!("bytes={}-{}", self.start + resumed, self.end)
    }

    /// 本段分段存储的文件名（由序号确定性推导）。
    pub fn store_file_name(&self) -> String {
        format!("section-{}.part", self.index)
    }

    /// 本段分段存储在临时目录下的完整路径。
    pub fn store_path(&self, temp_dir: &Path) -> PathBuf {
        temp_dir.join(self.store_file_name())
    }
}
