//! 下载相关错误类型。
//!
//! 分层对应运行的各阶段：探测、分段传输、合并各自一个错误枚举，
//! 顶层 [`DownloadError`] 是 `send` 的最终错误。分段失败不会被吞掉——
//! 所有分段结果收齐后，任何失败都会以 [`DownloadError::SegmentsFailed`]
//! 携带具体分段序号上报，合并不会执行。

use std::fmt;
use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// 大小探测阶段的错误；探测失败即中止整个运行，不做重试。
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("探测响应状态异常: {0}")]
    BadStatus(StatusCode),

    #[error("响应缺少 Content-Length 头")]
    MissingLength,

    #[error("Content-Length 无法解析: {0}")]
    InvalidLength(String),
}

/// 单个分段传输的错误。
#[derive(Debug, Error)]
pub enum SegmentError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("分段响应状态异常: {0}")]
    BadStatus(StatusCode),

    /// 服务器返回了 200 而非 206：Range 被忽略，继续写会把整个资源
    /// 塞进本段存储。
    #[error("服务器忽略了 Range 请求（返回 {0}）")]
    RangeIgnored(StatusCode),

    #[error("打开分段存储失败: {0}")]
    OpenStore(std::io::Error),

    #[error("读取分段存储大小失败: {0}")]
    StatStore(std::io::Error),

    #[error("回截分段存储失败: {0}")]
    TruncateStore(std::io::Error),

    #[error("写入分段存储失败: {0}")]
    WriteStore(std::io::Error),

    #[error("刷新分段存储失败: {0}")]
    FlushStore(std::io::Error),

    #[error("下载被取消")]
    Cancelled,
}

/// 单个分段的失败记录：序号 + 原因。
#[derive(Debug)]
pub struct SegmentFailure {
    /// 失败分段的序号（0 起始）
    pub index: usize,
    /// 失败原因
    pub error: SegmentError,
}

impl fmt::Display for SegmentFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "分段 {}: {}", self.index, self.error)
    }
}

/// 合并阶段的错误；合并失败保留临时目录，便于排查或续传。
#[derive(Debug, Error)]
pub enum MergeError {
    /// 目标文件已存在且非空。在陈旧目标上追加会产生损坏输出，
    /// 必须由调用方先处理旧文件。
    #[error("目标文件已存在且非空，拒绝写入: {0}")]
    TargetNotFresh(PathBuf),

    #[error("创建目标文件失败: {0}")]
    CreateTarget(std::io::Error),

    #[error("分段存储缺失: {0}")]
    MissingStore(PathBuf),

    /// 存储长度与规划的分段长度不一致，说明该段并未完整落盘。
    #[error("分段 {index} 存储不完整: 预期 {expected} 字节，实际 {actual} 字节")]
    StoreIncomplete {
        index: usize,
        expected: u64,
        actual: u64,
    },

    #[error("读取分段存储失败: {0}")]
    ReadStore(std::io::Error),

    #[error("写入目标文件失败: {0}")]
    WriteTarget(std::io::Error),

    #[error("刷新目标文件失败: {0}")]
    FlushTarget(std::io::Error),
}

/// 一次分段下载的顶层错误。
#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("资源 URL 无效: {0}")]
    InvalidUrl(String),

    #[error("分段数必须大于 0")]
    InvalidSectionCount,

    #[error("构建 HTTP 客户端失败: {0}")]
    BuildClient(String),

    #[error("探测资源大小失败: {0}")]
    Probe(#[from] ProbeError),

    #[error("创建临时目录失败: {0}")]
    CreateTempDir(std::io::Error),

    /// 一个或多个分段传输失败；合并未执行，分段存储保留在临时目录中。
    #[error("部分分段下载失败: {}", format_segment_failures(.0))]
    SegmentsFailed(Vec<SegmentFailure>),

    #[error("下载被取消")]
    Cancelled,

    #[error("合并分段失败: {0}")]
    Merge(#[from] MergeError),

    #[error("分段任务失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

fn format_segment_failures(failures: &[SegmentFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
