//! 本次下载的配置。

use std::path::PathBuf;
use std::time::Duration;

use crate::internal::client::structs::fetch_client::{
    DEFAULT_CONNECT_TIMEOUT, DEFAULT_READ_TIMEOUT, DEFAULT_USER_AGENT,
};

/// 探测请求的整体超时；HEAD 没有响应体，整体限时即可。
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// 分段下载配置；默认值可全部通过下载器的链式方法覆盖。
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// 保存路径；未设置时落到用户下载目录下的资源名
    pub save_path: Option<PathBuf>,
    /// 分段数；未设置时用可用并行度
    pub sections: Option<usize>,
    /// 临时目录；未设置时用 `{目标路径}.parts`
    pub temp_dir: Option<PathBuf>,
    /// 两类请求共用的客户端标识头
    pub user_agent: String,
    /// 连接超时
    pub connect_timeout: Duration,
    /// 读超时：两次读到数据的最大间隔，防止挂死的连接拖住整个运行
    pub read_timeout: Duration,
    /// 探测请求整体超时
    pub probe_timeout: Duration,
    /// 是否在 stderr 输出单行覆写的状态行
    pub status_line: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            save_path: None,
            sections: None,
            temp_dir: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            status_line: false,
        }
    }
}
