//! 下载目标资源：URL 与由其推导的输出文件名。
//!
//! 资源在一次运行开始时创建一次，之后不再变更；总大小由探测阶段发现，
//! 沿运行流程只读传递，不回写到本结构体。

use percent_encoding::percent_decode_str;
use url::Url;

use crate::internal::downloader::structs::split_downloader::SplitDownloader;

/// URL 推导不出文件名时的兜底名。
const FALLBACK_NAME: &str = "download.bin";

/// 待下载的单个 HTTP 资源。
#[derive(Debug, Clone)]
pub struct Resource {
    /// 资源完整 URL
    pub url: Url,
    /// 输出文件名（URL 路径末段，已做百分号解码）
    pub name: String,
}

impl Resource {
    /// 从字符串解析资源；仅接受 http/https。
    pub fn parse(url: &str) -> Result<Self, String> {
        if url.is_empty() {
            return Err("URL 为空".to_string());
        }

        let url = Url::parse(url).map_err(|e| e.to_string())?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(format!("仅支持 http/https，当前为 {}", url.scheme()));
        }

        let name = file_name_from_url(&url);
        Ok(Self { url, name })
    }

    /// 创建专属于本资源的分段下载器；可链式配置后调用 `send` 执行下载。
    pub fn build_downloader(&self) -> SplitDownloader {
        SplitDownloader::new(self.clone())
    }
}

/// 取 URL 路径的最后一个非空段作为文件名；无路径或解码失败时用兜底名。
fn file_name_from_url(url: &Url) -> String {
    let last = url
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|s| !s.is_empty());

    match last {
        Some(seg) => percent_decode_str(seg)
            .decode_utf8()
            .map(|s| s.to_string())
            .unwrap_or_else(|_| FALLBACK_NAME.to_string()),
        None => FALLBACK_NAME.to_string(),
    }
}
