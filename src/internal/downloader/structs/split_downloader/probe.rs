//! 大小探测：元数据请求发现资源总长。

use std::time::Duration;

use reqwest::header::CONTENT_LENGTH;
use reqwest::Client;
use url::Url;

use super::super::download_error::ProbeError;

/// 发 HEAD 请求并解析 Content-Length，返回资源总字节数。
///
/// 传输错误、非成功状态、缺少或解析不了长度头都会失败；
/// 探测失败中止整个运行，此时临时目录尚未创建。
pub(crate) async fn probe_size(
    client: &Client,
    url: &Url,
    timeout: Duration,
) -> Result<u64, ProbeError> {
    let resp = client.head(url.clone()).timeout(timeout).send().await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ProbeError::BadStatus(status));
    }

    let raw = resp
        .headers()
        .get(CONTENT_LENGTH)
        .ok_or(ProbeError::MissingLength)?;
    let text = raw
        .to_str()
        .map_err(|e| ProbeError::InvalidLength(e.to_string()))?;

    text.trim()
        .parse::<u64>()
        .map_err(|_| ProbeError::InvalidLength(text.to_string()))
}
