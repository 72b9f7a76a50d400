//! HTTP 客户端构造：统一的客户端标识头与超时配置。
//!
//! 探测与分段请求共用同一个 [`reqwest::Client`]；User-Agent 在构造时写入
//! 默认请求头，之后所有请求自动携带。不开启透明压缩——Range 请求按字节
//! 精确计账，压缩会让 Content-Length 与落盘字节对不上。

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::Client;

/// 默认客户端标识。
pub const DEFAULT_USER_AGENT: &str = "split-fetch";

/// 默认连接超时。
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// 默认读超时：两次读到数据的最大间隔，防止挂死的连接拖住整个下载。
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(60);

/// 按配置构造共享客户端；User-Agent 非法字符或底层构建失败时返回错误字符串。
pub fn build_client(
    user_agent: &str,
    connect_timeout: Duration,
    read_timeout: Duration,
) -> Result<Client, String> {
    let mut headers = HeaderMap::new();

    let ua_value =
        HeaderValue::from_str(user_agent).map_err(|e| e.to_string())?;
    headers.insert(USER_AGENT, ua_value);

    Client::builder()
        .default_headers(headers)
        .connect_timeout(connect_timeout)
        .read_timeout(read_timeout)
        .build()
        .map_err(|e| e.to_string())
}
