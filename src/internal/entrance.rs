//! 本库主入口：一行调用完成一次分段下载。
//!
//! 需要进度监听、取消或更细的配置时，改用
//! `Resource::parse(url)?.build_downloader()` 链式接口。

use std::path::Path;

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::run_report::RunReport;
use crate::internal::resource::structs::resource::Resource;

/// 按默认配置把 `url` 指向的资源分段下载到 `target`。
///
/// 分段数取可用并行度；`target` 为已存在目录时在其下用资源名落盘。
pub async fn fetch_to(
    url: &str,
    target: impl AsRef<Path>,
) -> Result<RunReport, DownloadError> {
    let resource =
        Resource::parse(url).map_err(DownloadError::InvalidUrl)?;
    resource.build_downloader().save_to(target).send().await
}

/// 指定分段数的便捷入口。
pub async fn fetch_to_with_sections(
    url: &str,
    target: impl AsRef<Path>,
    sections: usize,
) -> Result<RunReport, DownloadError> {
    let resource =
        Resource::parse(url).map_err(DownloadError::InvalidUrl)?;
    resource
        .build_downloader()
        .save_to(target)
        .sections(sections)
        .send()
        .await
}
