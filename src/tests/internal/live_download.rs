//! 真实网络下载测试：按 env 配置的下载源跑一轮完整流程，
//! 未配置时自动跳过（见 `src/tests/lib.rs` 的说明）。

use crate::resource::Resource;
use crate::tests::{load_source_optional, TestSource};

#[tokio::test]
async fn live_download_roundtrip() {
    let source = match load_source_optional(TestSource::PublicHttp) {
        Some(s) => s,
        None => return,
    };

    let out_dir = tempfile::tempdir().unwrap();

    let resource = match Resource::parse(&source.url) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("下载源 URL 无效（可检查 env）：{}", e);
            return;
        }
    };

    let mut downloader = resource
        .build_downloader()
        .save_to(out_dir.path())
        .status_line();
    if let Some(n) = source.sections {
        downloader = downloader.sections(n);
    }

    let report = match downloader.send().await {
        Ok(r) => r,
        Err(e) => {
            eprintln!("真实下载失败（可检查网络与 env）：{}", e);
            return;
        }
    };

    let local_len = std::fs::metadata(&report.target)
        .map(|m| m.len())
        .unwrap_or(0);
    assert_eq!(
        local_len, report.total_bytes,
        "本地文件大小应与探测到的资源大小一致"
    );
    assert!(report.partials_removed, "成功后应清掉临时目录");
    println!(
        "真实下载成功: {}，大小 {}，{} 段，耗时 {:?}",
        report.target.display(),
        report.total_bytes,
        report.sections,
        report.elapsed
    );
}
