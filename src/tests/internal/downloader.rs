//! 下载器端到端测试：全量一致性、退化单段、探测失败短路、
//! 分段失败上报、断点续传、陈旧目标、取消与零字节资源。
//!
//! 全部跑在本地夹具服务上，不依赖外网；真实网络用例见 `live_download`。

use crate::download::{DownloadError, MergeError, ProbeError};
use crate::resource::Resource;
use crate::tests::{make_payload, FixtureServer};

/// 5MB、4 段：输出与参照负载逐字节一致，临时目录在成功后删除。
#[tokio::test]
async fn download_five_megabytes_in_four_sections() {
    let payload = make_payload(5_000_000, 42);
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("big.bin"), &payload).unwrap();
    let server = FixtureServer::serve_dir(dir.path()).await;

    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("big.bin");

    let resource = Resource::parse(&server.url_for("big.bin")).unwrap();
    let report = resource
        .build_downloader()
        .save_to(&target)
        .sections(4)
        .send()
        .await
        .expect("下载应成功");

    assert_eq!(report.total_bytes, 5_000_000);
    assert_eq!(report.sections, 4);
    assert!(report.partials_removed, "成功后应清掉临时目录");
    assert_eq!(
        std::fs::read(&target).unwrap(),
        payload,
        "输出应与参照逐字节一致"
    );

    let temp_dir = out_dir.path().join("big.bin.parts");
    assert!(!temp_dir.exists(), "临时目录应已删除");
}

/// 退化单段：输出同样逐字节一致。
#[tokio::test]
async fn download_single_section_matches_reference() {
    let payload = make_payload(600_000, 43);
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("one.bin"), &payload).unwrap();
    let server = FixtureServer::serve_dir(dir.path()).await;

    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("one.bin");

    let report = Resource::parse(&server.url_for("one.bin"))
        .unwrap()
        .build_downloader()
        .save_to(&target)
        .sections(1)
        .send()
        .await
        .expect("单段下载应成功");

    assert_eq!(report.sections, 1);
    assert_eq!(std::fs::read(&target).unwrap(), payload);
}

/// 探测失败（404）直接中止：没有任何分段任务启动，也不留临时目录。
#[tokio::test]
async fn probe_failure_short_circuits() {
    let dir = tempfile::tempdir().unwrap();
    let server = FixtureServer::serve_dir(dir.path()).await;

    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("missing.bin");

    let result = Resource::parse(&server.url_for("missing.bin"))
        .unwrap()
        .build_downloader()
        .save_to(&target)
        .sections(4)
        .send()
        .await;

    match result {
        Err(DownloadError::Probe(ProbeError::BadStatus(status))) => {
            assert_eq!(status.as_u16(), 404)
        }
        other => panic!("预期探测失败，得到: {:?}", other),
    }

    assert!(!target.exists(), "目标文件不应被创建");
    assert!(
        !out_dir.path().join("missing.bin.parts").exists(),
        "临时目录不应被创建"
    );
}

/// 部分分段失败：错误点名失败的分段序号，合并不执行，
/// 已成功分段的存储保留在临时目录里。
#[tokio::test]
async fn segment_failures_are_escalated_with_indices() {
    let payload = make_payload(5_000_000, 44);
    // 偏移 2_500_000 之后的 Range 一律 500：4 段方案中 2、3 两段必失败
    let server = FixtureServer::serve_flaky(payload.clone(), 2_500_000).await;

    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("flaky.bin");

    let result = Resource::parse(&server.url_for("flaky.bin"))
        .unwrap()
        .build_downloader()
        .save_to(&target)
        .sections(4)
        .send()
        .await;

    let failures = match result {
        Err(DownloadError::SegmentsFailed(f)) => f,
        other => panic!("预期分段失败上报，得到: {:?}", other),
    };

    let mut failed: Vec<usize> = failures.iter().map(|f| f.index).collect();
    failed.sort_unstable();
    assert_eq!(failed, vec![2, 3], "应点名失败的两个分段");

    assert!(!target.exists(), "有失败时不得合并出目标文件");

    let temp_dir = out_dir.path().join("flaky.bin.parts");
    assert!(temp_dir.exists(), "失败后临时目录应保留以便续传");
    let section0 = std::fs::read(temp_dir.join("section-0.part")).unwrap();
    assert_eq!(
        section0,
        &payload[..1_250_000],
        "成功分段的存储应完整保留"
    );
}

/// 第一次运行部分失败，换可用服务后重跑：已完成的段不再请求，
/// 缺失的尾部补齐，最终输出逐字节一致。
#[tokio::test]
async fn resume_completes_after_partial_failure() {
    let payload = make_payload(2_000_000, 45);

    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("resume.bin");
    let temp_dir = out_dir.path().join("resume.parts");

    // 第一轮：后半注入故障，段 2、3 失败
    {
        let server =
            FixtureServer::serve_flaky(payload.clone(), 1_000_000).await;
        let result = Resource::parse(&server.url_for("resume.bin"))
            .unwrap()
            .build_downloader()
            .save_to(&target)
            .temp_dir(&temp_dir)
            .sections(4)
            .send()
            .await;
        assert!(
            matches!(result, Err(DownloadError::SegmentsFailed(_))),
            "第一轮应部分失败"
        );
        assert!(temp_dir.exists());
    }

    // 第二轮：正常服务，同一临时目录与目标，续传补齐
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("resume.bin"), &payload).unwrap();
    let server = FixtureServer::serve_dir(dir.path()).await;

    let report = Resource::parse(&server.url_for("resume.bin"))
        .unwrap()
        .build_downloader()
        .save_to(&target)
        .temp_dir(&temp_dir)
        .sections(4)
        .send()
        .await
        .expect("续传轮应成功");

    assert_eq!(report.total_bytes, payload.len() as u64);
    assert_eq!(std::fs::read(&target).unwrap(), payload);
    assert!(report.partials_removed);
    assert!(!temp_dir.exists(), "成功后临时目录应删除");
}

/// 目标已存在且非空：整个运行以合并错误收场，旧文件原样保留。
#[tokio::test]
async fn stale_target_is_refused() {
    let payload = make_payload(100_000, 46);
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.bin"), &payload).unwrap();
    let server = FixtureServer::serve_dir(dir.path()).await;

    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("data.bin");
    std::fs::write(&target, b"precious old content").unwrap();

    let result = Resource::parse(&server.url_for("data.bin"))
        .unwrap()
        .build_downloader()
        .save_to(&target)
        .sections(2)
        .send()
        .await;

    assert!(
        matches!(
            result,
            Err(DownloadError::Merge(MergeError::TargetNotFresh(_)))
        ),
        "非空目标应被拒绝: {:?}",
        result
    );
    assert_eq!(
        std::fs::read(&target).unwrap(),
        b"precious old content",
        "旧文件必须原样保留"
    );
}

/// 运行前取消：所有任务立刻退出，整体返回取消错误。
#[tokio::test]
async fn cancel_before_send_aborts_run() {
    let payload = make_payload(100_000, 47);
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("data.bin"), &payload).unwrap();
    let server = FixtureServer::serve_dir(dir.path()).await;

    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("data.bin");

    let downloader = Resource::parse(&server.url_for("data.bin"))
        .unwrap()
        .build_downloader()
        .save_to(&target)
        .sections(2);
    downloader.cancel_handle().cancel();

    let result = downloader.send().await;
    assert!(matches!(result, Err(DownloadError::Cancelled)));
    assert!(!target.exists(), "取消的运行不得产出目标文件");
}

/// 零字节资源：没有分段任务，产出空目标文件。
#[tokio::test]
async fn zero_byte_resource_produces_empty_target() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("empty.bin"), b"").unwrap();
    let server = FixtureServer::serve_dir(dir.path()).await;

    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("empty.bin");

    let report = Resource::parse(&server.url_for("empty.bin"))
        .unwrap()
        .build_downloader()
        .save_to(&target)
        .sections(4)
        .send()
        .await
        .expect("零字节资源应成功");

    assert_eq!(report.total_bytes, 0);
    assert_eq!(report.sections, 0);
    assert_eq!(std::fs::metadata(&target).unwrap().len(), 0);
}

/// 监听进度：观察到的已下载字节单调不减，结束时快照等于总大小。
#[tokio::test]
async fn progress_watch_is_monotonic() {
    let payload = make_payload(1_500_000, 48);
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("watch.bin"), &payload).unwrap();
    let server = FixtureServer::serve_dir(dir.path()).await;

    let out_dir = tempfile::tempdir().unwrap();
    let target = out_dir.path().join("watch.bin");

    let downloader = Resource::parse(&server.url_for("watch.bin"))
        .unwrap()
        .build_downloader()
        .save_to(&target)
        .sections(3);
    let progress = downloader.progress();

    let observed = std::sync::Arc::new(std::sync::Mutex::new(Vec::new()));
    let observed_clone = std::sync::Arc::clone(&observed);
    let progress_for_watch = progress.clone();
    let watch_handle = tokio::spawn(async move {
        let mut watcher = progress_for_watch.watch();
        while let Ok(s) = watcher.changed().await {
            observed_clone.lock().unwrap().push(s.bytes_done);
        }
    });

    downloader.send().await.expect("下载应成功");

    watch_handle.abort();
    let _ = watch_handle.await;

    let seen = observed.lock().unwrap();
    for pair in seen.windows(2) {
        assert!(pair[1] >= pair[0], "观察到的进度必须单调不减");
    }
    assert_eq!(
        progress.get_current().bytes_done,
        payload.len() as u64,
        "终态快照应等于总大小"
    );
}

/// 便捷入口：保存路径传目录时在其下用资源名落盘。
#[tokio::test]
async fn fetch_to_directory_uses_resource_name() {
    let payload = make_payload(50_000, 49);
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("named.bin"), &payload).unwrap();
    let server = FixtureServer::serve_dir(dir.path()).await;

    let out_dir = tempfile::tempdir().unwrap();
    let report = crate::fetch_to_with_sections(
        &server.url_for("named.bin"),
        out_dir.path(),
        2,
    )
    .await
    .expect("便捷入口应成功");

    assert_eq!(report.target, out_dir.path().join("named.bin"));
    assert_eq!(std::fs::read(&report.target).unwrap(), payload);
}

/// 分段数 0 是调用方错误。
#[tokio::test]
async fn zero_sections_is_rejected() {
    let result = Resource::parse("http://127.0.0.1:9/x.bin")
        .unwrap()
        .build_downloader()
        .sections(0)
        .send()
        .await;
    assert!(matches!(result, Err(DownloadError::InvalidSectionCount)));
}
