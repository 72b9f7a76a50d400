//! 格式化测试：字节数与时长的人类可读输出。

use std::time::Duration;

use crate::report::{format_bytes, format_duration};

#[test]
fn bytes_below_one_kib_stay_plain() {
    assert_eq!(format_bytes(0), "0 B");
    assert_eq!(format_bytes(999), "999 B");
    assert_eq!(format_bytes(1023), "1023 B");
}

#[test]
fn bytes_scale_by_1024() {
    assert_eq!(format_bytes(1024), "1.0 KB");
    assert_eq!(format_bytes(1536), "1.5 KB");
    assert_eq!(format_bytes(1024 * 1024), "1.0 MB");
    assert_eq!(format_bytes(5_000_000), "4.8 MB");
    assert_eq!(format_bytes(1024 * 1024 * 1024), "1.0 GB");
}

#[test]
fn duration_renders_hh_mm_ss() {
    assert_eq!(format_duration(Duration::ZERO), "00:00:00");
    assert_eq!(format_duration(Duration::from_secs(59)), "00:00:59");
    assert_eq!(format_duration(Duration::from_secs(61)), "00:01:01");
    assert_eq!(format_duration(Duration::from_secs(3_661)), "01:01:01");
    assert_eq!(
        format_duration(Duration::from_secs(100 * 3600 + 2)),
        "100:00:02"
    );
}
