pub mod cancel_handle;
pub mod download_config;
pub mod download_error;
pub mod run_report;
pub mod split_downloader;
pub mod transfer_stats;

// 重导出公共类型
pub use cancel_handle::CancelHandle;
pub use download_config::DownloadConfig;
pub use download_error::{
    DownloadError, MergeError, ProbeError, SegmentError, SegmentFailure,
};
pub use run_report::RunReport;
pub use split_downloader::SplitDownloader;
pub use transfer_stats::TransferStats;
