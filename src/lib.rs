/// 内部导出的模块
mod internal;


/// 导出核心入口函数
pub use internal::entrance::*;

pub mod resource {
    use crate::internal;
    pub use internal::resource::structs::resource::Resource;
    pub use internal::resource::structs::segment::Segment;
}

/// 下载器：类型与入口（以 lib 为中心，此处统一导出）
pub mod download {
    use crate::internal;
    pub use internal::downloader::structs::cancel_handle::CancelHandle;
    pub use internal::downloader::structs::download_config::DownloadConfig;
    pub use internal::downloader::structs::download_error::{
        DownloadError, MergeError, ProbeError, SegmentError, SegmentFailure,
    };
    pub use internal::downloader::structs::run_report::RunReport;
    pub use internal::downloader::structs::split_downloader::SplitDownloader;
    pub use internal::downloader::structs::transfer_stats::TransferStats;
}

pub mod states {
    pub mod reactive_cell {
        use crate::internal;
        pub use internal::states::reactive_cell::*;
    }
}

/// 对外提供格式化与状态行能力，不限制死在下载器内部，以防有人自己要用
pub mod report {
    use crate::internal;
    pub use internal::report::console::{render_status_line, spawn_status_line};
    pub use internal::report::format::{format_bytes, format_duration};
}
