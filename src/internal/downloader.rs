//! 下载器领域模块：专属于单个资源的分段下载器，由资源主动创建并执行下载。
//!
//! 使用方式：`resource.build_downloader().save_to(path).sections(8).send().await`
//! 对外导出以 [`crate::download`] 为准，此处仅做模块划分，不重复 pub use。

pub mod structs;
