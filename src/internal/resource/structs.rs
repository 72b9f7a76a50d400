pub mod resource;
pub mod segment;

// 重导出公共类型
pub use resource::Resource;
pub use segment::Segment;
