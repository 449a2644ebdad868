//! 内存存储
//!
//! 数据只保存在进程内存中，重启后按种子重新生成。

pub mod memory_store;
pub mod report_store;

pub use memory_store::MemoryStore;
pub use report_store::ReportStore;

/// 可按编号查找的记录
pub trait Record {
    fn id(&self) -> &str;
}
