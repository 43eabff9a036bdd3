//! 基础设施层：存储实现与日志

#[cfg(feature = "database")]
pub mod database;
pub mod logger;
pub mod memory;

pub use memory::MemoryRecipeStore;
