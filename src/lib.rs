//! 管理面板修复工具库
//!
//! 提供两个一次性修复：HTML乱码替换，以及灵修JSON的浅合并

pub mod cli;
pub mod model;
pub mod utils;

// 重新导出主要类型
pub use model::data_core::{merge_files, repair_file, AppError, WriteMode};
pub use model::devotional_merge::{DevotionalCollection, MergeReport};
pub use model::encoding_repair::{RepairReport, Replacement, ReplacementTable};
