pub mod data_core;
pub mod devotional_merge;
pub mod encoding_repair;
