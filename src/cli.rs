//! 命令行层：参数定义、默认路径、输出文本与日志初始化

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::model::data_core::WriteMode;

// === 常量定义（消除魔法值） ===
pub const DEFAULT_HTML_PATH: &str = "admin-panel.html";
pub const DEFAULT_CURRENT_PATH: &str = "data/devotionals.json";
pub const DEFAULT_BACKUP_PATH: &str = "/tmp/backup1.json";
pub const MSG_REPAIR_DONE: &str = "Done - Fixed encoding and emojis";

/// 合并完成后输出到stdout的一行
pub fn merged_count_message(count: usize) -> String {
    format!("Fusionados: {} devocionales", count)
}

/// Repair CP850-garbled characters and emoji in an HTML file, in place.
#[derive(Parser, Debug)]
#[command(author, version)]
pub struct FixEncodingArgs {
    /// HTML file to repair (overwritten without backup)
    #[arg(short, long, default_value = DEFAULT_HTML_PATH)]
    pub file: PathBuf,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Log every rule that fired
    #[arg(short, long)]
    pub verbose: bool,
}

/// Merge a backup devotionals file into the current one; current wins on collision.
#[derive(Parser, Debug)]
#[command(author, version)]
pub struct MergeDevotionalsArgs {
    /// Current devotionals file; also the output path
    #[arg(short, long, default_value = DEFAULT_CURRENT_PATH)]
    pub current: PathBuf,

    /// Backup devotionals file (read only)
    #[arg(short, long, default_value = DEFAULT_BACKUP_PATH)]
    pub backup: PathBuf,

    /// Report what would change without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Log every collided key
    #[arg(short, long)]
    pub verbose: bool,
}

pub fn write_mode(dry_run: bool) -> WriteMode {
    if dry_run {
        WriteMode::DryRun
    } else {
        WriteMode::Overwrite
    }
}

/// 初始化日志输出到stderr，stdout只保留结果行
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    let _ = SubscriberBuilder::default()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}
