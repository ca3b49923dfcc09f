//! 将备份中的灵修内容合并回 data/devotionals.json（当前文件优先）

use anyhow::{Context, Result};
use clap::Parser;

use admin_fixups::cli::{init_logging, merged_count_message, write_mode, MergeDevotionalsArgs};
use admin_fixups::merge_files;

fn main() -> Result<()> {
    let args = MergeDevotionalsArgs::parse();
    init_logging(args.verbose);

    let report = merge_files(&args.current, &args.backup, write_mode(args.dry_run))
        .with_context(|| {
            format!(
                "merging {} into {}",
                args.backup.display(),
                args.current.display()
            )
        })?;

    println!("{}", merged_count_message(report.total));
    Ok(())
}
