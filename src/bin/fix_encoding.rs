//! 修复 admin-panel.html 中的乱码字符与emoji

use anyhow::{Context, Result};
use clap::Parser;

use admin_fixups::cli::{init_logging, write_mode, FixEncodingArgs, MSG_REPAIR_DONE};
use admin_fixups::{repair_file, ReplacementTable};

fn main() -> Result<()> {
    let args = FixEncodingArgs::parse();
    init_logging(args.verbose);

    let table = ReplacementTable::default_table();
    tracing::debug!("替换表共 {} 条规则", table.len());

    repair_file(&args.file, &table, write_mode(args.dry_run))
        .with_context(|| format!("repairing {}", args.file.display()))?;

    println!("{}", MSG_REPAIR_DONE);
    Ok(())
}
