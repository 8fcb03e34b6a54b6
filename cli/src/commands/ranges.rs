use std::path::PathBuf;

use colored::*;

use crate::commands::load_ranges;
use crate::{mprint, terminal::{colors, print}};
use frontr_common::{config::Config, success, warn};
use frontr_core::geo;

pub fn ranges(path: Option<PathBuf>, cfg: &Config) -> anyhow::Result<()> {
    let file = load_ranges(path.as_deref())?;
    let blocks = file.blocks();
    let skipped = file.ranges.len() - blocks.len();

    let key_width: usize = blocks.iter().map(|b| b.to_string().len()).max().unwrap_or(0);
    print::set_key_width(key_width);

    let mut total_hosts: u64 = 0;
    for block in &blocks {
        let hosts: u64 = u64::from(block.host_span()) + 1;
        total_hosts += hosts;
        let region: &str = geo::estimate_region(block.network());
        let value: String = format!("{hosts} hosts, {}", region.color(colors::ACCENT));
        print::aligned_line(&block.to_string(), value);
    }

    if skipped > 0 {
        warn!("{skipped} malformed ranges were skipped");
    }

    if cfg.quiet < 2 {
        mprint!();
        let summary: ColoredString = format!("{} blocks", blocks.len()).bold().green();
        let span: ColoredString = format!("{total_hosts} addresses").bold().yellow();
        success!(
            "{}",
            format!("Range list: {summary} spanning {span}").color(colors::TEXT_DEFAULT)
        );
    }

    Ok(())
}
