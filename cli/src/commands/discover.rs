use std::path::PathBuf;
use std::time::{Duration, Instant};

use colored::*;

use crate::commands::load_ranges;
use crate::{mprint, terminal::{colors, format, print, spinner}};
use frontr_common::{config::Config, network::endpoint::EndpointRecord, success, warn};
use frontr_core::discovery::{DiscoverError, DiscoveryRequest, DiscoveryService};

pub struct DiscoverArgs {
    pub count: usize,
    pub max_latency: u64,
    pub budget: usize,
    pub location: Option<String>,
    pub ranges: Option<PathBuf>,
    pub seed: Option<u64>,
}

pub async fn discover(args: DiscoverArgs, cfg: &Config) -> anyhow::Result<()> {
    let file = load_ranges(args.ranges.as_deref())?;
    let blocks = file.blocks();
    let skipped = file.ranges.len() - blocks.len();
    if skipped > 0 {
        warn!("{skipped} malformed ranges were skipped");
    }
    if cfg.quiet == 0 {
        success!("{} ranges loaded, probing port {}", blocks.len(), file.port);
    }

    let mut service = DiscoveryService::new(blocks, file.port)
        .with_progress(spinner::report_probe_progress);
    if let Some(seed) = args.seed {
        service = service.with_seed(seed);
    }

    let request = DiscoveryRequest {
        candidate_count: args.count,
        max_latency_ms: args.max_latency,
        sample_budget: args.budget,
        location_override: args.location,
    };

    let start_time: Instant = Instant::now();
    let outcome = service.discover_endpoints(&request).await;
    spinner::get_spinner().finish_and_clear();

    match outcome {
        Ok(records) => {
            discovery_ends(&records, start_time.elapsed(), cfg);
            Ok(())
        }
        Err(err @ DiscoverError::NoQualifyingEndpoint { .. }) => {
            no_endpoints_found(cfg);
            Err(err.into())
        }
        Err(err) => Err(err.into()),
    }
}

fn discovery_ends(records: &[EndpointRecord], total_time: Duration, cfg: &Config) {
    if cfg.quiet >= 2 {
        for record in records {
            mprint!(&format!("{}:{}", record.addr, record.port));
        }
        return;
    }

    if cfg.quiet > 0 {
        mprint!();
    }

    print::header("discovered endpoints", cfg.quiet);
    print_records(records, cfg);
    print_summary(records.len(), total_time, cfg);
}

fn no_endpoints_found(cfg: &Config) {
    print::header("ZERO ENDPOINTS QUALIFIED", cfg.quiet);
    print::no_results();
}

fn print_records(records: &[EndpointRecord], cfg: &Config) {
    for (idx, record) in records.iter().enumerate() {
        print::tree_head(idx, &record.addr.to_string());
        print::as_tree_one_level(format::endpoint_details(record, cfg));
        if idx + 1 != records.len() {
            mprint!();
        }
    }
}

fn print_summary(found: usize, total_time: Duration, cfg: &Config) {
    let endpoints: ColoredString = format!("{found} usable endpoints").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: &ColoredString = &format!("Discovery complete: {endpoints} in {total_time}")
        .color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::fat_separator();
            print::centerln(output);
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}
