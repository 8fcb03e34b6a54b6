use std::net::Ipv4Addr;
use std::time::Instant;

use colored::*;

use crate::{mprint, terminal::{colors, format, print, spinner}};
use frontr_common::{config::Config, info, success};
use frontr_core::prober::{LatencyProber, ProbeSettings};

pub async fn probe(addrs: Vec<Ipv4Addr>, port: u16, cfg: &Config) -> anyhow::Result<()> {
    if cfg.quiet == 0 {
        info!("probing {} addresses on port {port}", addrs.len());
    }

    let prober = LatencyProber::new(ProbeSettings::default())
        .with_progress(spinner::report_probe_progress);

    let start_time: Instant = Instant::now();
    let latencies = prober.measure_latencies(&addrs, port).await;
    spinner::get_spinner().finish_and_clear();

    print::header("measured latencies", cfg.quiet);

    let key_width: usize = addrs.iter().map(|a| a.to_string().len()).max().unwrap_or(0);
    print::set_key_width(key_width);

    for addr in &addrs {
        match latencies.get(addr) {
            Some(&latency) => print::aligned_line(&addr.to_string(), format::latency_detail(latency)),
            // Early exit can leave trailing addresses unmeasured.
            None => print::aligned_line(&addr.to_string(), "skipped".dimmed()),
        }
    }

    if cfg.quiet < 2 {
        mprint!();
        let measured: ColoredString = format!("{} addresses", latencies.len()).bold().green();
        let elapsed: ColoredString = format!("{:.2}s", start_time.elapsed().as_secs_f64()).bold().yellow();
        success!(
            "{}",
            format!("Probe complete: {measured} measured in {elapsed}").color(colors::TEXT_DEFAULT)
        );
    }

    Ok(())
}
