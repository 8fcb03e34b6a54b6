use colored::*;

use crate::terminal::colors;
use frontr_common::config::Config;
use frontr_common::network::endpoint::EndpointRecord;
use frontr_core::prober::FAILED_LATENCY_MS;

pub type Detail = (String, ColoredString);

/// Colors a latency by how usable it is: green under 100 ms, yellow up to
/// the good threshold neighborhood, red beyond.
pub fn latency_detail(latency_ms: u64) -> ColoredString {
    if latency_ms >= FAILED_LATENCY_MS {
        return "timeout".red().bold();
    }

    let text: String = format!("{latency_ms} ms");
    if latency_ms < 100 {
        text.green()
    } else if latency_ms <= 200 {
        text.yellow()
    } else {
        text.red()
    }
}

pub fn endpoint_details(record: &EndpointRecord, cfg: &Config) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        (String::from("Latency"), latency_detail(record.latency_ms)),
        (String::from("Region"), record.location.color(colors::ACCENT)),
        (String::from("Port"), record.port.to_string().color(colors::TEXT_DEFAULT)),
    ];

    if cfg.quiet == 0 {
        details.push((String::from("Id"), record.id.dimmed()));
    }

    details
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_latency_bands() {
        assert_eq!(&*latency_detail(40), "40 ms");
        assert_eq!(&*latency_detail(150), "150 ms");
        assert_eq!(&*latency_detail(999), "timeout");
    }

    #[test]
    fn test_quiet_drops_the_id_row() {
        let record = EndpointRecord::new(Ipv4Addr::new(104, 17, 0, 1), 443, 80, "US".into());
        let loud = Config { no_banner: false, quiet: 0 };
        let quiet = Config { no_banner: false, quiet: 1 };

        assert_eq!(endpoint_details(&record, &loud).len(), 4);
        assert_eq!(endpoint_details(&record, &quiet).len(), 3);
    }
}
