//! # Ranking and Filtering
//!
//! Turns a latency map into the final ordered endpoint list: drop what
//! missed the latency bound, sort the rest ascending, cap the count and
//! stamp each survivor with a region label.

use std::collections::HashMap;
use std::net::Ipv4Addr;

use frontr_common::network::endpoint::EndpointRecord;

use crate::geo;

/// Builds the ranked record list out of measured latencies.
///
/// Only true successes survive: a latency must be positive and at most
/// `max_latency_ms`, which filters the failure sentinel out with the same
/// comparison. The sort is stable, so equal latencies keep the map's
/// iteration order. An empty return means nothing qualified; raising that
/// to the caller is [`crate::discovery::DiscoveryService`]'s job.
pub fn rank_endpoints(
    latencies: &HashMap<Ipv4Addr, u64>,
    port: u16,
    max_latency_ms: u64,
    count: usize,
    location_override: Option<&str>,
) -> Vec<EndpointRecord> {
    let mut qualifying: Vec<(Ipv4Addr, u64)> = latencies
        .iter()
        .filter(|&(_, &latency)| latency > 0 && latency <= max_latency_ms)
        .map(|(&addr, &latency)| (addr, latency))
        .collect();

    qualifying.sort_by_key(|&(_, latency)| latency);
    qualifying.truncate(count);

    qualifying
        .into_iter()
        .map(|(addr, latency_ms)| {
            let location = match location_override {
                Some(label) => label.to_owned(),
                None => geo::estimate_region(addr).to_owned(),
            };
            EndpointRecord::new(addr, port, latency_ms, location)
        })
        .collect()
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
    use crate::prober::FAILED_LATENCY_MS;

    fn addr(last: u8) -> Ipv4Addr {
        Ipv4Addr::new(104, 17, 0, last)
    }

    fn latency_map(entries: &[(u8, u64)]) -> HashMap<Ipv4Addr, u64> {
        entries.iter().map(|&(last, ms)| (addr(last), ms)).collect()
    }

    #[test]
    fn test_sorts_ascending_and_caps_count() {
        let latencies = latency_map(&[(1, 180), (2, 40), (3, 90), (4, 110)]);
        let records = rank_endpoints(&latencies, 443, 300, 3, None);

        let ordered: Vec<u64> = records.iter().map(|r| r.latency_ms).collect();
        assert_eq!(ordered, vec![40, 90, 110]);
        assert_eq!(records[0].addr, addr(2));
        assert_eq!(records[0].port, 443);
    }

    #[test]
    fn test_filters_sentinel_and_slow_entries() {
        let latencies = latency_map(&[(1, FAILED_LATENCY_MS), (2, 120), (3, 301), (4, 0)]);
        let records = rank_endpoints(&latencies, 443, 300, 10, None);

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].addr, addr(2));
    }

    #[test]
    fn test_boundary_latency_is_kept() {
        let latencies = latency_map(&[(1, 300)]);
        let records = rank_endpoints(&latencies, 443, 300, 10, None);

        assert_eq!(records.len(), 1);
    }

    #[test]
    fn test_nothing_qualifying_yields_empty_list() {
        let latencies = latency_map(&[(1, FAILED_LATENCY_MS), (2, 999)]);

        assert!(rank_endpoints(&latencies, 443, 300, 10, None).is_empty());
    }

    #[test]
    fn test_location_override_beats_estimate() {
        let latencies = latency_map(&[(1, 50)]);

        let estimated = rank_endpoints(&latencies, 443, 300, 1, None);
        assert_eq!(estimated[0].location, "US");

        let overridden = rank_endpoints(&latencies, 443, 300, 1, Some("JP"));
        assert_eq!(overridden[0].location, "JP");
    }
}
