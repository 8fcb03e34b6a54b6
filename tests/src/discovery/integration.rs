use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::sleep;

use frontr_common::config::RangeFile;
use frontr_core::discovery::{DiscoverError, DiscoveryRequest, DiscoveryService};
use frontr_core::prober::{Dialer, FAILED_LATENCY_MS};

use crate::util::{closed_loopback_port, LoopbackListener};

/// Completes every handshake after a fixed delay, regardless of address.
struct DelayDialer {
    delay: Duration,
}

#[async_trait]
impl Dialer for DelayDialer {
    async fn dial(&self, _addr: SocketAddr, _limit: Duration) -> bool {
        sleep(self.delay).await;
        true
    }
}

fn request(count: usize, max_latency_ms: u64) -> DiscoveryRequest {
    DiscoveryRequest {
        candidate_count: count,
        max_latency_ms,
        sample_budget: 40,
        location_override: None,
    }
}

/// Full pipeline over the builtin provider ranges with an injected dialer,
/// so the run is network-free but everything else is real.
#[tokio::test]
async fn discovery_over_builtin_ranges_with_injected_dialer() {
    let blocks = RangeFile::builtin().blocks();
    let service = DiscoveryService::new(blocks.clone(), 443)
        .with_dialer(Arc::new(DelayDialer { delay: Duration::from_millis(25) }))
        .with_seed(1);

    let records = service
        .discover_endpoints(&request(5, 500))
        .await
        .expect("discovery should succeed when every dial connects");

    assert_eq!(records.len(), 5);
    for record in &records {
        assert!(record.latency_ms >= 25, "latency below the dial delay: {}", record.latency_ms);
        assert!(record.latency_ms <= 500);
        assert_eq!(record.port, 443);
        assert!(!record.location.is_empty(), "record is missing a region label");
        assert!(
            blocks.iter().any(|b| b.contains(record.addr)),
            "{} is outside every configured block",
            record.addr
        );
    }
}

/// The latency map must cover the full input set when the run completes
/// naturally, an open port strictly faster than the sentinel and a closed
/// one pinned to it.
#[tokio::test]
async fn latency_map_covers_open_and_closed_ports() {
    let listener = LoopbackListener::spawn().await.expect("failed to bind loopback listener");
    let service = DiscoveryService::new(Vec::new(), listener.port);

    let addrs = vec![listener.addr];
    let open = service.measure_latencies(&addrs, listener.port).await;

    assert_eq!(open.len(), 1);
    assert!(open[&listener.addr] < FAILED_LATENCY_MS);

    let closed_port = closed_loopback_port().await.expect("failed to reserve a closed port");
    let closed = service.measure_latencies(&addrs, closed_port).await;

    assert_eq!(closed.len(), 1);
    assert_eq!(closed[&listener.addr], FAILED_LATENCY_MS);
}

/// A range list whose only port is closed yields the user-facing
/// exhaustion error, never an empty list.
#[tokio::test]
async fn discovery_fails_against_closed_port() {
    let closed_port = closed_loopback_port().await.expect("failed to reserve a closed port");
    let block = "127.0.0.1/32".parse().expect("loopback block should parse");
    let service = DiscoveryService::new(vec![block], closed_port);

    let err = service
        .discover_endpoints(&request(3, 300))
        .await
        .expect_err("nothing listens on the closed port");

    assert!(matches!(err, DiscoverError::NoQualifyingEndpoint { max_latency_ms: 300 }));
}

/// An empty range list fails before any socket is touched.
#[tokio::test]
async fn discovery_fails_without_ranges() {
    let service = DiscoveryService::new(Vec::new(), 443);

    let err = service
        .discover_endpoints(&request(3, 300))
        .await
        .expect_err("no blocks means no candidates");

    assert!(matches!(err, DiscoverError::NoCandidates));
}

/// Live-network check against a well-known public endpoint; needs real
/// connectivity, so it stays ignored by default.
#[tokio::test]
#[ignore]
async fn live_probe_reaches_public_resolver() {
    let service = DiscoveryService::new(Vec::new(), 443);
    let addrs = vec![Ipv4Addr::new(1, 1, 1, 1)];

    let latencies = service.measure_latencies(&addrs, 443).await;

    assert!(latencies[&addrs[0]] < FAILED_LATENCY_MS);
}

/// TEST-NET-3 is unroutable, so every attempt should time out into the
/// sentinel. Ignored by default; it takes three full timeouts.
#[tokio::test]
#[ignore]
async fn live_probe_unroutable_address_hits_sentinel() {
    let service = DiscoveryService::new(Vec::new(), 443);
    let addrs = vec![Ipv4Addr::new(203, 0, 113, 1)];

    let latencies = service.measure_latencies(&addrs, 443).await;

    assert_eq!(latencies[&addrs[0]], FAILED_LATENCY_MS);
}
