//! # Latency Probing
//!
//! Times TCP connects against candidate addresses in fixed-size batches.
//! Every address in a batch is dialed concurrently and batches are joined
//! before the next one starts, which caps outbound sockets at the batch
//! size. Once enough addresses have answered fast, the remaining batches
//! are skipped and the partial map is returned as-is.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::net::TcpStream;
use tokio::time::{timeout, Instant};
use tracing::debug;

/// Latency recorded when no connection attempt succeeds. Larger than any
/// realistic measurement but still ordered, so failed addresses sort last
/// instead of needing a separate channel.
pub const FAILED_LATENCY_MS: u64 = 999;

/// Knobs for one probing run. [`ProbeSettings::default`] carries the
/// values the tool ships with.
#[derive(Debug, Clone, Copy)]
pub struct ProbeSettings {
    /// Connection attempts per address.
    pub attempts: u32,
    /// Timeout for a single attempt.
    pub attempt_timeout: Duration,
    /// Addresses dialed concurrently.
    pub batch_size: usize,
    /// Latencies strictly below this count as good.
    pub good_latency_ms: u64,
    /// Good addresses needed before the run stops early.
    pub early_exit_count: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            attempts: 3,
            attempt_timeout: Duration::from_secs(1),
            batch_size: 30,
            good_latency_ms: 200,
            early_exit_count: 10,
        }
    }
}

/// One TCP connect attempt with a deadline. The production dialer is
/// [`TcpDialer`]; tests inject scripted ones.
#[async_trait]
pub trait Dialer: Send + Sync {
    /// True when the handshake completed within `limit`.
    async fn dial(&self, addr: SocketAddr, limit: Duration) -> bool;
}

pub struct TcpDialer;

#[async_trait]
impl Dialer for TcpDialer {
    async fn dial(&self, addr: SocketAddr, limit: Duration) -> bool {
        match timeout(limit, TcpStream::connect(addr)).await {
            Ok(Ok(_stream)) => true,
            Ok(Err(_refused)) => false,
            Err(_elapsed) => false,
        }
    }
}

/// Batched connect-timing over a candidate list.
pub struct LatencyProber {
    settings: ProbeSettings,
    dialer: Arc<dyn Dialer>,
    progress: Option<Box<dyn Fn(usize, usize) + Send + Sync>>,
}

impl LatencyProber {
    pub fn new(settings: ProbeSettings) -> Self {
        Self {
            settings,
            dialer: Arc::new(TcpDialer),
            progress: None,
        }
    }

    pub fn with_dialer(mut self, dialer: Arc<dyn Dialer>) -> Self {
        self.dialer = dialer;
        self
    }

    /// Registers a callback invoked after every batch with the number of
    /// addresses measured so far and the total.
    pub fn with_progress<F>(mut self, report: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress = Some(Box::new(report));
        self
    }

    /// Measures connect latency for every address, batch by batch.
    ///
    /// On natural completion the map holds exactly one entry per input
    /// address. When the early exit fires, addresses in batches never
    /// started are absent from the map rather than marked failed.
    pub async fn measure_latencies(&self, addrs: &[Ipv4Addr], port: u16) -> HashMap<Ipv4Addr, u64> {
        let mut latencies: HashMap<Ipv4Addr, u64> = HashMap::with_capacity(addrs.len());
        let total: usize = addrs.len();

        for batch in addrs.chunks(self.settings.batch_size.max(1)) {
            let mut tasks = Vec::with_capacity(batch.len());
            for &addr in batch {
                let dialer = Arc::clone(&self.dialer);
                let settings = self.settings;
                tasks.push(tokio::spawn(async move {
                    probe_addr(dialer.as_ref(), addr, port, settings).await
                }));
            }

            // Each task owns exactly one key, so inserting after the join
            // never races.
            for (&addr, task) in batch.iter().zip(tasks) {
                let latency = task.await.unwrap_or(FAILED_LATENCY_MS);
                latencies.insert(addr, latency);
            }

            if let Some(report) = &self.progress {
                report(latencies.len(), total);
            }

            let good = self.good_count(&latencies);
            if good >= self.settings.early_exit_count {
                debug!("early exit with {good} good endpoints after {} of {total}", latencies.len());
                break;
            }
        }

        latencies
    }

    fn good_count(&self, latencies: &HashMap<Ipv4Addr, u64>) -> usize {
        latencies
            .values()
            .filter(|&&latency| latency < self.settings.good_latency_ms)
            .count()
    }
}

/// Dials one address up to `settings.attempts` times and averages the
/// successful timings, rounding toward zero. All attempts failing yields
/// [`FAILED_LATENCY_MS`].
async fn probe_addr(dialer: &dyn Dialer, addr: Ipv4Addr, port: u16, settings: ProbeSettings) -> u64 {
    let socket_addr: SocketAddr = SocketAddr::new(IpAddr::V4(addr), port);
    let mut samples: Vec<u64> = Vec::with_capacity(settings.attempts as usize);

    for _ in 0..settings.attempts {
        let started = Instant::now();
        if dialer.dial(socket_addr, settings.attempt_timeout).await {
            samples.push(started.elapsed().as_millis() as u64);
        }
    }

    if samples.is_empty() {
        FAILED_LATENCY_MS
    } else {
        samples.iter().sum::<u64>() / samples.len() as u64
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
