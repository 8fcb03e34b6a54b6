//! # Endpoint Discovery Service
//!
//! Implements the core "find usable front-ends" use case.
//!
//! The service wires the pipeline together: sample candidates out of the
//! configured blocks, measure them, rank the survivors. It owns everything
//! a run needs, so callers hold no global state between runs.

use std::collections::HashMap;
use std::net::Ipv4Addr;
use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use frontr_common::network::block::AddressBlock;
use frontr_common::network::endpoint::EndpointRecord;

use crate::prober::{Dialer, LatencyProber, ProbeSettings, TcpDialer};
use crate::ranking;
use crate::sampler::SampleSession;

#[derive(Debug, Error)]
pub enum DiscoverError {
    #[error("no candidate addresses could be sampled; check the range list")]
    NoCandidates,
    #[error(
        "no endpoint answered within {max_latency_ms} ms; raise the latency bound, \
         widen the sample budget or check connectivity"
    )]
    NoQualifyingEndpoint { max_latency_ms: u64 },
}

/// Constraints for one discovery run.
#[derive(Debug, Clone)]
pub struct DiscoveryRequest {
    /// Upper bound on returned records.
    pub candidate_count: usize,
    /// Latency filter in whole milliseconds.
    pub max_latency_ms: u64,
    /// How many addresses to sample before probing.
    pub sample_budget: usize,
    /// Stamped on every record instead of the per-address estimate.
    pub location_override: Option<String>,
}

/// Orchestrates sampling, probing and ranking for one range list.
///
/// 1. **Sampling**: draw a bounded candidate set from the blocks.
/// 2. **Probing**: measure TCP connect latency under the concurrency cap.
/// 3. **Ranking**: filter, sort and annotate the survivors.
pub struct DiscoveryService {
    blocks: Vec<AddressBlock>,
    port: u16,
    settings: ProbeSettings,
    dialer: Arc<dyn Dialer>,
    progress: Option<Arc<dyn Fn(usize, usize) + Send + Sync>>,
    seed: Option<u64>,
}

impl DiscoveryService {
    pub fn new(blocks: Vec<AddressBlock>, port: u16) -> Self {
        Self {
            blocks,
            port,
            settings: ProbeSettings::default(),
            dialer: Arc::new(TcpDialer),
            progress: None,
            seed: None,
        }
    }

    pub fn with_settings(mut self, settings: ProbeSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_dialer(mut self, dialer: Arc<dyn Dialer>) -> Self {
        self.dialer = dialer;
        self
    }

    /// Fixes the sampling RNG, giving reproducible candidate draws.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Registers a per-batch progress callback, `(measured, total)`.
    pub fn with_progress<F>(mut self, report: F) -> Self
    where
        F: Fn(usize, usize) + Send + Sync + 'static,
    {
        self.progress = Some(Arc::new(report));
        self
    }

    /// Runs the full pipeline and returns the ranked endpoint list.
    ///
    /// Fails only on exhaustion: nothing sampled, or nothing inside the
    /// latency bound. Per-address probe failures never surface here.
    pub async fn discover_endpoints(
        &self,
        request: &DiscoveryRequest,
    ) -> Result<Vec<EndpointRecord>, DiscoverError> {
        let mut session = match self.seed {
            Some(seed) => SampleSession::with_seed(seed),
            None => SampleSession::new(),
        };
        let candidates = session.sample(&self.blocks, request.sample_budget);
        if candidates.is_empty() {
            return Err(DiscoverError::NoCandidates);
        }
        debug!("sampled {} candidates from {} blocks", candidates.len(), self.blocks.len());

        let latencies = self.prober().measure_latencies(&candidates, self.port).await;

        let records = ranking::rank_endpoints(
            &latencies,
            self.port,
            request.max_latency_ms,
            request.candidate_count,
            request.location_override.as_deref(),
        );
        if records.is_empty() {
            return Err(DiscoverError::NoQualifyingEndpoint {
                max_latency_ms: request.max_latency_ms,
            });
        }
        Ok(records)
    }

    /// Measures the given addresses as one probing run on `port`.
    ///
    /// Never fails as a whole; unreachable addresses carry the failure
    /// sentinel in-band.
    pub async fn measure_latencies(&self, addrs: &[Ipv4Addr], port: u16) -> HashMap<Ipv4Addr, u64> {
        self.prober().measure_latencies(addrs, port).await
    }

    fn prober(&self) -> LatencyProber {
        let mut prober = LatencyProber::new(self.settings).with_dialer(Arc::clone(&self.dialer));
        if let Some(report) = &self.progress {
            let report = Arc::clone(report);
            prober = prober.with_progress(move |done, total| report(done, total));
        }
        prober
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
