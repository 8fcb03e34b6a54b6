//! # Endpoint Records
//!
//! The final product of a discovery run: an address that answered fast
//! enough, tagged with its port, latency and estimated location.

use std::net::Ipv4Addr;
use std::time::{SystemTime, UNIX_EPOCH};

/// A front-end address ready to hand to the tunnel layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointRecord {
    pub addr: Ipv4Addr,
    pub port: u16,
    /// Truncated mean connect latency over the successful probe attempts.
    pub latency_ms: u64,
    /// Two-letter region estimate, see `frontr_core::geo`.
    pub location: String,
    /// Uniqueness tag, unix millis plus address. Not meaningful beyond
    /// telling two runs apart.
    pub id: String,
}

impl EndpointRecord {
    pub fn new(addr: Ipv4Addr, port: u16, latency_ms: u64, location: String) -> Self {
        Self {
            addr,
            port,
            latency_ms,
            location,
            id: record_id(addr),
        }
    }
}

fn record_id(addr: Ipv4Addr) -> String {
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis())
        .unwrap_or(0);
    format!("{millis}-{addr}")
}
