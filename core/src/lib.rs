//! # frontr-core
//!
//! The discovery pipeline: sample candidate addresses out of the provider's
//! CIDR blocks, time TCP connects against them under a concurrency cap, and
//! rank whatever answered fast enough into endpoint records.
//!
//! The crate holds no global state. A [`discovery::DiscoveryService`] owns
//! everything one run needs and is cheap to rebuild per call.

pub mod discovery;
pub mod geo;
pub mod prober;
pub mod ranking;
pub mod sampler;
