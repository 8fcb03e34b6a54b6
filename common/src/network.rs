//! # Network Models
//!
//! Address blocks and the endpoint records produced from them.

pub mod block;
pub mod endpoint;
