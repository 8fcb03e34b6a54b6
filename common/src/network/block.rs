//! # Address Blocks
//!
//! A provider publishes its edge ranges as CIDR blocks of wildly different
//! sizes, from /32 pinpoints up to /12 allocations. This module models a
//! single block and the u32 arithmetic the sampler builds on.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use ipnetwork::Ipv4Network;
use thiserror::Error;
use tracing::warn;

/// One CIDR block from a range list.
///
/// The base address is kept as written; [`AddressBlock::network`] and
/// [`AddressBlock::broadcast`] apply the mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddressBlock {
    network: Ipv4Network,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BlockParseError {
    #[error("missing '/' separator in '{0}'")]
    MissingPrefix(String),
    #[error("invalid base address '{0}'")]
    InvalidAddress(String),
    #[error("invalid prefix '{0}', expected a number in 0..=32")]
    InvalidPrefix(String),
}

impl AddressBlock {
    pub fn new(base: Ipv4Addr, prefix: u8) -> Result<Self, BlockParseError> {
        let network = Ipv4Network::new(base, prefix)
            .map_err(|_| BlockParseError::InvalidPrefix(prefix.to_string()))?;
        Ok(Self { network })
    }

    pub fn base(&self) -> Ipv4Addr {
        self.network.ip()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    /// First address of the block, mask applied.
    pub fn network(&self) -> Ipv4Addr {
        self.network.network()
    }

    /// Last address of the block.
    pub fn broadcast(&self) -> Ipv4Addr {
        self.network.broadcast()
    }

    /// Largest host offset inside the block, i.e. broadcast minus network.
    /// Zero for a /32.
    pub fn host_span(&self) -> u32 {
        u32::from(self.broadcast()) - u32::from(self.network())
    }

    pub fn contains(&self, addr: Ipv4Addr) -> bool {
        self.network.contains(addr)
    }
}

impl fmt::Display for AddressBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base(), self.prefix())
    }
}

impl FromStr for AddressBlock {
    type Err = BlockParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((addr_str, prefix_str)) = s.split_once('/') else {
            return Err(BlockParseError::MissingPrefix(s.to_string()));
        };
        let base: Ipv4Addr = addr_str
            .parse()
            .map_err(|_| BlockParseError::InvalidAddress(addr_str.to_string()))?;
        let prefix: u8 = prefix_str
            .parse()
            .map_err(|_| BlockParseError::InvalidPrefix(prefix_str.to_string()))?;
        Self::new(base, prefix)
    }
}

/// Parses a list of CIDR strings into blocks, dropping anything malformed.
///
/// A bad entry only costs that entry. It is logged and skipped so the rest
/// of the list stays usable.
pub fn parse_blocks<I, S>(specs: I) -> Vec<AddressBlock>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut blocks: Vec<AddressBlock> = Vec::new();
    for spec in specs {
        let spec = spec.as_ref().trim();
        if spec.is_empty() {
            continue;
        }
        match spec.parse::<AddressBlock>() {
            Ok(block) => blocks.push(block),
            Err(err) => warn!("skipping range '{spec}': {err}"),
        }
    }
    blocks
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
