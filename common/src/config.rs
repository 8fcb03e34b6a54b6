//! # Runtime Configuration
//!
//! Two small layers. [`Config`] carries the output flags the CLI collects
//! from its arguments. [`RangeFile`] is the optional TOML list of CIDR
//! ranges to sample, with the provider's published ranges compiled in as
//! the fallback.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::network::block::{self, AddressBlock};

/// Output-behavior flags shared across commands.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// Suppresses the startup banner.
    pub no_banner: bool,
    /// Output reduction level: 0 = full, 1 = compact, 2 = results only.
    pub quiet: u8,
}

pub const DEFAULT_PORT: u16 = 443;

/// Published IPv4 edge ranges of the fronting provider, used whenever no
/// range file is given.
pub const DEFAULT_RANGES: &[&str] = &[
    "173.245.48.0/20",
    "103.21.244.0/22",
    "103.22.200.0/22",
    "103.31.4.0/22",
    "141.101.64.0/18",
    "108.162.192.0/18",
    "190.93.240.0/20",
    "188.114.96.0/20",
    "197.234.240.0/22",
    "198.41.128.0/17",
    "162.158.0.0/15",
    "104.16.0.0/13",
    "104.24.0.0/14",
    "172.64.0.0/13",
    "131.0.72.0/22",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read range file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse range file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// User-maintained range list.
///
/// ```toml
/// port = 443
/// ranges = ["104.16.0.0/13", "172.64.0.0/13"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RangeFile {
    /// TCP port probed on every sampled address.
    #[serde(default = "default_port")]
    pub port: u16,
    /// CIDR blocks to sample, one string per block.
    pub ranges: Vec<String>,
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

impl RangeFile {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// The compiled-in provider list.
    pub fn builtin() -> Self {
        Self {
            port: DEFAULT_PORT,
            ranges: DEFAULT_RANGES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Parses the range list, dropping malformed entries.
    pub fn blocks(&self) -> Vec<AddressBlock> {
        block::parse_blocks(&self.ranges)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ranges_all_parse() {
        let file = RangeFile::builtin();
        let blocks = file.blocks();

        assert_eq!(blocks.len(), DEFAULT_RANGES.len());
        assert_eq!(file.port, 443);
    }

    #[test]
    fn test_range_file_from_toml() {
        let content = r#"
            port = 8443
            ranges = ["104.16.0.0/13", "bogus", "172.64.0.0/13"]
        "#;
        let file = RangeFile::from_toml(content).unwrap();

        assert_eq!(file.port, 8443);
        assert_eq!(file.ranges.len(), 3);
        // "bogus" is dropped at parse time, not load time.
        assert_eq!(file.blocks().len(), 2);
    }

    #[test]
    fn test_range_file_port_defaults() {
        let file = RangeFile::from_toml(r#"ranges = ["104.16.0.0/13"]"#).unwrap();

        assert_eq!(file.port, DEFAULT_PORT);
    }

    #[test]
    fn test_range_file_rejects_missing_ranges() {
        assert!(RangeFile::from_toml("port = 443").is_err());
    }
}
