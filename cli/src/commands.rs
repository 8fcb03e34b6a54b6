pub mod discover;
pub mod probe;
pub mod ranges;

use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use frontr_common::config::{ConfigError, RangeFile, DEFAULT_PORT};

#[derive(Parser)]
#[command(name = "frontr")]
#[command(about = "Finds fast front-end addresses inside a provider's edge ranges.")]
#[command(version)]
pub struct CommandLine {
    /// Never print the startup banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Reduce output, twice for bare results
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Discover usable front-end endpoints
    #[command(alias = "d")]
    Discover {
        /// How many endpoints to return
        #[arg(short, long, default_value_t = 10)]
        count: usize,

        /// Highest acceptable latency in milliseconds
        #[arg(short = 'l', long, default_value_t = 300, value_parser = clap::value_parser!(u64).range(1..=998))]
        max_latency: u64,

        /// How many addresses to sample before probing
        #[arg(short, long, default_value_t = 100)]
        budget: usize,

        /// Region label stamped on every result instead of the estimate
        #[arg(long)]
        location: Option<String>,

        /// TOML range file replacing the builtin provider list
        #[arg(short, long)]
        ranges: Option<PathBuf>,

        /// Fixed sampling seed for reproducible runs
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Probe specific addresses and print their latencies
    #[command(alias = "p")]
    Probe {
        /// Addresses to time
        #[arg(required = true)]
        addrs: Vec<Ipv4Addr>,

        /// TCP port to dial
        #[arg(short, long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },

    /// Show the active range list
    #[command(alias = "r")]
    Ranges {
        /// TOML range file replacing the builtin provider list
        ranges: Option<PathBuf>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

/// The range file on disk when one was given, the builtin list otherwise.
pub(crate) fn load_ranges(path: Option<&Path>) -> Result<RangeFile, ConfigError> {
    match path {
        Some(path) => RangeFile::from_toml_file(path),
        None => Ok(RangeFile::builtin()),
    }
}
