//! # Location Estimation
//!
//! Maps an address to a coarse two-letter region code from the shape of its
//! first two octets. The provider hands out edge ranges per regional
//! registry, so the octet prefix is a usable hint and nothing more. The
//! result is display metadata only and must never steer filtering or
//! ranking.

use std::net::Ipv4Addr;
use std::ops::RangeInclusive;

pub const DEFAULT_REGION: &str = "US";

struct RegionRule {
    first: u8,
    second: RangeInclusive<u8>,
    code: &'static str,
}

/// Evaluated top to bottom, first match wins.
const REGION_RULES: &[RegionRule] = &[
    RegionRule { first: 104, second: 16..=31, code: "US" },
    RegionRule { first: 172, second: 64..=71, code: "US" },
    RegionRule { first: 162, second: 158..=159, code: "EU" },
    RegionRule { first: 198, second: 41..=41, code: "US" },
    RegionRule { first: 141, second: 101..=101, code: "EU" },
    RegionRule { first: 188, second: 114..=114, code: "EU" },
    RegionRule { first: 190, second: 93..=93, code: "SA" },
    RegionRule { first: 103, second: 21..=31, code: "SG" },
    RegionRule { first: 108, second: 162..=162, code: "US" },
    RegionRule { first: 197, second: 234..=234, code: "ZA" },
    RegionRule { first: 131, second: 0..=0, code: "BR" },
    RegionRule { first: 173, second: 245..=245, code: "US" },
];

/// Best-effort region estimate for an address.
pub fn estimate_region(addr: Ipv4Addr) -> &'static str {
    let [first, second, _, _] = addr.octets();
    REGION_RULES
        .iter()
        .find(|rule| rule.first == first && rule.second.contains(&second))
        .map(|rule| rule.code)
        .unwrap_or(DEFAULT_REGION)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
