//! # Candidate Sampling
//!
//! Draws a spread of addresses from a range list without enumerating it.
//! The blocks involved run from /32 pinpoints to /12 allocations, so full
//! enumeration is off the table. Instead every block contributes a handful
//! of picks sized to its prefix, and the widest blocks top the pool up when
//! the first pass comes in short.

use std::collections::HashSet;
use std::net::Ipv4Addr;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use frontr_common::network::block::AddressBlock;

/// Hard cap on /24 strides walked inside one block.
const STRIDE_CAP: u32 = 1000;

/// Blocks at this prefix or wider join the supplemental top-up round.
const WIDE_PREFIX_MAX: u8 = 18;

/// Upper bound on top-up sweeps over the wide blocks.
const FILL_SWEEPS: usize = 16;

/// Redraws per share unit before a wide block counts as dry.
const FILL_DRAW_ATTEMPTS: usize = 16;

/// One sampling pass over a range list.
///
/// Owns the RNG and the dedup set, so a caller that wants reproducible
/// draws seeds the session and keeps it around.
pub struct SampleSession {
    rng: StdRng,
    seen: HashSet<Ipv4Addr>,
}

impl SampleSession {
    pub fn new() -> Self {
        Self::from_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }

    fn from_rng(rng: StdRng) -> Self {
        Self {
            rng,
            seen: HashSet::new(),
        }
    }

    /// Draws up to `budget` distinct candidates across `blocks`.
    ///
    /// Each block is asked for the remaining shortfall in list order, the
    /// wide blocks fill whatever is still missing, and the pool is shuffled
    /// before the cap so block order never decides who gets probed first.
    pub fn sample(&mut self, blocks: &[AddressBlock], budget: usize) -> Vec<Ipv4Addr> {
        let mut picked: Vec<Ipv4Addr> = Vec::with_capacity(budget);

        for block in blocks {
            if picked.len() >= budget {
                break;
            }
            let want = budget - picked.len();
            self.sample_block(block, want, &mut picked);
        }

        if picked.len() < budget {
            self.supplemental_fill(blocks, budget, &mut picked);
        }

        picked.shuffle(&mut self.rng);
        picked.truncate(budget);
        picked
    }

    /// Draws up to `want` addresses from a single block.
    ///
    /// A /32 is returned as-is and anything /24 or narrower yields one
    /// random host. Wider blocks are walked in /24 strides with one draw
    /// per stride, the last octet always in 1..=254.
    fn sample_block(&mut self, block: &AddressBlock, want: usize, picked: &mut Vec<Ipv4Addr>) {
        if want == 0 {
            return;
        }

        let start: u32 = u32::from(block.network());
        let end: u32 = u32::from(block.broadcast());

        if block.prefix() == 32 {
            self.push_unique(block.base(), picked);
            return;
        }

        if block.prefix() >= 24 {
            let offset = self.rng.random_range(0..=block.host_span());
            self.push_unique(Ipv4Addr::from(start + offset), picked);
            return;
        }

        let mut taken: usize = 0;
        let mut stride: u32 = start;
        for _ in 0..STRIDE_CAP {
            if taken >= want {
                break;
            }
            let octet: u32 = self.rng.random_range(1..=254);
            let candidate: u32 = (stride & 0xffff_ff00) | octet;
            if candidate <= end && self.push_unique(Ipv4Addr::from(candidate), picked) {
                taken += 1;
            }
            match stride.checked_add(256) {
                Some(next) if next <= end => stride = next,
                _ => break,
            }
        }
    }

    /// Tops the pool up from the blocks wide enough to keep yielding
    /// distinct addresses.
    ///
    /// Sweeps hand every wide block an even share of the shortfall. Each
    /// share unit redraws a rejected offset a bounded number of times, so
    /// a sweep that adds nothing means the wide blocks are genuinely dry
    /// rather than unlucky. Sweeps repeat until the budget is met, a
    /// sweep adds nothing, or the sweep cap is hit.
    fn supplemental_fill(&mut self, blocks: &[AddressBlock], budget: usize, picked: &mut Vec<Ipv4Addr>) {
        let wide: Vec<&AddressBlock> = blocks
            .iter()
            .filter(|block| block.prefix() <= WIDE_PREFIX_MAX)
            .collect();
        if wide.is_empty() {
            return;
        }

        for _ in 0..FILL_SWEEPS {
            if picked.len() >= budget {
                break;
            }
            let shortfall = budget - picked.len();
            let share = shortfall.div_ceil(wide.len());
            let mut grew = false;

            for block in &wide {
                for _ in 0..share {
                    if picked.len() >= budget {
                        return;
                    }
                    if self.fill_one(block, picked) {
                        grew = true;
                    }
                }
            }

            if !grew {
                break;
            }
        }
    }

    /// One share unit: draws host offsets until one lands on an unseen
    /// address with an unreserved last octet, giving up after
    /// [`FILL_DRAW_ATTEMPTS`] rejections.
    fn fill_one(&mut self, block: &AddressBlock, picked: &mut Vec<Ipv4Addr>) -> bool {
        let start: u32 = u32::from(block.network());
        for _ in 0..FILL_DRAW_ATTEMPTS {
            let offset = self.rng.random_range(0..=block.host_span());
            let addr = Ipv4Addr::from(start + offset);
            let last = addr.octets()[3];
            if last == 0 || last == 255 {
                continue;
            }
            if self.push_unique(addr, picked) {
                return true;
            }
        }
        false
    }

    fn push_unique(&mut self, addr: Ipv4Addr, picked: &mut Vec<Ipv4Addr>) -> bool {
        if self.seen.insert(addr) {
            picked.push(addr);
            true
        } else {
            false
        }
    }
}

impl Default for SampleSession {
    fn default() -> Self {
        Self::new()
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
    use frontr_common::config::RangeFile;

    fn block(spec: &str) -> AddressBlock {
        spec.parse().unwrap()
    }

    #[test]
    fn test_slash_32_returns_exact_address() {
        let mut session = SampleSession::with_seed(1);
        let picked = session.sample(&[block("198.41.200.7/32")], 5);

        assert_eq!(picked, vec![Ipv4Addr::new(198, 41, 200, 7)]);
    }

    #[test]
    fn test_narrow_block_yields_single_address_in_range() {
        for seed in 0..32 {
            let mut session = SampleSession::with_seed(seed);
            let target = block("192.0.2.0/24");
            let picked = session.sample(&[target], 5);

            assert_eq!(picked.len(), 1);
            assert!(target.contains(picked[0]));
        }
    }

    #[test]
    fn test_wide_block_stays_in_bounds() {
        let mut session = SampleSession::with_seed(9);
        let target = block("198.41.128.0/17");
        let picked = session.sample(&[target], 5);

        assert_eq!(picked.len(), 5);
        for addr in &picked {
            assert!(target.contains(*addr), "{addr} escaped {target}");
        }
    }

    #[test]
    fn test_stride_walk_caps_at_available_strides() {
        // A /23 only holds two /24 strides, one pick each.
        let mut session = SampleSession::with_seed(2);
        let picked = session.sample(&[block("104.16.0.0/23")], 10);

        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_candidates_are_unique_and_within_blocks() {
        let blocks = RangeFile::builtin().blocks();
        let mut session = SampleSession::with_seed(4);
        let picked = session.sample(&blocks, 100);

        assert_eq!(picked.len(), 100);
        let distinct: HashSet<Ipv4Addr> = picked.iter().copied().collect();
        assert_eq!(distinct.len(), picked.len());
        for addr in &picked {
            assert!(blocks.iter().any(|b| b.contains(*addr)), "{addr} outside every block");
        }
    }

    #[test]
    fn test_no_reserved_endings_from_stride_or_fill_paths() {
        // Every builtin block is wider than /24, so neither sampling path
        // may ever emit a .0 or .255 ending.
        let blocks = RangeFile::builtin().blocks();
        let mut session = SampleSession::with_seed(6);
        let picked = session.sample(&blocks, 500);

        for addr in &picked {
            let last = addr.octets()[3];
            assert!(last != 0 && last != 255, "{addr} has a reserved ending");
        }
    }

    #[test]
    fn test_supplemental_fill_tops_up_wide_blocks() {
        // A /18 holds 64 strides, so the first pass alone cannot reach 100.
        let target = block("141.101.64.0/18");
        let mut session = SampleSession::with_seed(5);
        let picked = session.sample(&[target], 100);

        assert_eq!(picked.len(), 100);
        for addr in &picked {
            assert!(target.contains(*addr));
        }
    }

    #[test]
    fn test_supplemental_fill_reaches_budget_across_seeds() {
        // A lone /18 leans on the fill path for most of a 200-address
        // budget. A rejected draw must be redrawn, not mistaken for an
        // exhausted block, so no seed may come back short and no fill
        // draw may carry a reserved ending.
        let target = block("141.101.64.0/18");
        for seed in 0..200 {
            let mut session = SampleSession::with_seed(seed);
            let picked = session.sample(&[target], 200);

            assert_eq!(picked.len(), 200, "seed {seed} underfilled");
            for addr in &picked {
                let last = addr.octets()[3];
                assert!(last != 0 && last != 255, "seed {seed} emitted {addr}");
                assert!(target.contains(*addr));
            }
        }
    }

    #[test]
    fn test_shortfall_without_wide_blocks_returns_partial() {
        // Two /23 strides apiece and nothing wide enough to top up.
        let blocks = [block("104.16.0.0/23"), block("172.64.0.0/23")];
        let mut session = SampleSession::with_seed(8);
        let picked = session.sample(&blocks, 50);

        assert_eq!(picked.len(), 4);
    }

    #[test]
    fn test_seeded_sessions_reproduce() {
        let blocks = RangeFile::builtin().blocks();
        let first = SampleSession::with_seed(42).sample(&blocks, 40);
        let second = SampleSession::with_seed(42).sample(&blocks, 40);

        assert_eq!(first, second);
    }
}
