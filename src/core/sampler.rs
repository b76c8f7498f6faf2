use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Profile, ProfileId};

pub const DEFAULT_MAX_CANDIDATES: usize = 3;
pub const DEFAULT_SEARCH_POOL_LIMIT: usize = 15;

/// Draws a small random sample of match candidates from a working pool
///
/// The sampler holds no generator of its own: each draw takes the caller's
/// RNG, so concurrent requests never share random state and tests can pin a
/// seed.
#[derive(Debug, Clone, Copy)]
pub struct CandidateSampler {
    max_candidates: usize,
    search_pool_limit: usize,
}

impl CandidateSampler {
    /// `max_candidates` is clamped to `1..=DEFAULT_MAX_CANDIDATES`; a draw
    /// never returns more than three profiles.
    pub fn new(max_candidates: usize, search_pool_limit: usize) -> Self {
        Self {
            max_candidates: max_candidates.clamp(1, DEFAULT_MAX_CANDIDATES),
            search_pool_limit: search_pool_limit.max(1),
        }
    }

    pub fn max_candidates(&self) -> usize {
        self.max_candidates
    }

    /// Cap on how many profiles a saved search contributes to the pool
    pub fn search_pool_limit(&self) -> usize {
        self.search_pool_limit
    }

    /// Draw up to `max_candidates` distinct profiles uniformly without
    /// replacement.
    ///
    /// Profiles sharing an ID count once (first occurrence wins). An empty
    /// pool yields an empty sample; a pool smaller than the cap is returned
    /// in full, in random order.
    pub fn draw<R: Rng + ?Sized>(&self, pool: &[Profile], rng: &mut R) -> Vec<Profile> {
        let mut seen: HashSet<ProfileId> = HashSet::with_capacity(pool.len());
        let distinct: Vec<&Profile> = pool.iter().filter(|p| seen.insert(p.id)).collect();

        let count = self.max_candidates.min(distinct.len());
        if count == 0 {
            return Vec::new();
        }

        distinct
            .choose_multiple(rng, count)
            .map(|p| (*p).clone())
            .collect()
    }
}

impl Default for CandidateSampler {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CANDIDATES, DEFAULT_SEARCH_POOL_LIMIT)
    }
}
