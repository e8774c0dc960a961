//! Collects many unique color sets.
//!
//! A master PRNG hands out one seed per missing set. Each seed starts an
//! attempt chain (`seed`, `seed + 1`, ...) that runs until one attempt
//! yields a set. Chains run in parallel on the rayon pool; their results
//! merge into an ordered set, and rounds repeat until enough unique sets
//! exist. The outcome depends only on the configuration and the catalog,
//! never on the number of threads.

use std::collections::BTreeSet;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::set::{Attempt, ColorSet, SetGenerator};

/// Largest per-chain seed drawn by the master PRNG.
pub const MAX_CHAIN_SEED: u64 = 1 << 32;

/// Attempts per chain after which a warning is logged (and then every
/// further multiple of it).
const SLOW_CHAIN_ATTEMPTS: u64 = 10_000;

/// Runs a [`SetGenerator`] until `num_sets` unique sets are collected.
///
/// Sets come back in canonical order (lexicographic over their sorted
/// colors). Does not return if the catalog admits fewer than `num_sets`
/// distinct sets.
pub fn generate_sets(generator: &SetGenerator<'_>) -> Vec<ColorSet> {
    let config = generator.config();
    let target = config.num_sets;
    let mut master = StdRng::seed_from_u64(config.seed);
    let mut results = BTreeSet::new();
    let start = Instant::now();

    let mut round = 0;
    while results.len() < target {
        let num_left = target - results.len();
        let seeds: Vec<u64> = (0..num_left)
            .map(|_| master.gen_range(1..=MAX_CHAIN_SEED))
            .collect();
        let new_sets: Vec<ColorSet> = seeds
            .into_par_iter()
            .enumerate()
            .map(|(chain, seed)| run_chain(generator, seed, round, chain))
            .collect();
        results.extend(new_sets);
        round += 1;
        info!(
            round,
            unique = results.len(),
            remaining = target - results.len(),
            "set generation round finished"
        );
    }

    info!(
        sets = results.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "color sets generated"
    );
    results.into_iter().collect()
}

/// Tries `seed`, `seed + 1`, ... until an attempt succeeds.
pub fn run_chain(generator: &SetGenerator<'_>, seed: u64, round: usize, chain: usize) -> ColorSet {
    let mut offset: u64 = 0;
    loop {
        let current = seed.wrapping_add(offset);
        match generator.attempt(current) {
            Attempt::Generated(set) => {
                debug!(round, chain, seed, offset, "set generated");
                return set;
            }
            Attempt::Exhausted { position } => {
                debug!(round, chain, seed, offset, position, "attempt ran out of candidates");
            }
            Attempt::FinerCvdCheckFailed { severity } => {
                debug!(round, chain, seed, offset, severity, "attempt failed finer CVD check");
            }
        }
        offset += 1;
        if offset % SLOW_CHAIN_ATTEMPTS == 0 {
            warn!(
                round,
                chain,
                seed,
                attempts = offset,
                "set generation keeps failing, constraints may be too tight"
            );
        }
    }
}
