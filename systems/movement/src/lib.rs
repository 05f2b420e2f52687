#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Direction selectors that decide where each actor steps on every tick.

use std::collections::VecDeque;

use rand::{seq::IteratorRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use wandering_core::{Direction, DirectionSelector, DirectionSet};

/// Configuration parameters required to construct a seeded random walk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    rng_seed: u64,
}

impl Config {
    /// Creates a new configuration using the provided seed.
    #[must_use]
    pub const fn new(rng_seed: u64) -> Self {
        Self { rng_seed }
    }

    /// Seed that initialises the random number generator.
    #[must_use]
    pub const fn rng_seed(&self) -> u64 {
        self.rng_seed
    }
}

/// Selector that picks uniformly among the legal directions.
#[derive(Clone, Debug)]
pub struct RandomWalk {
    rng: ChaCha8Rng,
}

impl RandomWalk {
    /// Creates a reproducible walk from the supplied configuration.
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(config.rng_seed()),
        }
    }

    /// Creates a walk seeded from operating system entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }
}

impl DirectionSelector for RandomWalk {
    fn select(&mut self, legal: DirectionSet) -> Option<Direction> {
        legal.iter().choose(&mut self.rng)
    }
}

/// Selector that replays a fixed script of directions, cycling once exhausted.
///
/// A scripted direction that is not legal for the asking actor is replaced by
/// the first legal direction in canonical order.
#[derive(Clone, Debug, Default)]
pub struct ScriptedWalk {
    script: VecDeque<Direction>,
}

impl ScriptedWalk {
    /// Creates a selector from the provided script.
    #[must_use]
    pub fn new<I>(script: I) -> Self
    where
        I: IntoIterator<Item = Direction>,
    {
        Self {
            script: script.into_iter().collect(),
        }
    }

    fn next_scripted(&mut self) -> Option<Direction> {
        let direction = self.script.pop_front()?;
        self.script.push_back(direction);
        Some(direction)
    }
}

impl DirectionSelector for ScriptedWalk {
    fn select(&mut self, legal: DirectionSet) -> Option<Direction> {
        match self.next_scripted() {
            Some(direction) if legal.contains(direction) => Some(direction),
            _ => legal.iter().next(),
        }
    }
}
