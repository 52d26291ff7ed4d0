//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use rand::{rngs::StdRng, SeedableRng as _};

use crate::model::Difficulty;

/// Board edge length used when none is given.
pub const DEFAULT_BOARD_SIZE: u16 = 15;

/// Milliseconds between enemy ticks when none is given.
pub const DEFAULT_TICK_MS: u64 = 1000;

/// Settings for a game, parsed from the command line.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Edge length of the square board, in cells.
    #[arg(
        long,
        default_value_t = DEFAULT_BOARD_SIZE,
        value_parser = clap::value_parser!(u16).range(6..=64)
    )]
    pub size: u16,
    /// Difficulty the first game starts with.
    #[arg(long, value_enum, default_value_t = Difficulty::Easy)]
    pub difficulty: Difficulty,
    /// Milliseconds between two enemy moves.
    #[arg(long = "tick-ms", default_value_t = DEFAULT_TICK_MS)]
    pub tick_ms: u64,
    /// Seed for the random number generator, for reproducible games.
    #[arg(long)]
    pub seed: Option<u64>,
    /// File to write logs to. Nothing is logged without one.
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            difficulty: Difficulty::Easy,
            tick_ms: DEFAULT_TICK_MS,
            seed: None,
            log_file: None,
        }
    }
}

impl Config {
    /// Board edge length as an index type.
    #[must_use]
    pub fn board_size(&self) -> usize {
        usize::from(self.size)
    }

    /// Time between two enemy ticks.
    #[must_use]
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Random number generator for the engine, seeded from `seed` when present and from the
    /// operating system otherwise.
    #[must_use]
    pub fn rng(&self) -> StdRng {
        self.seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64)
    }
}
