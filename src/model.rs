//! Value types shared by the engine components and the front-end.
//!
//! Everything in here is plain data: coordinates and directions on the square grid, the
//! difficulty presets with their numeric table, the intents the input layer feeds in and the
//! events the engine hands back.

use std::fmt;

use clap::ValueEnum;

use crate::board::Snapshot;

/// Cell position on the board.
///
/// Both components lie in `0..size` for the board the coordinate belongs to. Ordering is by `x`
/// first, which keeps every ordered collection of coordinates (walls, treasures) deterministic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coordinate {
    /// Column, growing to the right.
    pub x: usize,
    /// Row, growing downwards.
    pub y: usize,
}

impl Coordinate {
    /// Top-left cell, where the hunter starts every game.
    pub const ORIGIN: Self = Self::new(0, 0);

    /// Builds a coordinate from its column and row.
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Returns the neighbouring cell in `direction`, or `None` if it falls off a board with the
    /// given edge length.
    #[must_use]
    pub fn step(self, direction: Direction, size: usize) -> Option<Self> {
        let (dx, dy) = direction.delta();
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;

        (x < size && y < size).then_some(Self { x, y })
    }

    /// The four corners of a board with the given edge length, starting at the origin.
    #[must_use]
    pub const fn corners(size: usize) -> [Self; 4] {
        let far = size.saturating_sub(1);
        [
            Self::new(0, 0),
            Self::new(far, 0),
            Self::new(0, far),
            Self::new(far, far),
        ]
    }
}

impl From<(usize, usize)> for Coordinate {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}, {})", self.x, self.y)
    }
}

/// One of the four unit cardinal moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `+x`.
    Right,
    /// `-x`.
    Left,
    /// `+y`.
    Down,
    /// `-y`.
    Up,
}

impl Direction {
    /// All directions in neighbour-exploration priority order: `+x`, `-x`, `+y`, `-y`.
    ///
    /// Path search depends on this order for its tie-breaking, so it must not be reshuffled.
    pub const ALL: [Self; 4] = [Self::Right, Self::Left, Self::Down, Self::Up];

    /// Returns the `(dx, dy)` offset of this direction.
    #[must_use]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Self::Right => (1, 0),
            Self::Left => (-1, 0),
            Self::Down => (0, 1),
            Self::Up => (0, -1),
        }
    }
}

/// Named preset controlling the board population and how enemies behave.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Difficulty {
    /// Few walls, wandering enemies, no roster growth.
    #[default]
    Easy,
    /// Enemies chase the hunter and the roster doubles on every pickup.
    Normal,
    /// Enemies patrol towards the hunter and the roster triples on every pickup.
    Hard,
}

impl Difficulty {
    /// Every difficulty, from easiest to hardest.
    pub const ALL: [Self; 3] = [Self::Easy, Self::Normal, Self::Hard];

    /// Number of treasures placed on a fresh board.
    #[must_use]
    pub const fn treasure_count(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Normal => 4,
            Self::Hard => 5,
        }
    }

    /// Number of walls placed on a fresh board.
    #[must_use]
    pub const fn wall_count(self) -> usize {
        match self {
            Self::Easy => 10,
            Self::Normal => 14,
            Self::Hard => 16,
        }
    }

    /// Size of the enemy roster right after a reset.
    #[must_use]
    pub const fn starting_enemies(self) -> usize {
        match self {
            Self::Easy => 1,
            Self::Normal | Self::Hard => 2,
        }
    }

    /// Movement strategy handed to every enemy spawned under this difficulty.
    #[must_use]
    pub const fn strategy(self) -> Strategy {
        match self {
            Self::Easy => Strategy::Random,
            Self::Normal => Strategy::Seek,
            Self::Hard => Strategy::Patrol,
        }
    }

    /// Extra enemies spawned per existing enemy whenever a treasure is picked up.
    #[must_use]
    pub const fn growth_multiplier(self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Normal => 1,
            Self::Hard => 2,
        }
    }

    /// Human readable name.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Normal => "Normal",
            Self::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

/// Enemy movement strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// One uniformly random step per tick, dropped when blocked.
    Random,
    /// One hop along the shortest path to the hunter.
    Seek,
    /// Cursor-driven walk along a path to the hunter recomputed every tick.
    Patrol,
}

/// Command delivered by the input layer, consumed one at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intent {
    /// Move the hunter one cell up.
    MoveUp,
    /// Move the hunter one cell down.
    MoveDown,
    /// Move the hunter one cell left.
    MoveLeft,
    /// Move the hunter one cell right.
    MoveRight,
    /// Start over with the active difficulty.
    NewGame,
    /// Switch difficulty, which also starts over.
    SetDifficulty(Difficulty),
}

/// Terminal state of a game. Either one is immediately followed by a reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The last treasure was collected.
    Won,
    /// The hunter ran out of lives.
    Lost,
}

/// Notification produced by an engine operation, in the order things happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The hunter's lives changed, either from a hit or from a reset.
    LivesChanged {
        /// Lives left.
        lives: u32,
    },
    /// The hunter picked up a treasure.
    TreasureCollected {
        /// Cell the treasure was on.
        at: Coordinate,
        /// Value added to the score.
        value: u32,
        /// Score after the pickup.
        score: u32,
    },
    /// The enemy roster grew after a pickup.
    EnemiesGrown {
        /// Roster size after growing.
        roster: usize,
    },
    /// The game ended; a fresh one has already been set up.
    Finished(Outcome),
    /// State after the operation, emitted last by every mutating operation.
    BoardUpdated(Snapshot),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_stays_inside_board() {
        let origin = Coordinate::ORIGIN;

        assert_eq!(origin.step(Direction::Right, 5), Some(Coordinate::new(1, 0)));
        assert_eq!(origin.step(Direction::Down, 5), Some(Coordinate::new(0, 1)));
        assert_eq!(origin.step(Direction::Left, 5), None);
        assert_eq!(origin.step(Direction::Up, 5), None);
        assert_eq!(Coordinate::new(4, 4).step(Direction::Right, 5), None);
        assert_eq!(Coordinate::new(4, 4).step(Direction::Down, 5), None);
    }

    #[test]
    fn test_corners() {
        assert_eq!(
            Coordinate::corners(15),
            [
                Coordinate::new(0, 0),
                Coordinate::new(14, 0),
                Coordinate::new(0, 14),
                Coordinate::new(14, 14),
            ]
        );
    }

    #[test]
    fn test_difficulty_table() {
        assert_eq!(Difficulty::default(), Difficulty::Easy);

        let table: Vec<_> = Difficulty::ALL
            .iter()
            .map(|difficulty| {
                (
                    difficulty.treasure_count(),
                    difficulty.wall_count(),
                    difficulty.starting_enemies(),
                    difficulty.strategy(),
                    difficulty.growth_multiplier(),
                )
            })
            .collect();

        assert_eq!(
            table,
            vec![
                (3, 10, 1, Strategy::Random, 0),
                (4, 14, 2, Strategy::Seek, 1),
                (5, 16, 2, Strategy::Patrol, 2),
            ]
        );
    }
}
