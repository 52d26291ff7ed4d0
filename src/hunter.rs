//! The player-controlled hunter.

use tracing::trace;

use crate::{
    board::Terrain,
    model::{Coordinate, Direction},
};

/// Lives the hunter starts every game with.
pub const STARTING_LIVES: u32 = 3;

/// The player entity: a position plus the lives and score it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hunter {
    /// Current cell.
    pub(crate) position: Coordinate,
    /// Lives left; the game is lost when this reaches zero.
    pub(crate) lives: u32,
    /// Sum of the values of every treasure collected this game.
    pub(crate) score: u32,
}

impl Default for Hunter {
    fn default() -> Self {
        Self::new()
    }
}

impl Hunter {
    /// Creates a hunter at the origin with full lives and no score.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: Coordinate::ORIGIN,
            lives: STARTING_LIVES,
            score: 0,
        }
    }

    /// Current cell.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Lives left.
    #[must_use]
    pub const fn lives(&self) -> u32 {
        self.lives
    }

    /// Score so far.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Whether the hunter stands on `coordinate`.
    #[must_use]
    pub fn is_at(&self, coordinate: Coordinate) -> bool {
        self.position == coordinate
    }

    /// Moves one cell in `direction`.
    ///
    /// A destination off the grid or on a wall rejects the move: nothing changes and `false` is
    /// returned. The interactions a successful move triggers are resolved by the session, which
    /// owns the treasures and the roster.
    pub fn step(&mut self, direction: Direction, terrain: &Terrain) -> bool {
        match terrain.step(self.position, direction) {
            Some(target) => {
                trace!(from = %self.position, to = %target, "hunter moved");
                self.position = target;
                true
            }
            None => false,
        }
    }

    /// Adds a treasure's value to the score and returns the new score.
    pub(crate) fn collect(&mut self, value: u32) -> u32 {
        self.score = self.score.saturating_add(value);
        self.score
    }

    /// Takes one life and returns how many are left.
    pub(crate) fn wound(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    /// Puts the hunter back at the origin with full lives and no score.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_hunter() {
        let hunter = Hunter::default();

        assert_eq!(hunter.position(), Coordinate::ORIGIN);
        assert_eq!(hunter.lives(), STARTING_LIVES);
        assert_eq!(hunter.score(), 0);
    }

    #[test]
    fn test_step_moves_into_free_cell() {
        let terrain = Terrain::new(5);
        let mut hunter = Hunter::new();

        assert!(hunter.step(Direction::Right, &terrain));
        assert!(hunter.step(Direction::Down, &terrain));
        assert_eq!(hunter.position(), Coordinate::new(1, 1));
    }

    #[test]
    fn test_rejected_steps_change_nothing() {
        let terrain = Terrain::with_walls(5, [Coordinate::new(1, 0)]);
        let mut hunter = Hunter::new();
        hunter.score = 200;
        hunter.lives = 2;
        let before = hunter.clone();

        assert!(!hunter.step(Direction::Right, &terrain), "wall");
        assert!(!hunter.step(Direction::Left, &terrain), "off the grid");
        assert!(!hunter.step(Direction::Up, &terrain), "off the grid");
        assert_eq!(hunter, before);
    }

    #[test]
    fn test_collect_wound_and_reset() {
        let mut hunter = Hunter::new();

        assert_eq!(hunter.collect(100), 100);
        assert_eq!(hunter.collect(100), 200);
        assert_eq!(hunter.wound(), 2);
        assert_eq!(hunter.wound(), 1);
        assert_eq!(hunter.wound(), 0);
        assert_eq!(hunter.wound(), 0, "lives never go below zero");

        hunter.position = Coordinate::new(4, 4);
        hunter.reset();
        assert_eq!(hunter, Hunter::new());
    }
}
