//! Autonomous enemies and their movement strategies.

use rand::{seq::SliceRandom as _, Rng};
use tracing::trace;

use crate::{
    board::Terrain,
    model::{Coordinate, Direction, Strategy},
    pathfinding,
};

/// An adversary that moves once per tick according to its [`Strategy`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Enemy {
    /// Current cell.
    position: Coordinate,
    /// How the enemy picks its next cell.
    strategy: Strategy,
    /// Index into the freshly computed path, advanced by [`Strategy::Patrol`] only.
    patrol_cursor: usize,
}

impl Enemy {
    /// Creates an enemy on `position`.
    #[must_use]
    pub const fn new(position: Coordinate, strategy: Strategy) -> Self {
        Self {
            position,
            strategy,
            patrol_cursor: 0,
        }
    }

    /// Creates an enemy on a uniformly random corner of the board.
    ///
    /// Walled corners and the cells in `taken` are avoided. If that rules out every corner the
    /// taken ones are allowed back in; the origin is never walled, so some corner always
    /// remains.
    pub fn spawn<R>(terrain: &Terrain, taken: &[Coordinate], strategy: Strategy, rng: &mut R) -> Self
    where
        R: Rng + ?Sized,
    {
        let open: Vec<Coordinate> = Coordinate::corners(terrain.size())
            .into_iter()
            .filter(|corner| !terrain.is_wall(*corner))
            .collect();
        let free: Vec<Coordinate> = open
            .iter()
            .copied()
            .filter(|corner| !taken.contains(corner))
            .collect();

        let pool = if free.is_empty() { &open } else { &free };
        let position = pool.choose(rng).copied().unwrap_or(Coordinate::ORIGIN);

        Self::new(position, strategy)
    }

    /// Current cell.
    #[must_use]
    pub const fn position(&self) -> Coordinate {
        self.position
    }

    /// Movement strategy.
    #[must_use]
    pub const fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Current patrol cursor.
    #[must_use]
    pub const fn patrol_cursor(&self) -> usize {
        self.patrol_cursor
    }

    /// Whether the enemy stands on `coordinate`.
    #[must_use]
    pub fn is_at(&self, coordinate: Coordinate) -> bool {
        self.position == coordinate
    }

    /// Takes one move according to the strategy, chasing `hunter` where the strategy does.
    ///
    /// Checking whether the move caught the hunter is left to the caller.
    pub fn advance<R>(&mut self, terrain: &Terrain, hunter: Coordinate, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        let from = self.position;

        match self.strategy {
            Strategy::Random => self.wander(terrain, rng),
            Strategy::Seek => self.seek(terrain, hunter),
            Strategy::Patrol => self.patrol(terrain, hunter),
        }

        trace!(strategy = ?self.strategy, %from, to = %self.position, "enemy moved");
    }

    /// One step in a random direction; a blocked draw means standing still this tick.
    fn wander<R>(&mut self, terrain: &Terrain, rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        if let Some(target) = Direction::ALL
            .choose(rng)
            .and_then(|direction| terrain.step(self.position, *direction))
        {
            self.position = target;
        }
    }

    /// One hop along the shortest path to the hunter.
    fn seek(&mut self, terrain: &Terrain, hunter: Coordinate) {
        let path = pathfinding::shortest_path(terrain, self.position, hunter);
        if let Some(next) = path.get(1) {
            self.position = *next;
        }
    }

    /// Advances the cursor through a path recomputed this very tick and jumps to that cell.
    ///
    /// The path changes every tick, so the cursor does not trace a stable route.
    fn patrol(&mut self, terrain: &Terrain, hunter: Coordinate) {
        let path = pathfinding::shortest_path(terrain, self.position, hunter);
        if path.len() > 1 {
            self.patrol_cursor = (self.patrol_cursor + 1) % path.len();
            if let Some(next) = path.get(self.patrol_cursor) {
                self.position = *next;
            }
        }
    }
}
