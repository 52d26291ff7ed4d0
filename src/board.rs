//! Board state and randomized placement.
//!
//! The board is split in two layers. [`Terrain`] is the fixed part, the edge length and the wall
//! set, which never changes for the lifetime of a board. [`Board`] adds the dynamic part on top:
//! the remaining treasures, the hunter and the enemy roster.

use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use tracing::debug;

use crate::{
    enemy::Enemy,
    error::{EngineError, Placement},
    hunter::Hunter,
    model::{Coordinate, Difficulty, Direction},
};

/// Score awarded for every treasure.
pub const TREASURE_VALUE: u32 = 100;

/// Random draws allowed per board cell before a placement pass gives up.
pub const PLACEMENT_ATTEMPTS_PER_CELL: usize = 64;

/// Fixed layer of a board: its edge length and its walls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Terrain {
    /// Edge length of the square grid.
    pub(crate) size: usize,
    /// Impassable cells.
    pub(crate) walls: BTreeSet<Coordinate>,
}

impl Terrain {
    /// Creates an open terrain with no walls.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self {
            size,
            walls: BTreeSet::new(),
        }
    }

    /// Creates a terrain with the given walls. Walls outside the grid are dropped.
    #[must_use]
    pub fn with_walls<I>(size: usize, walls: I) -> Self
    where
        I: IntoIterator<Item = Coordinate>,
    {
        Self {
            size,
            walls: walls
                .into_iter()
                .filter(|wall| wall.x < size && wall.y < size)
                .collect(),
        }
    }

    /// Edge length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Impassable cells, in coordinate order.
    #[must_use]
    pub const fn walls(&self) -> &BTreeSet<Coordinate> {
        &self.walls
    }

    /// Whether `coordinate` lies on the grid.
    #[must_use]
    pub const fn contains(&self, coordinate: Coordinate) -> bool {
        coordinate.x < self.size && coordinate.y < self.size
    }

    /// Whether `coordinate` is a wall.
    #[must_use]
    pub fn is_wall(&self, coordinate: Coordinate) -> bool {
        self.walls.contains(&coordinate)
    }

    /// Returns the neighbour of `from` in `direction` if it is on the grid and not a wall.
    ///
    /// This is the single movement rule shared by the hunter, wandering enemies and the path
    /// search.
    #[must_use]
    pub fn step(&self, from: Coordinate, direction: Direction) -> Option<Coordinate> {
        from.step(direction, self.size)
            .filter(|target| !self.is_wall(*target))
    }
}

/// Complete board state: terrain, treasures and every entity.
#[derive(Clone, Debug)]
pub struct Board {
    /// Edge length and walls.
    pub(crate) terrain: Terrain,
    /// Remaining treasures and their values.
    pub(crate) treasures: BTreeMap<Coordinate, u32>,
    /// The player entity.
    pub(crate) hunter: Hunter,
    /// Enemy roster in movement order.
    pub(crate) enemies: Vec<Enemy>,
}

impl Board {
    /// Creates an empty board with a fresh hunter at the origin and no enemies.
    #[must_use]
    pub const fn new(size: usize) -> Self {
        Self {
            terrain: Terrain::new(size),
            treasures: BTreeMap::new(),
            hunter: Hunter::new(),
            enemies: Vec::new(),
        }
    }

    /// Edge length of the grid.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.terrain.size
    }

    /// The fixed layer of the board.
    #[must_use]
    pub const fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Remaining treasures keyed by position.
    #[must_use]
    pub const fn treasures(&self) -> &BTreeMap<Coordinate, u32> {
        &self.treasures
    }

    /// The hunter.
    #[must_use]
    pub const fn hunter(&self) -> &Hunter {
        &self.hunter
    }

    /// The enemy roster.
    #[must_use]
    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Whether `coordinate` holds a wall, the hunter or an enemy.
    ///
    /// Only placement consults this. During play entities are free to share cells, that is what
    /// triggers interactions.
    #[must_use]
    pub fn is_occupied(&self, coordinate: Coordinate) -> bool {
        self.terrain.is_wall(coordinate)
            || self.hunter.is_at(coordinate)
            || self.enemies.iter().any(|enemy| enemy.is_at(coordinate))
    }

    /// Places `count` distinct walls on uniformly random free cells.
    ///
    /// # Errors
    ///
    /// [`EngineError::PlacementUnsatisfiable`] if there are not enough free cells or the attempt
    /// budget runs out first. The board is left untouched in that case.
    pub fn place_walls<R>(&mut self, count: usize, rng: &mut R) -> Result<(), EngineError>
    where
        R: Rng + ?Sized,
    {
        let walls = self.sample_free_cells(Placement::Walls, count, rng)?;
        debug!(count, "placed walls");
        self.terrain.walls.extend(walls);

        Ok(())
    }

    /// Places `count` distinct treasures worth [`TREASURE_VALUE`] on uniformly random free cells.
    ///
    /// # Errors
    ///
    /// [`EngineError::PlacementUnsatisfiable`] under the same conditions as
    /// [`place_walls`](Board::place_walls).
    pub fn place_treasures<R>(&mut self, count: usize, rng: &mut R) -> Result<(), EngineError>
    where
        R: Rng + ?Sized,
    {
        let treasures = self.sample_free_cells(Placement::Treasures, count, rng)?;
        debug!(count, "placed treasures");
        self.treasures
            .extend(treasures.into_iter().map(|at| (at, TREASURE_VALUE)));

        Ok(())
    }

    /// Builds the read-only view handed to the front-end.
    #[must_use]
    pub fn snapshot(&self, difficulty: Difficulty) -> Snapshot {
        Snapshot {
            size: self.size(),
            walls: self.terrain.walls.iter().copied().collect(),
            treasures: self
                .treasures
                .iter()
                .map(|(at, value)| (*at, *value))
                .collect(),
            hunter: self.hunter.position(),
            enemies: self.enemies.iter().map(Enemy::position).collect(),
            lives: self.hunter.lives(),
            score: self.hunter.score(),
            difficulty,
        }
    }

    /// A cell accepts a new wall or treasure if nothing at all is on it yet.
    fn is_free(&self, coordinate: Coordinate) -> bool {
        !self.is_occupied(coordinate) && !self.treasures.contains_key(&coordinate)
    }

    /// Rejection-samples `count` distinct free cells, with a bounded number of draws.
    fn sample_free_cells<R>(
        &self,
        kind: Placement,
        count: usize,
        rng: &mut R,
    ) -> Result<BTreeSet<Coordinate>, EngineError>
    where
        R: Rng + ?Sized,
    {
        let size = self.size();
        let cells = size.saturating_mul(size);
        let unsatisfiable = |placed| EngineError::PlacementUnsatisfiable {
            kind,
            requested: count,
            placed,
            size,
        };

        let free = (0..cells)
            .map(|index| Coordinate::new(index % size, index / size))
            .filter(|cell| self.is_free(*cell))
            .count();
        if free < count {
            return Err(unsatisfiable(0));
        }

        let mut picked = BTreeSet::new();
        for _ in 0..cells.saturating_mul(PLACEMENT_ATTEMPTS_PER_CELL) {
            if picked.len() == count {
                break;
            }

            let candidate = Coordinate::new(rng.gen_range(0..size), rng.gen_range(0..size));
            if self.is_free(candidate) {
                let _ = picked.insert(candidate);
            }
        }

        if picked.len() < count {
            return Err(unsatisfiable(picked.len()));
        }

        Ok(picked)
    }
}

/// Immutable view of the engine state, the only thing the view layer ever reads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    /// Edge length of the grid.
    pub size: usize,
    /// Walls in coordinate order.
    pub walls: Vec<Coordinate>,
    /// Remaining treasures with their values, in coordinate order.
    pub treasures: Vec<(Coordinate, u32)>,
    /// Hunter position.
    pub hunter: Coordinate,
    /// Enemy positions in roster order.
    pub enemies: Vec<Coordinate>,
    /// Hunter lives.
    pub lives: u32,
    /// Hunter score.
    pub score: u32,
    /// Active difficulty.
    pub difficulty: Difficulty,
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng as _};

    use super::*;
    use crate::model::Strategy;

    #[test]
    fn test_terrain_step_blocks_walls_and_edges() {
        let terrain = Terrain::with_walls(3, [Coordinate::new(1, 0), Coordinate::new(7, 7)]);

        assert_eq!(terrain.walls().len(), 1, "out-of-grid walls are dropped");
        assert_eq!(terrain.step(Coordinate::ORIGIN, Direction::Right), None);
        assert_eq!(terrain.step(Coordinate::ORIGIN, Direction::Up), None);
        assert_eq!(
            terrain.step(Coordinate::ORIGIN, Direction::Down),
            Some(Coordinate::new(0, 1))
        );
    }

    #[test]
    fn test_is_occupied() {
        let mut board = Board::new(5);
        board.terrain = Terrain::with_walls(5, [Coordinate::new(2, 2)]);
        board
            .enemies
            .push(Enemy::new(Coordinate::new(4, 4), Strategy::Seek));
        let _ = board.treasures.insert(Coordinate::new(3, 3), TREASURE_VALUE);

        assert!(board.is_occupied(Coordinate::ORIGIN), "hunter cell");
        assert!(board.is_occupied(Coordinate::new(2, 2)), "wall cell");
        assert!(board.is_occupied(Coordinate::new(4, 4)), "enemy cell");
        assert!(
            !board.is_occupied(Coordinate::new(3, 3)),
            "treasures do not count as occupants"
        );
        assert!(!board.is_occupied(Coordinate::new(1, 1)));
    }

    #[test]
    fn test_placement_keeps_layers_disjoint() {
        for seed in 0..32 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut board = Board::new(15);
            board
                .enemies
                .push(Enemy::new(Coordinate::new(14, 0), Strategy::Random));
            board
                .enemies
                .push(Enemy::new(Coordinate::new(14, 14), Strategy::Random));

            board
                .place_walls(16, &mut rng)
                .expect("walls should fit on a 15x15 board");
            board
                .place_treasures(5, &mut rng)
                .expect("treasures should fit on a 15x15 board");

            assert_eq!(board.terrain().walls().len(), 16);
            assert_eq!(board.treasures().len(), 5);
            assert!(board.treasures().values().all(|value| *value == TREASURE_VALUE));
            for wall in board.terrain().walls() {
                assert!(!board.treasures().contains_key(wall), "seed {seed}");
                assert!(!board.hunter().is_at(*wall), "seed {seed}");
                assert!(
                    board.enemies().iter().all(|enemy| !enemy.is_at(*wall)),
                    "seed {seed}"
                );
            }
            for treasure in board.treasures().keys() {
                assert!(!board.hunter().is_at(*treasure), "seed {seed}");
                assert!(
                    board.enemies().iter().all(|enemy| !enemy.is_at(*treasure)),
                    "seed {seed}"
                );
            }
        }
    }

    #[test]
    fn test_placement_fails_when_cells_run_out() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut board = Board::new(2);

        let result = board.place_walls(10, &mut rng);

        assert_eq!(
            result,
            Err(EngineError::PlacementUnsatisfiable {
                kind: Placement::Walls,
                requested: 10,
                placed: 0,
                size: 2,
            })
        );
        assert!(board.terrain().walls().is_empty(), "board is left untouched");
    }

    #[test]
    fn test_placement_fills_every_free_cell() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut board = Board::new(3);

        board
            .place_walls(8, &mut rng)
            .expect("eight free cells remain around the hunter");

        assert_eq!(board.terrain().walls().len(), 8);
        assert!(!board.terrain().is_wall(Coordinate::ORIGIN));

        let result = board.place_treasures(1, &mut rng);
        assert!(
            matches!(
                result,
                Err(EngineError::PlacementUnsatisfiable {
                    kind: Placement::Treasures,
                    ..
                })
            ),
            "no cell is left for a treasure"
        );
    }

    #[test]
    fn test_snapshot_reflects_board() {
        let mut board = Board::new(6);
        board.terrain = Terrain::with_walls(6, [Coordinate::new(2, 0), Coordinate::new(1, 1)]);
        let _ = board.treasures.insert(Coordinate::new(5, 5), TREASURE_VALUE);
        board
            .enemies
            .push(Enemy::new(Coordinate::new(5, 0), Strategy::Patrol));

        let snapshot = board.snapshot(Difficulty::Hard);

        assert_eq!(snapshot.size, 6);
        assert_eq!(
            snapshot.walls,
            vec![Coordinate::new(1, 1), Coordinate::new(2, 0)]
        );
        assert_eq!(
            snapshot.treasures,
            vec![(Coordinate::new(5, 5), TREASURE_VALUE)]
        );
        assert_eq!(snapshot.hunter, Coordinate::ORIGIN);
        assert_eq!(snapshot.enemies, vec![Coordinate::new(5, 0)]);
        assert_eq!(snapshot.lives, 3);
        assert_eq!(snapshot.score, 0);
        assert_eq!(snapshot.difficulty, Difficulty::Hard);
    }
}
