//! The game controller.
//!
//! A [`GameSession`] owns the board, the active difficulty and the random number generator, and
//! is the only way to mutate any of them. Every operation runs to completion before returning
//! and reports what happened as an ordered list of [`Event`]s, ending with a
//! [`Event::BoardUpdated`] snapshot whenever the state changed.
//!
//! The session assumes its caller serialises access. Hosts that share one between threads wrap
//! it in a mutex or drive it from a single task.

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::{
    board::{Board, Snapshot},
    config::Config,
    enemy::Enemy,
    error::EngineError,
    model::{Coordinate, Difficulty, Direction, Event, Intent, Outcome},
};

/// Smallest board edge length a session accepts.
///
/// The hardest difficulty needs 16 walls, 5 treasures, the hunter and two enemies on distinct
/// cells, with room to spare for the random placement.
pub const MINIMUM_BOARD_SIZE: usize = 6;

/// One running game: board, difficulty and randomness.
#[derive(Debug)]
pub struct GameSession {
    /// Current board.
    pub(crate) board: Board,
    /// Difficulty applied to resets, spawns and roster growth.
    pub(crate) difficulty: Difficulty,
    /// Source of every random decision in the game.
    pub(crate) rng: StdRng,
}

impl GameSession {
    /// Starts a session on a fresh board.
    ///
    /// # Errors
    ///
    /// - [`EngineError::BoardTooSmall`] if `size` is below [`MINIMUM_BOARD_SIZE`].
    /// - [`EngineError::PlacementUnsatisfiable`] if the first board cannot be populated.
    pub fn new(size: usize, difficulty: Difficulty, rng: StdRng) -> Result<Self, EngineError> {
        if size < MINIMUM_BOARD_SIZE {
            return Err(EngineError::BoardTooSmall {
                size,
                minimum: MINIMUM_BOARD_SIZE,
            });
        }

        let mut session = Self {
            board: Board::new(size),
            difficulty,
            rng,
        };
        let _ = session.reset()?;

        Ok(session)
    }

    /// Starts a session with the board size, difficulty and seed from `config`.
    ///
    /// # Errors
    ///
    /// Same as [`GameSession::new`].
    pub fn from_config(config: &Config) -> Result<Self, EngineError> {
        Self::new(config.board_size(), config.difficulty, config.rng())
    }

    /// Current board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Active difficulty.
    #[must_use]
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Read-only view of the current state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.board.snapshot(self.difficulty)
    }

    /// Consumes one intent from the input layer.
    ///
    /// # Errors
    ///
    /// [`EngineError::PlacementUnsatisfiable`] if the intent leads to a reset that cannot
    /// populate the new board.
    pub fn apply(&mut self, intent: Intent) -> Result<Vec<Event>, EngineError> {
        match intent {
            Intent::MoveUp => self.move_hunter(Direction::Up),
            Intent::MoveDown => self.move_hunter(Direction::Down),
            Intent::MoveLeft => self.move_hunter(Direction::Left),
            Intent::MoveRight => self.move_hunter(Direction::Right),
            Intent::NewGame => self.reset(),
            Intent::SetDifficulty(difficulty) => self.set_difficulty(difficulty),
        }
    }

    /// Starts a new game with the active difficulty.
    ///
    /// The hunter goes back to the origin with full lives and no score, the starting enemies
    /// are spawned on distinct corners away from it, and only then are walls and treasures
    /// placed, so neither lands on an entity. The previous board is kept if the new one cannot
    /// be populated.
    ///
    /// # Errors
    ///
    /// [`EngineError::PlacementUnsatisfiable`] if walls or treasures do not fit.
    pub fn reset(&mut self) -> Result<Vec<Event>, EngineError> {
        let board = self.fresh_board()?;

        Ok(self.install(board))
    }

    /// Builds and populates the board for a new game without touching the current one.
    fn fresh_board(&mut self) -> Result<Board, EngineError> {
        let mut board = Board::new(self.board.size());
        let strategy = self.difficulty.strategy();

        for _ in 0..self.difficulty.starting_enemies() {
            let mut taken: Vec<Coordinate> = board.enemies.iter().map(Enemy::position).collect();
            taken.push(board.hunter.position());

            let enemy = Enemy::spawn(&board.terrain, &taken, strategy, &mut self.rng);
            board.enemies.push(enemy);
        }
        board.place_walls(self.difficulty.wall_count(), &mut self.rng)?;
        board.place_treasures(self.difficulty.treasure_count(), &mut self.rng)?;

        Ok(board)
    }

    /// Swaps in a freshly built board and reports the new game.
    fn install(&mut self, board: Board) -> Vec<Event> {
        self.board = board;
        info!(
            difficulty = %self.difficulty,
            size = self.board.size(),
            enemies = self.board.enemies.len(),
            "new game"
        );

        vec![
            Event::LivesChanged {
                lives: self.board.hunter.lives(),
            },
            Event::BoardUpdated(self.snapshot()),
        ]
    }

    /// Switches difficulty and starts a new game with it.
    ///
    /// # Errors
    ///
    /// Same as [`GameSession::reset`].
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<Vec<Event>, EngineError> {
        info!(from = %self.difficulty, to = %difficulty, "difficulty changed");
        self.difficulty = difficulty;

        self.reset()
    }

    /// Spawns `multiplier` new enemies on random corners for every enemy currently in the
    /// roster, and returns the new roster size.
    ///
    /// The roster is counted before anything is spawned, so the new enemies do not spawn more
    /// within the same call. Only the hunter's corner is avoided: a roster larger than three
    /// cannot have a corner per enemy, so newcomers may share one.
    pub fn grow_enemies(&mut self, multiplier: usize) -> usize {
        let spawned = self.board.enemies.len().saturating_mul(multiplier);
        let strategy = self.difficulty.strategy();

        for _ in 0..spawned {
            let enemy = Enemy::spawn(
                &self.board.terrain,
                &[self.board.hunter.position()],
                strategy,
                &mut self.rng,
            );
            self.board.enemies.push(enemy);
        }

        let roster = self.board.enemies.len();
        debug!(spawned, roster, "enemy roster grew");

        roster
    }

    /// Moves the hunter one cell and resolves what it ran into.
    ///
    /// A move off the grid or into a wall is ignored and produces no events. Otherwise a
    /// treasure on the new cell is collected first: the last one wins the game, any other one
    /// grows the roster on normal and hard. Only then is the cell checked for enemies, each
    /// contact costing one life.
    ///
    /// # Errors
    ///
    /// [`EngineError::PlacementUnsatisfiable`] if the move ends the game and the next board
    /// cannot be populated. A winning move is then not made at all; on a losing hit the hunter
    /// keeps its last life.
    pub fn move_hunter(&mut self, direction: Direction) -> Result<Vec<Event>, EngineError> {
        let mut events = Vec::new();
        let Some(target) = self
            .board
            .terrain
            .step(self.board.hunter.position(), direction)
        else {
            return Ok(events);
        };

        // Built before anything moves, so a failed reset leaves the current game whole.
        let next_game = if self.board.treasures.len() == 1
            && self.board.treasures.contains_key(&target)
        {
            Some(self.fresh_board()?)
        } else {
            None
        };

        if !self.board.hunter.step(direction, &self.board.terrain) {
            return Ok(events);
        }

        if let Some(value) = self.board.treasures.remove(&target) {
            let score = self.board.hunter.collect(value);
            debug!(at = %target, value, score, "treasure collected");
            events.push(Event::TreasureCollected {
                at: target,
                value,
                score,
            });

            if let Some(board) = next_game {
                self.finish(Outcome::Won, board, &mut events);
                return Ok(events);
            }

            let multiplier = self.difficulty.growth_multiplier();
            if multiplier > 0 {
                let roster = self.grow_enemies(multiplier);
                events.push(Event::EnemiesGrown { roster });
            }
        }

        if self.board.enemies.iter().any(|enemy| enemy.is_at(target))
            && self.strike_hunter(&mut events)?
        {
            return Ok(events);
        }

        events.push(Event::BoardUpdated(self.snapshot()));
        Ok(events)
    }

    /// Moves every enemy once, in roster order.
    ///
    /// An enemy that ends its move on the hunter costs a life. Losing the last one ends the tick
    /// on the spot: the board has been replaced, and the rest of the old roster stays put.
    ///
    /// # Errors
    ///
    /// [`EngineError::PlacementUnsatisfiable`] if the game is lost and the next board cannot be
    /// populated. The enemies moved so far stay where they are and the hunter keeps its last
    /// life.
    pub fn tick(&mut self) -> Result<Vec<Event>, EngineError> {
        let mut events = Vec::new();

        for index in 0..self.board.enemies.len() {
            let hunter = self.board.hunter.position();
            let Some(enemy) = self.board.enemies.get_mut(index) else {
                break;
            };

            enemy.advance(&self.board.terrain, hunter, &mut self.rng);
            if enemy.is_at(hunter) && self.strike_hunter(&mut events)? {
                return Ok(events);
            }
        }

        debug!(enemies = self.board.enemies.len(), "tick");
        events.push(Event::BoardUpdated(self.snapshot()));
        Ok(events)
    }

    /// Takes a life and, if it was the last, ends the game. Returns whether the game ended.
    ///
    /// When the last life is at stake the next board is built first; if that fails the hunter
    /// keeps the life.
    fn strike_hunter(&mut self, events: &mut Vec<Event>) -> Result<bool, EngineError> {
        let next_game = if self.board.hunter.lives() <= 1 {
            Some(self.fresh_board()?)
        } else {
            None
        };

        let lives = self.board.hunter.wound();
        debug!(lives, at = %self.board.hunter.position(), "hunter caught");
        events.push(Event::LivesChanged { lives });

        match next_game {
            Some(board) if lives == 0 => {
                self.finish(Outcome::Lost, board, events);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Reports `outcome` and starts the next game on `board`.
    fn finish(&mut self, outcome: Outcome, board: Board, events: &mut Vec<Event>) {
        info!(
            ?outcome,
            score = self.board.hunter.score(),
            difficulty = %self.difficulty,
            "game over"
        );
        events.push(Event::Finished(outcome));
        events.extend(self.install(board));
    }
}
