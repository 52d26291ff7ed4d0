//! A terminal treasure hunt on a square grid.
//!
//! The hunter starts in the top-left corner and has to pick up every treasure on the board while
//! enemies spawned in the corners close in on it, walking around the walls in their way. The game
//! engine lives in [`session`] and the modules it builds on; [`App`] wraps it in a terminal
//! interface.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
pub mod board;
pub mod config;
pub mod enemy;
pub mod error;
mod events;
pub mod hunter;
pub mod logging;
pub mod model;
pub mod pathfinding;
pub mod session;
mod ticker;
mod types;
mod ui;

pub use app::App;
pub use config::Config;
pub use error::EngineError;
pub use session::GameSession;
