//! Core application state and logic for the treasure hunt.

use color_eyre::eyre::Result;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::{
    config::Config,
    events,
    model::{Event, Intent, Outcome},
    session::GameSession,
    ticker::Ticker,
    types::{MainMenuItem, Screen},
    ui,
};

/// Application state container for the treasure hunt.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the game and Crossterm events will help writing to. The game itself lives
/// in the [`GameSession`]; everything else here is presentation state.
#[derive(Debug)]
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit the game but it starts off `false`.
    pub(crate) exit: bool,
    /// Current screen being displayed to the user.
    ///
    /// This field holds the current screen of the game. It is used to determine which screen to
    /// render and what actions to take based on user input.
    pub(crate) screen: Screen,
    /// Running game.
    pub(crate) session: GameSession,
    /// Timer driving the enemies.
    ///
    /// It starts paused, since the application opens on the main menu, and only runs while the
    /// in-game screen is shown.
    pub(crate) ticker: Ticker,
    /// Outcome of the last finished game, shown in a popup until the next key press.
    pub(crate) outcome: Option<Outcome>,
}

impl App {
    /// Creates the application state for the given configuration.
    ///
    /// # Errors
    ///
    /// - [`crate::error::EngineError`] if the first board cannot be set up.
    pub fn new(config: &Config) -> Result<Self> {
        let session = GameSession::from_config(config)?;
        let mut ticker = Ticker::new(config.tick_interval());
        ticker.pause();

        info!(
            size = config.size,
            difficulty = %config.difficulty,
            seeded = config.seed.is_some(),
            "application started"
        );

        Ok(Self {
            exit: false,
            screen: Screen::MainMenu(MainMenuItem::StartGame),
            session,
            ticker,
            outcome: None,
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function handles user input and updates the application state. The loop continues until
    /// the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    /// - [`crate::error::EngineError`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame).map_err(std::io::Error::other)
            })?;
            events::handle_events(self)?;
        }

        info!("application exiting");
        Ok(())
    }

    /// Switches to the in-game screen and starts the enemies moving.
    pub(crate) fn enter_game(&mut self) {
        self.screen = Screen::InGame;
        self.ticker.resume();
    }

    /// Returns to the main menu, freezing the game where it stands.
    pub(crate) fn leave_game(&mut self) {
        self.ticker.pause();
        self.screen = Screen::MainMenu(MainMenuItem::StartGame);
    }

    /// Hands an intent to the session and records what came out of it.
    ///
    /// # Errors
    ///
    /// - [`crate::error::EngineError`] if the intent triggers a reset that cannot be populated.
    pub(crate) fn dispatch(&mut self, intent: Intent) -> Result<()> {
        let events = self.session.apply(intent)?;
        self.absorb(events);

        Ok(())
    }

    /// Moves the enemies once.
    ///
    /// # Errors
    ///
    /// - [`crate::error::EngineError`] if the tick ends the game and the following reset cannot be
    ///   populated.
    pub(crate) fn tick(&mut self) -> Result<()> {
        let events = self.session.tick()?;
        self.absorb(events);

        Ok(())
    }

    /// Updates the presentation state from engine events.
    ///
    /// The board itself is always read back from the session when drawing, so only the outcome
    /// needs keeping.
    fn absorb(&mut self, events: Vec<Event>) {
        for event in events {
            match event {
                Event::Finished(outcome) => {
                    info!(?outcome, "game finished");
                    self.outcome = Some(outcome);
                }
                Event::BoardUpdated(_) => {}
                other => debug!(event = ?other, "engine event"),
            }
        }
    }
}
