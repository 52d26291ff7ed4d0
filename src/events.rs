//! Event handling functions for user input and application state updates.

use std::time::{Duration, Instant};

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    model::{Difficulty, Intent},
    types::{DifficultyMenuItem, MainMenuItem, Screen},
    App,
};

/// Longest time the loop blocks waiting for input, so the screen keeps refreshing.
const INPUT_POLL_CEILING: Duration = Duration::from_millis(100);

/// Handles input events and updates the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. The poll never outlasts the time left until the next enemy
/// tick, which is then run if it is due.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    let timeout = app.ticker.timeout(Instant::now(), INPUT_POLL_CEILING);
    if event::poll(timeout)? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code)?;
            }
        }
    }

    if matches!(app.screen, Screen::InGame) && app.ticker.poll(Instant::now()) {
        app.tick()?;
    }

    Ok(())
}

/// Dispatches a single key press to the handler for the current screen.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) -> Result<()> {
    if code == KeyCode::Char('q') {
        app.exit = true;
        return Ok(());
    }

    if matches!(app.screen, Screen::InGame) {
        return handle_in_game_key(app, code);
    }

    match code {
        KeyCode::Char('j') => handle_j_events(app),
        KeyCode::Char('k') => handle_k_events(app),
        KeyCode::Char('l') => handle_l_events(app)?,
        KeyCode::Char('h') => handle_h_events(app),
        _ => {}
    }

    Ok(())
}

/// Maps an in-game key to the intent it stands for.
///
/// Arrows, `h`/`j`/`k`/`l` and `w`/`a`/`s`/`d` all move the hunter.
pub(crate) const fn intent_for_key(code: KeyCode) -> Option<Intent> {
    match code {
        KeyCode::Up | KeyCode::Char('k' | 'w') => Some(Intent::MoveUp),
        KeyCode::Down | KeyCode::Char('j' | 's') => Some(Intent::MoveDown),
        KeyCode::Left | KeyCode::Char('h' | 'a') => Some(Intent::MoveLeft),
        KeyCode::Right | KeyCode::Char('l' | 'd') => Some(Intent::MoveRight),
        KeyCode::Char('n') => Some(Intent::NewGame),
        KeyCode::Char('1') => Some(Intent::SetDifficulty(Difficulty::Easy)),
        KeyCode::Char('2') => Some(Intent::SetDifficulty(Difficulty::Normal)),
        KeyCode::Char('3') => Some(Intent::SetDifficulty(Difficulty::Hard)),
        _ => None,
    }
}

/// Handles a key press on the in-game screen.
///
/// Any key dismisses the outcome popup before doing its own work.
fn handle_in_game_key(app: &mut App, code: KeyCode) -> Result<()> {
    app.outcome = None;

    match code {
        KeyCode::Esc => app.leave_game(),
        KeyCode::Char('p') => app.ticker.toggle(),
        _ => {
            if let Some(intent) = intent_for_key(code) {
                app.dispatch(intent)?;
            }
        }
    }

    Ok(())
}

/// Handles 'j' key press events for downward navigation.
///
/// This function processes the 'j' key press which is used for moving down in menus.
pub(crate) fn handle_j_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(item) => app.screen = Screen::MainMenu(item.next()),
        Screen::DifficultyMenu(item) => app.screen = Screen::DifficultyMenu(item.next()),
        Screen::InGame => {}
    }
}

/// Handles 'k' key press events for upward navigation.
///
/// This function processes the 'k' key press which is used for moving up in menus.
pub(crate) fn handle_k_events(app: &mut App) {
    match app.screen {
        Screen::MainMenu(item) => app.screen = Screen::MainMenu(item.previous()),
        Screen::DifficultyMenu(item) => app.screen = Screen::DifficultyMenu(item.previous()),
        Screen::InGame => {}
    }
}

/// Handles 'l' key press events for selection and forward navigation.
///
/// This function processes the 'l' key press which is used for selecting menu items. Picking a
/// difficulty starts a fresh game with it right away.
pub(crate) fn handle_l_events(app: &mut App) -> Result<()> {
    match app.screen {
        Screen::MainMenu(MainMenuItem::StartGame) => app.enter_game(),
        Screen::MainMenu(MainMenuItem::Difficulty) => {
            app.screen =
                Screen::DifficultyMenu(DifficultyMenuItem::Preset(app.session.difficulty()));
        }
        Screen::MainMenu(MainMenuItem::Quit) => app.exit = true,
        Screen::DifficultyMenu(DifficultyMenuItem::Preset(difficulty)) => {
            app.dispatch(Intent::SetDifficulty(difficulty))?;
            app.enter_game();
        }
        Screen::DifficultyMenu(DifficultyMenuItem::Back) => {
            app.screen = Screen::MainMenu(MainMenuItem::Difficulty);
        }
        Screen::InGame => {}
    }

    Ok(())
}

/// Handles 'h' key press events for backward navigation.
///
/// This function processes the 'h' key press which is used for returning from the difficulty menu
/// to the main menu.
pub(crate) fn handle_h_events(app: &mut App) {
    if let Screen::DifficultyMenu(_) = app.screen {
        app.screen = Screen::MainMenu(MainMenuItem::Difficulty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, model::Outcome};

    /// Creates a reproducible application for testing.
    fn create_test_app() -> App {
        let config = Config {
            seed: Some(5),
            ..Config::default()
        };
        App::new(&config).expect("default configuration should start")
    }

    /// Feeds a sequence of key presses to the application.
    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            handle_key(app, *code).expect("key handling should succeed");
        }
    }

    #[test]
    fn test_quit_from_any_screen() {
        for screen in [
            Screen::MainMenu(MainMenuItem::Difficulty),
            Screen::DifficultyMenu(DifficultyMenuItem::Back),
            Screen::InGame,
        ] {
            let mut app = create_test_app();
            app.screen = screen;

            press(&mut app, &[KeyCode::Char('q')]);

            assert!(app.exit, "q should quit from {screen:?}");
        }
    }

    #[test]
    fn test_main_menu_navigation() {
        let mut app = create_test_app();

        press(&mut app, &[KeyCode::Char('j')]);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Difficulty));

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('j')]);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Quit));

        press(&mut app, &[KeyCode::Char('k')]);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Difficulty));
    }

    #[test]
    fn test_select_quit() {
        let mut app = create_test_app();

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('j'), KeyCode::Char('l')]);

        assert!(app.exit);
    }

    #[test]
    fn test_start_game_resumes_ticker() {
        let mut app = create_test_app();

        press(&mut app, &[KeyCode::Char('l')]);

        assert_eq!(app.screen, Screen::InGame);
        assert!(!app.ticker.is_paused());
    }

    #[test]
    fn test_difficulty_menu_starts_game() {
        let mut app = create_test_app();

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('l')]);
        assert_eq!(
            app.screen,
            Screen::DifficultyMenu(DifficultyMenuItem::Preset(Difficulty::Easy)),
            "the cursor opens on the active difficulty"
        );

        press(&mut app, &[KeyCode::Char('j'), KeyCode::Char('l')]);
        assert_eq!(app.screen, Screen::InGame);
        assert_eq!(app.session.difficulty(), Difficulty::Normal);
        assert_eq!(app.session.board().enemies().len(), 2);
    }

    #[test]
    fn test_difficulty_menu_return() {
        let mut app = create_test_app();
        app.screen = Screen::DifficultyMenu(DifficultyMenuItem::Back);

        press(&mut app, &[KeyCode::Char('l')]);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Difficulty));

        app.screen = Screen::DifficultyMenu(DifficultyMenuItem::Preset(Difficulty::Hard));
        press(&mut app, &[KeyCode::Char('h')]);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::Difficulty));
        assert_eq!(app.session.difficulty(), Difficulty::Easy);
    }

    #[test]
    fn test_intent_for_key() {
        assert_eq!(intent_for_key(KeyCode::Up), Some(Intent::MoveUp));
        assert_eq!(intent_for_key(KeyCode::Char('k')), Some(Intent::MoveUp));
        assert_eq!(intent_for_key(KeyCode::Char('w')), Some(Intent::MoveUp));
        assert_eq!(intent_for_key(KeyCode::Down), Some(Intent::MoveDown));
        assert_eq!(intent_for_key(KeyCode::Char('j')), Some(Intent::MoveDown));
        assert_eq!(intent_for_key(KeyCode::Char('s')), Some(Intent::MoveDown));
        assert_eq!(intent_for_key(KeyCode::Left), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key(KeyCode::Char('h')), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key(KeyCode::Char('a')), Some(Intent::MoveLeft));
        assert_eq!(intent_for_key(KeyCode::Right), Some(Intent::MoveRight));
        assert_eq!(intent_for_key(KeyCode::Char('l')), Some(Intent::MoveRight));
        assert_eq!(intent_for_key(KeyCode::Char('d')), Some(Intent::MoveRight));
        assert_eq!(intent_for_key(KeyCode::Char('n')), Some(Intent::NewGame));
        assert_eq!(
            intent_for_key(KeyCode::Char('3')),
            Some(Intent::SetDifficulty(Difficulty::Hard))
        );
        assert_eq!(intent_for_key(KeyCode::Char('x')), None);
        assert_eq!(intent_for_key(KeyCode::Enter), None);
    }

    #[test]
    fn test_in_game_keys() {
        let mut app = create_test_app();
        app.enter_game();

        press(&mut app, &[KeyCode::Char('p')]);
        assert!(app.ticker.is_paused());
        press(&mut app, &[KeyCode::Char('p')]);
        assert!(!app.ticker.is_paused());

        press(&mut app, &[KeyCode::Char('2')]);
        assert_eq!(app.session.difficulty(), Difficulty::Normal);
        assert_eq!(app.screen, Screen::InGame);

        press(&mut app, &[KeyCode::Esc]);
        assert_eq!(app.screen, Screen::MainMenu(MainMenuItem::StartGame));
        assert!(app.ticker.is_paused());
    }

    #[test]
    fn test_key_press_dismisses_outcome() {
        let mut app = create_test_app();
        app.enter_game();
        app.outcome = Some(Outcome::Won);

        press(&mut app, &[KeyCode::Char('x')]);

        assert_eq!(app.outcome, None);
    }

    #[test]
    fn test_new_game_key_resets_board() {
        let mut app = create_test_app();
        app.enter_game();

        press(&mut app, &[KeyCode::Char('n')]);

        let hunter = app.session.board().hunter();
        assert_eq!(hunter.lives(), 3);
        assert_eq!(hunter.score(), 0);
        assert_eq!(
            app.session.board().treasures().len(),
            Difficulty::Easy.treasure_count()
        );
    }
}
