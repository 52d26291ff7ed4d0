//! Type definitions and enums for the interface state and navigation.

use crate::model::Difficulty;

/// Enumeration of available application screens.
///
/// This enumeration holds information about the current screen of the game. This is used to
/// determine which screen to render and what actions to take based on user input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Screen {
    /// Main menu screen of the game.
    MainMenu(MainMenuItem),
    /// Difficulty selection screen.
    ///
    /// This variant represents the menu in which the user picks one of the difficulty presets.
    /// Picking one starts a new game with it.
    DifficultyMenu(DifficultyMenuItem),
    /// In-game screen where the board is displayed and played on.
    InGame,
}

/// Main menu navigation options.
///
/// This enumeration holds the different items in the main menu. It is used to determine which items
/// can the user select in the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum MainMenuItem {
    /// "Start Game" menu option.
    StartGame,
    /// "Difficulty" menu option.
    Difficulty,
    /// "Quit" menu option.
    Quit,
}

impl MainMenuItem {
    /// Item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::StartGame => Self::Difficulty,
            Self::Difficulty | Self::Quit => Self::Quit,
        }
    }

    /// Item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::StartGame | Self::Difficulty => Self::StartGame,
            Self::Quit => Self::Difficulty,
        }
    }
}

/// Difficulty menu navigation choices.
///
/// This enumeration holds one item per difficulty preset plus the way back to the main menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum DifficultyMenuItem {
    /// One of the difficulty presets.
    Preset(Difficulty),
    /// "Return" navigation option.
    Back,
}

impl DifficultyMenuItem {
    /// Item below this one, staying on the last item.
    pub(crate) const fn next(self) -> Self {
        match self {
            Self::Preset(Difficulty::Easy) => Self::Preset(Difficulty::Normal),
            Self::Preset(Difficulty::Normal) => Self::Preset(Difficulty::Hard),
            Self::Preset(Difficulty::Hard) | Self::Back => Self::Back,
        }
    }

    /// Item above this one, staying on the first item.
    pub(crate) const fn previous(self) -> Self {
        match self {
            Self::Preset(Difficulty::Easy | Difficulty::Normal) => Self::Preset(Difficulty::Easy),
            Self::Preset(Difficulty::Hard) => Self::Preset(Difficulty::Normal),
            Self::Back => Self::Preset(Difficulty::Hard),
        }
    }
}

/// Generic menu type configuration.
///
/// This enumeration holds the different specifics particular to each generic menu type in the
/// application's interface. Generic here means they share enough features to be considered worth
/// joining together part of their functionality.
pub(crate) enum MenuType {
    /// Main menu configuration, with its number of items.
    MainMenu(u8),
    /// Difficulty menu configuration, with its number of items.
    DifficultyMenu(u8),
}

impl MenuType {
    /// Returns the string representation of the menu type.
    ///
    /// This function provides the display name for each menu variant, used as the title in the
    /// menu's border when rendering the interface.
    pub(crate) const fn repr(&self) -> &str {
        match self {
            Self::MainMenu(_) => "Main Menu",
            Self::DifficultyMenu(_) => "Difficulty",
        }
    }

    /// Returns the numeric value stored by the menu type variant.
    ///
    /// This function provides access to the number of menu items for layout calculations, allowing
    /// the UI to properly size the menu containers.
    pub(crate) const fn value(&self) -> u8 {
        match self {
            Self::MainMenu(value) | Self::DifficultyMenu(value) => *value,
        }
    }
}
