//! User interface rendering functions for all application screens.

use std::rc::Rc;

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear, Paragraph,
    },
    Frame,
};

use crate::{
    board::Snapshot,
    model::{Coordinate, Difficulty, Outcome},
    types::{DifficultyMenuItem, MainMenuItem, MenuType, Screen},
    App,
};

/// Terminal columns spent on one board cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;

/// Heart glyph repeated once per remaining life.
const HEART: &str = "\u{2665}";

/// Narrowest the outcome popup gets.
const POPUP_MIN_WIDTH: u16 = 24;

/// Updates the application UI based on the persistent state.
///
/// This function renders different screens based on the current state stored in the [`App`]
/// structure, dispatching to the appropriate rendering function for each screen type.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    match app.screen {
        Screen::MainMenu(item) => main_menu(frame, item),
        Screen::DifficultyMenu(item) => difficulty_menu(frame, item),
        Screen::InGame => in_game(app, frame)?,
    }

    Ok(())
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Renders the generic layout structure for the main and difficulty menus.
///
/// This function creates the common layout and block structure used by both menus. The generic
/// part includes the centered positioning and border styling, while the specific menu content is
/// handled by the caller using the [`MenuType`] parameter.
#[expect(
    clippy::indexing_slicing,
    reason = "The collection is created in-place with few, known elements; there is no risk of bad indexing."
)]
pub(crate) fn init_menu(frame: &mut Frame, menu: MenuType) -> Rc<[Rect]> {
    // One row per item plus the two borders.
    let space = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(u16::from(menu.value()) + 2),
        Constraint::Fill(1),
    ])
    .split(frame.area())[1];
    let layout = Layout::horizontal([
        Constraint::Percentage(35),
        Constraint::Percentage(30),
        Constraint::Percentage(35),
    ])
    .split(space)[1];

    let block = Block::bordered()
        .title(menu.repr())
        .title_bottom("(j) down / (k) up / (l) select")
        .title_alignment(Alignment::Center)
        .style(Color::Green)
        .border_type(BorderType::Rounded);

    let inner_space = block.inner(layout);

    frame.render_widget(block, layout);

    Layout::vertical(vec![Constraint::Max(1); menu.value().into()]).split(inner_space)
}

/// Renders menu entries into the rows laid out by [`init_menu`], highlighting the active one.
fn render_menu_items(frame: &mut Frame, rows: &[Rect], items: &[(&str, bool)]) {
    let content_style = Style::default().fg(Color::Green);
    let active_content_style = Style::default().fg(Color::White).bg(Color::Green);

    for (row, &(label, active)) in rows.iter().zip(items) {
        let style = if active {
            active_content_style
        } else {
            content_style
        };
        frame.render_widget(Line::raw(label).centered().style(style), *row);
    }
}

/// Renders the main menu screen with navigation options.
///
/// This function displays the main menu with options for "Start Game", "Difficulty", and "Quit".
/// It highlights the currently selected option and provides visual feedback for user navigation.
pub(crate) fn main_menu(frame: &mut Frame, item: MainMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::MainMenu(3));

    render_menu_items(
        frame,
        &inner_layout,
        &[
            ("Start Game", item == MainMenuItem::StartGame),
            ("Difficulty", item == MainMenuItem::Difficulty),
            ("Quit", item == MainMenuItem::Quit),
        ],
    );
}

/// Renders the difficulty menu screen with one entry per preset.
///
/// This function displays the difficulty menu with the three presets and "Return" to the main
/// menu. It provides the same navigation highlighting as the main menu.
pub(crate) fn difficulty_menu(frame: &mut Frame, item: DifficultyMenuItem) {
    clear(frame);

    let inner_layout = init_menu(frame, MenuType::DifficultyMenu(4));

    let mut items: Vec<(&str, bool)> = Difficulty::ALL
        .iter()
        .map(|difficulty| {
            (
                difficulty.label(),
                item == DifficultyMenuItem::Preset(*difficulty),
            )
        })
        .collect();
    items.push(("Return", item == DifficultyMenuItem::Back));

    render_menu_items(frame, &inner_layout, &items);
}

/// Transforms board cells into canvas coordinates centered on the origin.
///
/// Rows grow downwards on the board but upwards on the canvas, so rows are flipped around the
/// middle. Each cell spans [`CELL_WIDTH`] columns and yields one point per column.
///
/// # Errors
///
/// This function fails if the board or a coordinate does not fit in a [`u16`].
pub(crate) fn transform_board_to_screen_coords(
    cells: &[Coordinate],
    size: usize,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(size)?);
    let cols_n = rows_n * f64::from(CELL_WIDTH);

    let mut coords = Vec::with_capacity(cells.len().saturating_mul(CELL_WIDTH.into()));
    for cell in cells {
        // Row transformation: coordinate[i] = (n - 1) / 2 - i
        let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(cell.y)?);
        let first_column = f64::from(u16::try_from(cell.x)?) * f64::from(CELL_WIDTH);

        for offset in 0..CELL_WIDTH {
            // Column transformation: coordinate[i] = i - (n - 1) / 2
            let screen_x = first_column + f64::from(offset) - (cols_n - 1.) / 2.;
            coords.push((screen_x, screen_y));
        }
    }

    Ok(coords)
}

/// Builds the status line: hearts for lives, then score, difficulty and enemy count.
pub(crate) fn status_line(snapshot: &Snapshot, paused: bool) -> Line<'static> {
    let lives = usize::try_from(snapshot.lives).unwrap_or(usize::MAX);

    let mut spans = vec![
        Span::styled(HEART.repeat(lives), Style::default().fg(Color::Red)),
        Span::raw(format!("  Score: {}", snapshot.score)),
        Span::raw(format!("  Difficulty: {}", snapshot.difficulty)),
        Span::raw(format!("  Enemies: {}", snapshot.enemies.len())),
    ];
    if paused {
        spans.push(Span::styled("  (paused)", Style::default().fg(Color::Yellow)));
    }

    Line::from(spans).style(Style::default().fg(Color::Green))
}

/// Renders the in-game screen with the board, the status line and the key help.
///
/// This function draws the walls, treasures, enemies and hunter as separate layers of one
/// [`Canvas`], so later layers cover earlier ones where they share a cell. The popup for the last
/// finished game is drawn on top when there is one.
///
/// # Errors
///
/// This function may return errors from coordinate conversion operations.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let snapshot = app.session.snapshot();
    let rows = u16::try_from(snapshot.size)?;
    let columns = rows.saturating_mul(CELL_WIDTH);

    let [status_area, board_region, help_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(2),
    ])
    .areas(frame.area());

    frame.render_widget(
        status_line(&snapshot, app.ticker.is_paused()).centered(),
        status_area,
    );

    let [_, board_column, _] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(columns),
        Constraint::Min(0),
    ])
    .areas(board_region);
    let [_, board_area, _] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(rows),
        Constraint::Min(0),
    ])
    .areas(board_column);

    let treasures: Vec<Coordinate> = snapshot.treasures.iter().map(|(at, _)| *at).collect();
    let layers = [
        (
            transform_board_to_screen_coords(&snapshot.walls, snapshot.size)?,
            Color::Gray,
        ),
        (
            transform_board_to_screen_coords(&treasures, snapshot.size)?,
            Color::Yellow,
        ),
        (
            transform_board_to_screen_coords(&snapshot.enemies, snapshot.size)?,
            Color::Red,
        ),
        (
            transform_board_to_screen_coords(&[snapshot.hunter], snapshot.size)?,
            Color::Cyan,
        ),
    ];

    let half_width = (f64::from(columns) - 1.) / 2.;
    let half_height = (f64::from(rows) - 1.) / 2.;
    let board = Canvas::default()
        .x_bounds([-half_width, half_width])
        .y_bounds([-half_height, half_height])
        .marker(Marker::Block)
        .paint(|ctx| {
            for (coords, color) in &layers {
                ctx.draw(&Points {
                    coords,
                    color: *color,
                });
                ctx.layer();
            }
        });

    frame.render_widget(board, board_area);

    let help_block = Block::bordered()
        .title("(arrows/hjkl/wasd) move / (n) new / (1-3) level / (p) pause / (esc) menu")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);

    frame.render_widget(help_block, help_area);

    if let Some(outcome) = app.outcome {
        outcome_popup(frame, outcome)?;
    }

    Ok(())
}

/// Renders a centered popup announcing how the last game ended.
///
/// # Errors
///
/// This function fails if the popup geometry cannot be computed.
pub(crate) fn outcome_popup(frame: &mut Frame, outcome: Outcome) -> Result<()> {
    let (title, message, color) = match outcome {
        Outcome::Won => ("You won!", "Every treasure collected.", Color::Yellow),
        Outcome::Lost => ("You lost!", "The enemies got you.", Color::Red),
    };

    let area = frame.area();
    let width = u16::try_from(rounded_div::i32(i32::from(area.width), 2))?
        .max(POPUP_MIN_WIDTH)
        .min(area.width);

    let [popup_row] = Layout::vertical([Constraint::Length(4)])
        .flex(Flex::Center)
        .areas(area);
    let popup = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .split(popup_row)
        .first()
        .copied()
        .ok_or_eyre("failed to lay out the outcome popup")?;

    let block = Block::bordered()
        .title(title)
        .title_bottom("press any key")
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .border_type(BorderType::Rounded);

    frame.render_widget(Clear, popup);
    let paragraph = Paragraph::new(message)
        .alignment(Alignment::Center)
        .block(block);
    frame.render_widget(paragraph, popup);

    Ok(())
}
