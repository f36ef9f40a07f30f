//! Render orchestration

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use rpg_core::GameState;

use crate::app::{App, InputMode};
use crate::ui::layout::{centered_rect_fixed, AppLayout};
use crate::ui::widgets::{HotkeyBarWidget, InputWidget, NarrativeWidget, StatusBarWidget};

/// Popups drawn over the main screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    Help,
    GameOver,
}

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let layout = AppLayout::calculate(area);
    let display = app.game.display();

    render_title_bar(frame, app, layout.title_area);

    let log_title = if app.game_state() == GameState::Combat {
        " Combat Log "
    } else {
        " Adventure Log "
    };
    let narrative = NarrativeWidget::new(display.shown(), &app.theme)
        .title(log_title)
        .scroll(app.narrative_scroll)
        .typing(display.has_pending(), app.animation_frame);
    frame.render_widget(narrative, layout.narrative_area);

    let status = StatusBarWidget::new(display.status(), app.input_mode, &app.theme)
        .message(app.status_message());
    frame.render_widget(status, layout.status_bar);

    frame.render_widget(
        HotkeyBarWidget::new(app.game_state(), app.input_mode),
        layout.hotkey_bar,
    );

    render_input(frame, app, layout.input_area);

    match app.overlay() {
        Some(Overlay::Help) => render_help_overlay(frame, app, area),
        Some(Overlay::GameOver) => render_game_over(frame, app, area),
        None => {}
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let player = app.game.player();
    let here = app.game.current_location();
    let location = here.map(|l| l.name.as_str()).unwrap_or("Nowhere");
    let in_dungeon = here.is_some_and(|l| l.is_dungeon);

    let (title, danger) = match app.game.world().combat_target() {
        Some(enemy) => (
            format!(
                " ⚔ {} {} ({}/{}) ⚔ {} ",
                if enemy.is_boss { "BOSS" } else { "COMBAT" },
                enemy.name,
                enemy.hp.max(0),
                enemy.max_hp,
                location
            ),
            true,
        ),
        None if app.game_state() == GameState::Menu => (" ASCII RPG ".to_string(), false),
        None if app.game_state() == GameState::Dead => (" ☠ YOU DIED ☠ ".to_string(), true),
        None if in_dungeon => (
            format!(" {location} | Depth {} | Turn {} ", player.dungeon_level, player.turns),
            false,
        ),
        None => (format!(" {location} | Turn {} ", player.turns), false),
    };

    let line = Line::from(Span::styled(title, app.theme.title_style(danger)));
    frame.render_widget(Paragraph::new(line), area);
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let is_active = matches!(app.input_mode, InputMode::Insert | InputMode::Command);
    let is_command = matches!(app.input_mode, InputMode::Command);

    let placeholder = match (app.input_mode, app.game_state()) {
        (InputMode::Normal, _) => "Press i to type a command",
        (_, GameState::Menu) => "Type 'start' to begin...",
        (_, GameState::Combat) => "attack, cast <spell>, ability <name>, use <item>...",
        (_, GameState::Dead) => "Type 'restart'...",
        (_, GameState::Playing) => "Type a command ('help' lists them)...",
    };

    let widget = InputWidget::new(app.input_buffer(), &app.theme)
        .cursor_position(app.cursor_position())
        .active(is_active)
        .command_mode(is_command)
        .placeholder(placeholder);

    frame.render_widget(widget, area);
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().add_modifier(Modifier::UNDERLINED),
    ))
}

fn render_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let popup_area = centered_rect_fixed(56, 24, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        heading("Input Modes:"),
        Line::from("  i/a     Type a game command (INSERT)"),
        Line::from("  :       Front-end command (COMMAND)"),
        Line::from("  Esc     Back to NORMAL"),
        Line::from(""),
        heading("Scrolling (NORMAL):"),
        Line::from("  j/k ↑/↓        One line"),
        Line::from("  PgUp/PgDn      Ten lines (also Ctrl+u/d)"),
        Line::from("  g/G            Top/bottom"),
        Line::from(""),
        heading("Hotkeys (NORMAL):"),
        Line::from("  A attack  c cast  b ability  U use"),
        Line::from("  L look  T travel  D dive  W wait"),
        Line::from("  I inventory  C stats  S start  R restart"),
        Line::from(""),
        heading("Commands:"),
        Line::from("  :w save   :load   :wq save+quit"),
        Line::from("  :seed show world seed   :q quit"),
        Line::from("  Type 'help' in the game for every verb"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Esc or q to close",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_style(app.theme.border_style(true));

    frame.render_widget(
        Paragraph::new(help_text)
            .block(block)
            .wrap(Wrap { trim: false }),
        popup_area,
    );
}

fn render_game_over(frame: &mut Frame, app: &App, area: Rect) {
    let Some((title, message)) = app.game.display().game_over_notice() else {
        return;
    };
    let popup_area = centered_rect_fixed(48, 9, area);
    frame.render_widget(Clear, popup_area);

    let player = app.game.player();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "Level {} · {} gold · {} turns",
            player.level, player.gold, player.turns
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Enter/r restart · q quit · Esc look around",
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.danger));

    frame.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(ratatui::layout::Alignment::Center),
        popup_area,
    );
}
