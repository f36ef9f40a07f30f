//! Event handling for the terminal UI

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};

use rpg_core::GameState;

use crate::app::{App, InputMode};
use crate::ui::Overlay;

/// Result of handling an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    Continue,
    Quit,
    NeedsRedraw,
}

/// Handle a terminal event
pub fn handle_event(app: &mut App, event: Event) -> EventResult {
    match event {
        Event::Key(key) => handle_key_event(app, key),
        Event::Mouse(mouse) => handle_mouse_event(app, mouse),
        Event::Resize(_, _) => EventResult::NeedsRedraw,
        _ => EventResult::Continue,
    }
}

fn handle_mouse_event(app: &mut App, mouse: MouseEvent) -> EventResult {
    match mouse.kind {
        MouseEventKind::ScrollUp => {
            app.scroll_up(3);
            EventResult::NeedsRedraw
        }
        MouseEventKind::ScrollDown => {
            app.scroll_down(3);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_key_event(app: &mut App, key: KeyEvent) -> EventResult {
    if app.has_overlay() {
        return handle_overlay_key(app, key);
    }

    if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
        return EventResult::Quit;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Insert => handle_insert_mode(app, key),
        InputMode::Command => handle_command_mode(app, key),
    }
}

/// Keys in NORMAL mode: vim-style scrolling plus game hotkeys
fn handle_normal_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Char('i') => {
            app.enter_insert_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('a') => {
            app.enter_insert_mode();
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Char(':') => {
            app.enter_command_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('?') | KeyCode::F(1) => {
            app.toggle_help();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') => EventResult::Quit,

        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_up(10);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.scroll_down(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageUp => {
            app.scroll_up(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown => {
            app.scroll_down(10);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.scroll_down(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.scroll_up(1);
            EventResult::NeedsRedraw
        }
        KeyCode::Char('G') => {
            app.scroll_to_bottom();
            EventResult::NeedsRedraw
        }
        KeyCode::Char('g') => {
            app.narrative_scroll = 0;
            app.scroll_locked_to_bottom = false;
            EventResult::NeedsRedraw
        }

        _ => handle_state_hotkeys(app, key),
    }
}

/// Single-key shortcuts that depend on where the game is
fn handle_state_hotkeys(app: &mut App, key: KeyEvent) -> EventResult {
    let run = |app: &mut App, command: &str| {
        app.run_game_command(command);
        EventResult::NeedsRedraw
    };
    let prefill = |app: &mut App, text: &str, hint: &str| {
        app.set_input(text);
        app.enter_insert_mode();
        app.set_status(hint);
        EventResult::NeedsRedraw
    };

    match (app.game_state(), key.code) {
        (GameState::Menu, KeyCode::Char('S') | KeyCode::Enter) => run(app, "start"),
        (GameState::Dead, KeyCode::Char('R') | KeyCode::Enter) => run(app, "restart"),

        (GameState::Combat, KeyCode::Char('A')) => run(app, "attack"),
        (GameState::Combat, KeyCode::Char('c')) => {
            prefill(app, "cast ", "Type a spell name, then press Enter")
        }
        (GameState::Combat, KeyCode::Char('b')) => {
            prefill(app, "ability ", "Type an ability name, then press Enter")
        }

        (GameState::Playing | GameState::Combat, KeyCode::Char('I')) => run(app, "inventory"),
        (GameState::Playing | GameState::Combat, KeyCode::Char('C')) => run(app, "stats"),
        (GameState::Playing | GameState::Combat, KeyCode::Char('U')) => {
            prefill(app, "use ", "Type an item name, then press Enter")
        }
        (GameState::Playing, KeyCode::Char('L')) => run(app, "look"),
        (GameState::Playing, KeyCode::Char('W')) => run(app, "wait"),
        (GameState::Playing, KeyCode::Char('D')) => run(app, "dive"),
        (GameState::Playing, KeyCode::Char('T')) => {
            prefill(app, "go ", "Type a destination, then press Enter")
        }

        _ => EventResult::Continue,
    }
}

/// Keys in INSERT mode: line editing, Enter sends the line to the game
fn handle_insert_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.enter_normal_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            if let Some(input) = app.submit_input() {
                app.run_game_command(&input);
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Left => {
            app.cursor_left();
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Home => {
            app.cursor_home();
            EventResult::NeedsRedraw
        }
        KeyCode::End => {
            app.cursor_end();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            app.backspace();
            EventResult::NeedsRedraw
        }
        KeyCode::Delete => {
            app.delete();
            EventResult::NeedsRedraw
        }
        KeyCode::Up => {
            app.history_prev();
            EventResult::NeedsRedraw
        }
        KeyCode::Down => {
            app.history_next();
            EventResult::NeedsRedraw
        }
        KeyCode::PageUp => {
            app.scroll_up(10);
            EventResult::NeedsRedraw
        }
        KeyCode::PageDown => {
            app.scroll_down(10);
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

/// Keys in COMMAND mode (: commands)
fn handle_command_mode(app: &mut App, key: KeyEvent) -> EventResult {
    match key.code {
        KeyCode::Esc => {
            app.enter_normal_mode();
            EventResult::NeedsRedraw
        }
        KeyCode::Enter => {
            let command = app.input_buffer().to_string();
            app.clear_input();
            app.input_mode = InputMode::Normal;

            if command.len() > 1 {
                app.process_command(&command);
            }

            if app.should_quit {
                EventResult::Quit
            } else {
                EventResult::NeedsRedraw
            }
        }
        KeyCode::Left => {
            if app.cursor_position() > 1 {
                app.cursor_left();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Right => {
            app.cursor_right();
            EventResult::NeedsRedraw
        }
        KeyCode::Backspace => {
            if app.cursor_position() > 1 {
                app.backspace();
            } else {
                // Backspace on a bare ":" leaves command mode
                app.enter_normal_mode();
            }
            EventResult::NeedsRedraw
        }
        KeyCode::Char(c) => {
            app.type_char(c);
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}

fn handle_overlay_key(app: &mut App, key: KeyEvent) -> EventResult {
    let game_over = matches!(app.overlay(), Some(Overlay::GameOver));
    match key.code {
        KeyCode::Enter | KeyCode::Char('r') | KeyCode::Char('R') if game_over => {
            app.close_overlay();
            app.run_game_command("restart");
            EventResult::NeedsRedraw
        }
        KeyCode::Char('q') if game_over => EventResult::Quit,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter | KeyCode::Char('?') => {
            app.close_overlay();
            EventResult::NeedsRedraw
        }
        _ => EventResult::Continue,
    }
}
