//! ASCII RPG terminal front-end.
//!
//! A vim-style terminal interface for the roguelike in `rpg-core`.
//!
//! # Headless Mode
//!
//! Run with `--headless` for a line-oriented interface suitable for scripts:
//!
//! ```bash
//! printf 'start\ngo forest\nattack\n' | cargo run -p rpg -- --headless --seed 42
//! ```

mod app;
mod events;
mod headless;
mod screen;
mod ui;

use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rpg_core::persist::validate_slot;
use rpg_core::{FileStore, Game, GameConfig};

use app::App;
use events::{handle_event, EventResult};
use headless::HeadlessDisplay;
use screen::TuiDisplay;
use ui::render::render;

const TICK: Duration = Duration::from_millis(60);

#[derive(Parser, Debug)]
#[command(
    name = "ascii-rpg",
    author,
    version,
    about = "A seeded roguelike played in the terminal"
)]
struct Args {
    /// Plain stdin/stdout mode instead of the TUI
    #[arg(long)]
    headless: bool,

    /// World seed; the same seed builds the same dungeons
    #[arg(short, long, env = "ASCII_RPG_SEED")]
    seed: Option<u64>,

    /// Starting character name
    #[arg(short, long, env = "ASCII_RPG_NAME")]
    name: Option<String>,

    /// Directory holding save files
    #[arg(long, env = "ASCII_RPG_SAVE_DIR")]
    save_dir: Option<PathBuf>,

    /// Save slot used by `save` and `load`
    #[arg(long, env = "ASCII_RPG_SLOT", value_parser = parse_slot)]
    slot: Option<String>,

    /// Write logs to this file (the TUI owns the terminal otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn parse_slot(slot: &str) -> Result<String, String> {
    validate_slot(slot).map_err(|e| e.to_string())?;
    Ok(slot.to_string())
}

impl Args {
    fn config(&self) -> GameConfig {
        let mut config = GameConfig::new();
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        if let Some(name) = &self.name {
            config = config.with_player_name(name.as_str());
        }
        if let Some(slot) = &self.slot {
            config = config.with_save_slot(slot.as_str());
        }
        config
    }

    fn save_dir(&self) -> PathBuf {
        self.save_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("ascii-rpg"))
                .unwrap_or_else(|| PathBuf::from("."))
        })
    }
}

/// Logs go to `--log-file` when given; headless mode falls back to stderr.
fn init_tracing(args: &Args) -> anyhow::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    match &args.log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
                .init();
        }
        None if args.headless => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(io::stderr))
                .init();
        }
        None => {}
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    init_tracing(&args)?;

    let config = args.config();
    let save_dir = args.save_dir();
    tracing::info!(seed = ?config.seed, save_dir = %save_dir.display(), "starting");
    let store = Box::new(FileStore::new(save_dir));

    if args.headless {
        let mut game = Game::new(config, HeadlessDisplay::new(), store);
        headless::run_stdio(&mut game)?;
        return Ok(());
    }

    let game = Game::new(config, TuiDisplay::new(), store);

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, App::new(game));

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result.context("terminal UI failed")
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render(f, &app))?;

        if event::poll(TICK)? {
            let ev = event::read()?;
            if handle_event(&mut app, ev) == EventResult::Quit {
                return Ok(());
            }
        } else {
            app.tick();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_flag_rejects_paths() {
        assert!(Args::try_parse_from(["ascii-rpg", "--slot", "../outside"]).is_err());
        let args = Args::try_parse_from(["ascii-rpg", "--slot", "second"]).unwrap();
        assert_eq!(args.config().save_slot, "second");
    }
}
