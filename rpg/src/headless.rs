//! Headless mode.
//!
//! A plain line-oriented interface for scripted play and automated testing:
//! - every line read is sent to the game as a command
//! - lines starting with `#` are front-end commands (quit, status, help)
//! - game output is written as-is, followed by a blank line

use std::io::{self, BufRead, Write};

use rpg_core::{Game, GameDisplay, GameState, StatusLine};

/// Buffers engine output until the loop writes it out.
#[derive(Debug, Default)]
pub struct HeadlessDisplay {
    lines: Vec<String>,
    status: Option<StatusLine>,
    game_over: Option<(String, String)>,
}

impl HeadlessDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    fn drain(&mut self) -> Vec<String> {
        let mut out = std::mem::take(&mut self.lines);
        if let Some((title, message)) = self.game_over.take() {
            out.push(format!("[GAME OVER] {title}: {message}"));
        }
        out
    }
}

impl GameDisplay for HeadlessDisplay {
    fn append(&mut self, text: &str) {
        // The typed line is already visible on the terminal
        if !text.starts_with("> ") {
            self.lines.push(text.to_string());
        }
    }

    fn set_status(&mut self, status: &StatusLine) {
        self.status = Some(status.clone());
    }

    fn game_over(&mut self, title: &str, message: &str) {
        self.game_over = Some((title.to_string(), message.to_string()));
    }
}

const META_HELP: &str = "[HELP]
  #quit    - Exit
  #status  - Show the status line
  #help    - Show this help
Anything else is a game command; type 'help' for those.";

fn flush<W: Write>(game: &mut Game<HeadlessDisplay>, out: &mut W) -> io::Result<()> {
    for line in game.display_mut().drain() {
        writeln!(out, "{line}")?;
    }
    out.flush()
}

/// Drive a game from `input` until EOF or `#quit`.
pub fn run<R: BufRead, W: Write>(
    game: &mut Game<HeadlessDisplay>,
    input: R,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "=== ASCII RPG Headless Mode (seed {}) ===", game.seed())?;
    flush(game, out)?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(meta) = line.strip_prefix('#') {
            match meta.split_whitespace().next() {
                Some("quit") | Some("exit") => {
                    writeln!(out, "Goodbye!")?;
                    break;
                }
                Some("status") => {
                    let state = game.state();
                    match &game.display().status {
                        Some(status) => writeln!(out, "[STATUS] {status} | {}", state.label())?,
                        None => writeln!(out, "[STATUS] {}", state.label())?,
                    }
                }
                Some("help") => writeln!(out, "{META_HELP}")?,
                Some(other) => writeln!(out, "[ERROR] Unknown command: #{other}")?,
                None => writeln!(out, "[ERROR] Empty command")?,
            }
            continue;
        }

        tracing::debug!(command = line, "headless input");
        game.execute(line);
        flush(game, out)?;
        writeln!(out)?;

        if game.state() == GameState::Dead {
            tracing::info!("player died; waiting for restart");
        }
    }

    Ok(())
}

/// Run against the process's stdin and stdout.
pub fn run_stdio(game: &mut Game<HeadlessDisplay>) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run(game, stdin.lock(), &mut stdout)
}
