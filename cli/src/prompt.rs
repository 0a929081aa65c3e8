//! Terminal prompts. Passwords are read without echo when stdin is a TTY.

#[cfg(test)]
#[path = "prompt_test.rs"]
mod prompt_test;

use std::io::{self, BufRead, IsTerminal, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;

/// What a key press does to a hidden input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Submit,
    Cancel,
}

/// Apply `key` to `input`.
pub fn apply_key(input: &mut String, key: KeyEvent) -> KeyOutcome {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => KeyOutcome::Cancel,
        KeyCode::Char('c' | 'd') if ctrl => KeyOutcome::Cancel,
        KeyCode::Enter => KeyOutcome::Submit,
        KeyCode::Backspace => {
            input.pop();
            KeyOutcome::Continue
        }
        KeyCode::Char(c) if !ctrl => {
            input.push(c);
            KeyOutcome::Continue
        }
        _ => KeyOutcome::Continue,
    }
}

/// Restores cooked mode on drop.
struct RawMode;

impl RawMode {
    fn enable() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        if let Err(e) = terminal::disable_raw_mode() {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
    }
}

/// Read one visible line.
fn read_line(label: &str) -> io::Result<String> {
    eprint!("{label}");
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}

/// Read a secret. Returns `None` when the user cancels.
pub fn read_secret(label: &str) -> io::Result<Option<String>> {
    if !io::stdin().is_terminal() {
        return read_line(label).map(Some);
    }
    eprint!("{label}");
    io::stderr().flush()?;

    let mut input = String::new();
    let outcome = {
        let _raw = RawMode::enable()?;
        loop {
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match apply_key(&mut input, key) {
                KeyOutcome::Continue => {}
                done => break done,
            }
        }
    };
    eprintln!();
    Ok((outcome == KeyOutcome::Submit).then_some(input))
}
