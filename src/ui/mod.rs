//! Leveled console output
//!
//! Informational messages go to stdout, warnings and errors to stderr.
//! Warnings never abort the run; errors are printed by the caller right
//! before a non-zero exit. Colors honor NO_COLOR.

use anstyle::{AnsiColor, Color, Style};
use std::fmt::Display;

const CYAN: Style = Style::new().fg_color(Some(Color::Ansi(AnsiColor::Cyan)));
const YELLOW: Style = Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Yellow)));
const GREEN: Style = Style::new().bold().fg_color(Some(Color::Ansi(AnsiColor::Green)));

fn colors_enabled() -> bool {
  std::env::var_os("NO_COLOR").is_none()
}

fn paint(style: Style, text: &str) -> String {
  if colors_enabled() {
    format!("{}{}{}", style.render(), text, style.render_reset())
  } else {
    text.to_string()
  }
}

/// Informational message
pub fn info(msg: impl Display) {
  println!("{}", paint(CYAN, &format!("ℹ️  {}", msg)));
}

/// A pipeline step starting
pub fn step(msg: impl Display) {
  println!("▸ {}", msg);
}

/// Non-fatal warning
pub fn warn(msg: impl Display) {
  eprintln!("{}", paint(YELLOW, &format!("⚠️  {}", msg)));
}

/// Successful completion of a step or the whole run
pub fn success(msg: impl Display) {
  println!("{}", paint(GREEN, &format!("✅ {}", msg)));
}

/// Dry-run notice: something that would have happened
pub fn dry_run(msg: impl Display) {
  println!("{}", paint(CYAN, &format!("🔍 [dry-run] {}", msg)));
}

/// Print a prompt and read one trimmed line from stdin
///
/// Returns `None` on EOF, which callers treat as cancellation.
pub fn prompt(msg: impl Display) -> std::io::Result<Option<String>> {
  use std::io::{BufRead, Write};

  print!("{} ", msg);
  std::io::stdout().flush()?;

  let mut line = String::new();
  let read = std::io::stdin().lock().read_line(&mut line)?;
  if read == 0 {
    return Ok(None);
  }

  Ok(Some(line.trim().to_string()))
}
