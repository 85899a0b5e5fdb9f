//! The single path for operator-facing output. Everything the operator reads
//! on stdout goes through here; diagnostics go to `tracing` on stderr.

pub mod summary;
pub mod table;

use std::fmt::Display;

use console::{style, Term};

use crate::errors::FalcoriaError;

pub use summary::*;
pub use table::{column_table, key_value_table, render_column_table, render_key_value_table};

pub fn success(message: impl Display) {
    println!("{} {}", style("[+]").green().bright(), message);
}

pub fn warning(message: impl Display) {
    println!("{} {}", style("[!]").yellow().bright(), message);
}

pub fn error(message: impl Display) {
    println!("{} {}", style("[-]").red(), message);
}

pub fn plain(message: impl Display) {
    println!("{}", message);
}

pub fn header(message: impl Display) {
    println!("{}", style(message).bold());
}

pub fn blank() {
    println!();
}

/// Ask a yes/no question on the terminal. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> Result<bool, FalcoriaError> {
    let term = Term::stdout();
    term.write_str(&format!("{} [y/N]: ", question))?;
    let answer = term.read_line()?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
