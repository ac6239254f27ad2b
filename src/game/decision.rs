//! The decision boundary between the engine and the player
//!
//! Phases and effects never touch stdin directly; every question goes
//! through this trait. The real game plugs in the interactive provider;
//! tests substitute a scripted one and replay a fixed answer script.
//! The engine issues at most one outstanding request at a time and
//! blocks until it is answered.

use crate::Result;

/// External source of player decisions, plus the sink for everything
/// the player is shown.
pub trait DecisionProvider {
    /// Ask a yes/no question. Implementations keep asking until they
    /// have a definite answer.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;

    /// Ask for one line of free text.
    fn line(&mut self, prompt: &str) -> Result<String>;

    /// Surface a diagnostic or a state render to the player.
    fn show(&mut self, text: &str);
}

/// One parsed line of the interactive protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    /// A (possibly partial) card or event name.
    Name(String),
    /// NONE/DONE: stop the current loop.
    Done,
    /// ALL: play every treasure remaining in hand.
    All,
}

/// Recognize the meta-tokens of the line protocol; anything else is
/// treated as a name to resolve against the registry.
pub fn parse_answer(line: &str) -> Answer {
    let token = line.trim();
    match token.to_uppercase().as_str() {
        "NONE" | "DONE" => Answer::Done,
        "ALL" => Answer::All,
        _ => Answer::Name(token.to_string()),
    }
}
