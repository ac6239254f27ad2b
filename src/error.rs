//! Error types for the game engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DominionError {
    /// A name failed unique-prefix resolution. Call sites recover by
    /// showing the message and reprompting.
    #[error("{0}")]
    ParseError(String),

    /// A registered event whose rules are still a stub was invoked.
    /// The purchase that triggered it fails; the engine keeps running.
    #[error("Unimplemented event: {0}")]
    UnimplementedEffect(&'static str),

    /// An internal numeric or inventory invariant broke. Fatal.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// A scripted decision provider ran out of answers.
    #[error("Decision script exhausted at prompt: {0}")]
    ScriptExhausted(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DominionError>;
