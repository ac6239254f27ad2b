//! Solo deck-building card game engine
//!
//! A single-player simulation of a turn-based deck-building game:
//! a fixed catalog of cards and one-shot events, a per-game mutable
//! state of card zones and counters, and a turn state machine that
//! drives draw, treasure, buy, and cleanup phases until the terminal
//! victory pile runs out.

pub mod catalog;
pub mod core;
pub mod error;
pub mod game;
pub mod zones;

pub use error::{DominionError, Result};
