//! Card zones a card can occupy during a game

use serde::Serialize;
use std::fmt;

/// Zones of the single player's card pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Zone {
    /// Face-down draw pile; the top is the logical end.
    Deck,
    /// Cards in hand, kept sorted by name for display.
    Hand,
    /// Face-up discard pile.
    Discard,
    /// Cards played this turn.
    Play,
    /// Cards removed from the game.
    Trash,
    /// Cards set aside across turns.
    Saved,
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Zone::Deck => "deck",
            Zone::Hand => "hand",
            Zone::Discard => "discard",
            Zone::Play => "play",
            Zone::Trash => "trash",
            Zone::Saved => "saved",
        };
        f.write_str(name)
    }
}
