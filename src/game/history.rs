//! Per-turn history snapshots
//!
//! One deep structural copy of the game state per turn, recorded at
//! the top of the turn before any mutation, and emitted as the game's
//! replay log at the end.

use crate::error::DominionError;
use crate::game::state::GameState;
use crate::Result;
use serde::Serialize;

/// A snapshot of the game state at the start of one turn.
#[derive(Debug, Clone, Serialize)]
pub struct TurnRecord {
    pub turn: u32,
    pub state: GameState,
}

/// The full ordered turn history of one game.
#[derive(Debug, Default, Serialize)]
pub struct GameHistory {
    records: Vec<TurnRecord>,
}

impl GameHistory {
    pub fn new() -> Self {
        GameHistory::default()
    }

    /// Record a structural copy of `state` for `turn`.
    pub fn record(&mut self, turn: u32, state: &GameState) {
        self.records.push(TurnRecord {
            turn,
            state: state.clone(),
        });
    }

    pub fn records(&self) -> &[TurnRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render the replay log as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.records)
            .map_err(|e| DominionError::SerializationError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, GOLD};

    #[test]
    fn test_records_are_deep_copies() {
        let mut history = GameHistory::new();
        let mut state = catalog::starting_state();
        history.record(1, &state);

        state.hand.push(GOLD);
        state.vp_tokens = 7;

        let record = &history.records()[0];
        assert_eq!(record.turn, 1);
        assert!(record.state.hand.is_empty());
        assert_eq!(record.state.vp_tokens, 0);
    }

    #[test]
    fn test_json_log_lists_turns_in_order() {
        let mut history = GameHistory::new();
        let state = catalog::starting_state();
        history.record(1, &state);
        history.record(2, &state);

        let json = history.to_json().unwrap();
        assert!(json.contains("\"turn\": 1"));
        assert!(json.contains("\"turn\": 2"));
        assert_eq!(history.len(), 2);
    }
}
