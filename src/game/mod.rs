//! Game state, effect resolution, and the turn engine

pub mod decision;
pub mod effects;
pub mod engine;
pub mod history;
pub mod interactive;
pub mod scripted;
pub mod state;
pub mod supply;

pub use decision::{parse_answer, Answer, DecisionProvider};
pub use engine::{GameLoop, GameResult};
pub use history::{GameHistory, TurnRecord};
pub use interactive::InteractiveProvider;
pub use scripted::ScriptedProvider;
pub use state::{GameState, SupplyPile};
