//! Card and event definitions and the combined registry

pub mod card;
pub mod registry;

pub use card::{CardDefinition, CardName, EffectFn, Entry, EventDefinition};
pub use registry::Registry;
