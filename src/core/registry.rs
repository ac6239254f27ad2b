//! Combined card/event catalog with unique-prefix lookup
//!
//! The registry is built once at startup and never mutated afterwards.
//! Registration rejects duplicate names across both sub-catalogs;
//! lookup resolves case-insensitive unique prefixes over the combined
//! name space.

use crate::core::card::{CardDefinition, CardName, Entry, EventDefinition};
use crate::error::DominionError;
use crate::Result;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Immutable catalog of card and event definitions.
#[derive(Debug, Default)]
pub struct Registry {
    entries: FxHashMap<CardName, Entry>,
    /// Names in registration order, for stable prefix matching and
    /// stable diagnostics.
    names: Vec<CardName>,
}

impl Registry {
    pub fn new() -> Self {
        Registry::default()
    }

    /// Register a card or event definition.
    ///
    /// A name collision with any existing entry is an unrecoverable
    /// startup error, not a runtime one.
    pub fn register(&mut self, entry: Entry) -> Result<()> {
        let name = entry.name();
        if self.entries.contains_key(name) {
            return Err(DominionError::InvariantViolation(format!(
                "multiple cards/events with name: {name}"
            )));
        }
        self.names.push(name);
        self.entries.insert(name, entry);
        Ok(())
    }

    pub fn register_card(&mut self, card: CardDefinition) -> Result<()> {
        self.register(Entry::Card(card))
    }

    pub fn register_event(&mut self, event: EventDefinition) -> Result<()> {
        self.register(Entry::Event(event))
    }

    /// Exact-name fetch over the combined name space.
    pub fn get(&self, name: &str) -> Option<&Entry> {
        self.entries.get(name)
    }

    /// Resolve a case-insensitive unique prefix over the combined name
    /// space. Zero matches and multiple matches both fail with a
    /// [`DominionError::ParseError`]; nothing is mutated either way.
    pub fn lookup(&self, prefix: &str) -> Result<&Entry> {
        let upper = prefix.trim().to_uppercase();
        let mut matches: SmallVec<[CardName; 4]> = SmallVec::new();
        for name in &self.names {
            if name.starts_with(&upper) {
                matches.push(name);
            }
        }
        match matches.len() {
            0 => Err(DominionError::ParseError(format!(
                "No such card: {prefix}"
            ))),
            1 => Ok(&self.entries[matches[0]]),
            _ => Err(DominionError::ParseError(format!(
                "Error: Multiple cards: {}",
                matches.join(" ")
            ))),
        }
    }

    /// As [`lookup`](Registry::lookup), but events are rejected.
    pub fn lookup_card(&self, prefix: &str) -> Result<&CardDefinition> {
        match self.lookup(prefix)? {
            Entry::Card(card) => Ok(card),
            Entry::Event(event) => Err(DominionError::ParseError(format!(
                "{} is an event, not a card!",
                event.name
            ))),
        }
    }

    /// Fetch a card the engine itself depends on (base currencies, the
    /// victory piles). A missing or mistyped name here is a bug in the
    /// catalog, not a user-input problem.
    pub fn card(&self, name: CardName) -> Result<&CardDefinition> {
        match self.entries.get(name) {
            Some(Entry::Card(card)) => Ok(card),
            _ => Err(DominionError::InvariantViolation(format!(
                "BUG: {name} is not a registered card"
            ))),
        }
    }
}
