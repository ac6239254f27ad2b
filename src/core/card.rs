//! Card and event definitions
//!
//! Definitions are immutable once registered. Cards and events share a
//! single name space; [`Entry`](crate::core::Entry) is the tagged union
//! consumers match on.

/// Name of a card or event in the fixed catalog.
pub type CardName = &'static str;

/// Effect procedure run when an event is bought.
///
/// Effects mutate the game state through the context and may suspend on
/// decision requests before returning.
pub type EffectFn = fn(&mut crate::game::effects::EffectContext<'_>) -> crate::Result<()>;

/// A purchasable card pile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDefinition {
    pub name: CardName,

    /// Acquisition cost in money.
    pub cost: u32,

    /// Fixed currency value when played during the treasure phase.
    pub treasure: Option<u32>,

    /// Fixed score value when counted at scoring time.
    pub victory: Option<u32>,
}

/// A one-shot purchasable event.
#[derive(Debug, Clone)]
pub struct EventDefinition {
    pub name: CardName,

    /// Acquisition cost in money.
    pub cost: u32,

    /// Debt incurred on purchase, applied before the effect runs.
    pub debt: u32,

    /// The event's effect, or `None` for catalog entries whose rules are
    /// intentionally left unimplemented.
    pub effect: Option<EffectFn>,
}

/// A registry entry: either a card pile or an event.
#[derive(Debug, Clone)]
pub enum Entry {
    Card(CardDefinition),
    Event(EventDefinition),
}

impl Entry {
    pub fn name(&self) -> CardName {
        match self {
            Entry::Card(card) => card.name,
            Entry::Event(event) => event.name,
        }
    }

    pub fn cost(&self) -> u32 {
        match self {
            Entry::Card(card) => card.cost,
            Entry::Event(event) => event.cost,
        }
    }

    /// Debt cost incurred on purchase. Cards never carry one.
    pub fn debt(&self) -> u32 {
        match self {
            Entry::Card(_) => 0,
            Entry::Event(event) => event.debt,
        }
    }
}
