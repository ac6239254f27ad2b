//! The standard card and event catalog and the opening game setup
//!
//! Builds the immutable registry once at startup; duplicate names fail
//! fast here, not at first use.

use crate::core::{CardDefinition, CardName, EffectFn, EventDefinition, Registry};
use crate::game::effects;
use crate::game::state::{GameState, SupplyPile};
use crate::Result;
use rustc_hash::FxHashMap;

pub const COPPER: CardName = "COPPER";
pub const SILVER: CardName = "SILVER";
pub const GOLD: CardName = "GOLD";
pub const ESTATE: CardName = "ESTATE";
pub const DUCHY: CardName = "DUCHY";
pub const PROVINCE: CardName = "PROVINCE";
pub const CURSE: CardName = "CURSE";

/// Build the full catalog of cards and events.
pub fn standard_registry() -> Result<Registry> {
    let mut registry = Registry::new();
    register_cards(&mut registry)?;
    register_events(&mut registry)?;
    Ok(registry)
}

fn register_cards(registry: &mut Registry) -> Result<()> {
    let cards = [
        (COPPER, 0, Some(1), None),
        (SILVER, 3, Some(2), None),
        (GOLD, 6, Some(3), None),
        (ESTATE, 2, None, Some(1)),
        (DUCHY, 5, None, Some(3)),
        (PROVINCE, 8, None, Some(6)),
        (CURSE, 0, None, None),
    ];
    for (name, cost, treasure, victory) in cards {
        registry.register_card(CardDefinition {
            name,
            cost,
            treasure,
            victory,
        })?;
    }
    Ok(())
}

fn register_events(registry: &mut Registry) -> Result<()> {
    let events: [(CardName, u32, u32, Option<EffectFn>); 24] = [
        ("BORROW", 0, 0, Some(effects::borrow)),
        ("EXPEDITION", 3, 0, Some(effects::expedition)),
        ("MISSION", 4, 0, Some(effects::mission)),
        ("SAVE", 1, 0, Some(effects::save)),
        ("WEDDING", 4, 3, Some(effects::wedding)),
        ("DOMINATE", 14, 0, Some(effects::dominate)),
        ("TAX", 2, 0, Some(effects::tax)),
        ("TRAVELLING_FAIR", 2, 0, Some(effects::travelling_fair)),
        ("DONATE", 0, 8, Some(effects::donate)),
        ("DELVE", 2, 0, Some(effects::delve)),
        ("BONFIRE", 3, 0, Some(effects::bonfire)),
        ("WINDFALL", 5, 0, Some(effects::windfall)),
        ("CONQUEST", 6, 0, Some(effects::conquest)),
        ("TRIUMPH", 0, 5, Some(effects::triumph)),
        ("RITUAL", 4, 0, Some(effects::ritual)),
        ("SALT_THE_EARTH", 4, 0, Some(effects::salt_the_earth)),
        ("RAID", 5, 0, Some(effects::raid)),
        ("TRADE", 5, 0, Some(effects::trade)),
        // Stubs: registered so they parse and price, but their rules
        // are not implemented.
        // gain 2 coppers and a non-victory card costing up to 5
        ("BANQUET", 3, 0, None),
        // you may discard an attack, two curses, or six cards; if you do, gain a gold
        ("QUEST", 0, 0, None),
        // look through your discard pile, shuffle all but 5 cards into your deck, gain a duchy
        ("ANNEX", 0, 8, None),
        // +1 buy, look at the top 5 cards of your deck, discard 3 and put the rest back in any order
        ("SCOUTING_PARTY", 2, 0, None),
        // once per turn: turn your journey token over; if it's face up,
        // choose up to 3 differently named cards in play, gain a copy of each
        ("PILGRIMAGE", 4, 0, None),
        // take your -$1 token, gain 2 cards each costing up to 4
        ("BALL", 5, 0, None),
    ];
    for (name, cost, debt, effect) in events {
        registry.register_event(EventDefinition {
            name,
            cost,
            debt,
            effect,
        })?;
    }
    Ok(())
}

/// Opening state: 7 COPPER and 3 ESTATE in the discard, full supply
/// piles. Each pile starts already taxed once.
pub fn starting_state() -> GameState {
    let piles = [
        (COPPER, 60 - 7 * 2),
        (SILVER, 40),
        (GOLD, 30),
        (ESTATE, 8),
        (DUCHY, 8),
        (PROVINCE, 8),
        (CURSE, 10),
    ];
    let mut supply = FxHashMap::default();
    for (name, remaining) in piles {
        supply.insert(name, SupplyPile { remaining, tax: 1 });
    }

    let mut state = GameState::new(supply);
    for _ in 0..7 {
        state.discard.push(COPPER);
    }
    for _ in 0..3 {
        state.discard.push(ESTATE);
    }
    state
}
