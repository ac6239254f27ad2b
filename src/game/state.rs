//! The mutable per-game state
//!
//! One `GameState` exists per game. It is mutated in place by whichever
//! phase is currently active and structurally copied for the per-turn
//! history log.

use crate::core::{CardName, Registry};
use crate::error::DominionError;
use crate::zones::Zone;
use crate::Result;
use rand::seq::SliceRandom;
use rand::RngCore;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// One supply pile: remaining purchasable copies plus any accumulated
/// tax surcharge waiting for the next buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SupplyPile {
    pub remaining: u32,
    pub tax: u32,
}

/// The single mutable value object representing zones, counters, and
/// supply. Snapshots are plain [`Clone`]s.
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    /// Draw pile; the top is the end of the vector.
    pub deck: Vec<CardName>,
    /// Kept sorted by name for display; order is otherwise irrelevant.
    pub hand: Vec<CardName>,
    pub discard: Vec<CardName>,
    pub play: Vec<CardName>,
    pub trash: Vec<CardName>,
    /// Cards set aside across turns.
    pub saved: Vec<CardName>,

    pub buys: u32,
    pub money: i32,
    pub debt: i32,
    pub vp_tokens: u32,
    /// SILVER gains this turn; several event effects read this.
    pub gained_silvers: u32,
    /// All successful gains this turn.
    pub gained_cards: u32,
    /// Additional cards to draw next draw phase.
    pub extra_draw: u32,

    pub borrowed: bool,
    pub travelling_faired: bool,
    /// When set, the next draw is skipped instead of drawing.
    pub minus_card_token: bool,
    pub take_mission_turn: bool,
    pub is_mission_turn: bool,
    pub donated: bool,

    pub supply: FxHashMap<CardName, SupplyPile>,
}

/// Index of the first copy of `name` in `cards`.
pub fn position(cards: &[CardName], name: CardName) -> Option<usize> {
    cards.iter().position(|&card| card == name)
}

impl GameState {
    /// Fresh state with empty zones and the given supply table.
    pub fn new(supply: FxHashMap<CardName, SupplyPile>) -> Self {
        GameState {
            deck: Vec::new(),
            hand: Vec::new(),
            discard: Vec::new(),
            play: Vec::new(),
            trash: Vec::new(),
            saved: Vec::new(),
            buys: 1,
            money: 0,
            debt: 0,
            vp_tokens: 0,
            gained_silvers: 0,
            gained_cards: 0,
            extra_draw: 0,
            borrowed: false,
            travelling_faired: false,
            minus_card_token: false,
            take_mission_turn: false,
            is_mission_turn: false,
            donated: false,
            supply,
        }
    }

    /// Reset the per-turn counters at the top of a turn.
    pub fn reset_turn_counters(&mut self) {
        self.buys = 1;
        self.money = 0;
        self.borrowed = false;
        self.donated = false;
        self.travelling_faired = false;
        self.gained_silvers = 0;
        self.gained_cards = 0;
    }

    pub fn zone(&self, zone: Zone) -> &Vec<CardName> {
        match zone {
            Zone::Deck => &self.deck,
            Zone::Hand => &self.hand,
            Zone::Discard => &self.discard,
            Zone::Play => &self.play,
            Zone::Trash => &self.trash,
            Zone::Saved => &self.saved,
        }
    }

    pub fn zone_mut(&mut self, zone: Zone) -> &mut Vec<CardName> {
        match zone {
            Zone::Deck => &mut self.deck,
            Zone::Hand => &mut self.hand,
            Zone::Discard => &mut self.discard,
            Zone::Play => &mut self.play,
            Zone::Trash => &mut self.trash,
            Zone::Saved => &mut self.saved,
        }
    }

    /// Move the card at `index` of `zone` into the trash.
    pub fn trash_from(&mut self, zone: Zone, index: usize) {
        let name = self.zone_mut(zone).remove(index);
        self.trash.push(name);
    }

    /// Draw one card into hand, reshuffling the discard into the deck
    /// when the deck is empty. Consumes the minus-card token instead of
    /// drawing when it is set; a draw with deck and discard both empty
    /// is a no-op.
    pub fn draw(&mut self, rng: &mut dyn RngCore) {
        if self.minus_card_token {
            self.minus_card_token = false;
            return;
        }
        if self.deck.is_empty() {
            if self.discard.is_empty() {
                return;
            }
            self.deck = std::mem::take(&mut self.discard);
            self.deck.shuffle(rng);
        }
        if let Some(card) = self.deck.pop() {
            self.hand.push(card);
            self.hand.sort_unstable();
        }
    }

    /// Index of the first treasure in hand, if any.
    pub fn find_treasure(&self, registry: &Registry) -> Result<Option<usize>> {
        for (i, &name) in self.hand.iter().enumerate() {
            if registry.card(name)?.treasure.is_some() {
                return Ok(Some(i));
            }
        }
        Ok(None)
    }

    pub fn has_treasure(&self, registry: &Registry) -> Result<bool> {
        Ok(self.find_treasure(registry)?.is_some())
    }

    /// Move the hand card at `index` into play and add its currency
    /// value to money. Playing a non-treasure here is an internal bug.
    pub fn play_treasure(&mut self, registry: &Registry, index: usize) -> Result<()> {
        let name = *self.hand.get(index).ok_or_else(|| {
            DominionError::InvariantViolation(format!(
                "BUG: no hand card at index {index}"
            ))
        })?;
        let value = registry.card(name)?.treasure.ok_or_else(|| {
            DominionError::InvariantViolation(format!(
                "Card {name} in {} is not a treasure",
                self.hand.join(" ")
            ))
        })?;
        self.play.push(self.hand.remove(index));
        self.money += value as i32;
        Ok(())
    }

    /// Automatically pay down debt from available money. Negative debt
    /// or money here is a bug, not a recoverable condition.
    pub fn settle_debt(&mut self) -> Result<()> {
        if self.debt < 0 {
            return Err(DominionError::InvariantViolation(format!(
                "Negative debt?! {}",
                self.debt
            )));
        }
        if self.money < 0 {
            return Err(DominionError::InvariantViolation(format!(
                "Negative money?! {}",
                self.money
            )));
        }
        let payment = self.debt.min(self.money);
        self.debt -= payment;
        self.money -= payment;
        Ok(())
    }

    /// Current score: victory-point tokens plus the victory value of
    /// every card in hand, discard, or deck. Cards in play or trash do
    /// not count. An unregistered name in a scored zone is fatal.
    pub fn victory_points(&self, registry: &Registry) -> Result<u32> {
        let mut vps = self.vp_tokens;
        for zone in [&self.hand, &self.discard, &self.deck] {
            for &name in zone {
                if let Some(victory) = registry.card(name)?.victory {
                    vps += victory;
                }
            }
        }
        Ok(vps)
    }

    /// Total copies of `name` across every zone plus the remaining
    /// supply. Constant for the whole game for every catalog card.
    pub fn census(&self, name: CardName) -> u32 {
        let in_zones = [
            &self.deck,
            &self.hand,
            &self.discard,
            &self.play,
            &self.trash,
            &self.saved,
        ]
        .iter()
        .map(|zone| zone.iter().filter(|&&card| card == name).count() as u32)
        .sum::<u32>();
        let in_supply = self.supply.get(name).map_or(0, |pile| pile.remaining);
        in_zones + in_supply
    }

    /// Per-turn snapshot text: hand contents, deck/discard sizes (or
    /// literal contents in cheat mode), score, and debt when nonzero.
    pub fn render(&self, registry: &Registry, cheat: bool) -> Result<String> {
        let mut lines = vec![format!("HAND: {}", self.hand.join(" "))];
        if cheat {
            lines.push(format!("DECK: {}", self.deck.join(" ")));
            lines.push(format!("DISCARD: {}", self.discard.join(" ")));
        } else {
            lines.push(format!("DECK: {} cards", self.deck.len()));
            lines.push(format!("DISCARD: {} cards", self.discard.len()));
        }
        lines.push(format!("VPS: {}", self.victory_points(registry)?));
        if self.debt > 0 {
            lines.push(format!("DEBT: {}", self.debt));
        }
        Ok(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, COPPER, DUCHY, ESTATE, GOLD, PROVINCE, SILVER};
    use rand::rngs::mock::StepRng;

    fn rng() -> StepRng {
        StepRng::new(0, 1)
    }

    #[test]
    fn test_draw_with_everything_empty_is_a_noop() {
        let mut state = catalog::starting_state();
        state.discard.clear();
        state.draw(&mut rng());
        assert!(state.hand.is_empty());
        assert!(state.deck.is_empty());
    }

    #[test]
    fn test_draw_reshuffles_discard_into_deck() {
        let mut state = catalog::starting_state();
        state.discard = vec![COPPER, SILVER, GOLD];
        state.draw(&mut rng());
        assert!(state.discard.is_empty());
        assert_eq!(state.deck.len(), 2);
        assert_eq!(state.hand.len(), 1);
    }

    #[test]
    fn test_minus_card_token_skips_exactly_one_draw() {
        let mut state = catalog::starting_state();
        state.discard.clear();
        state.deck = vec![COPPER, COPPER, COPPER];
        state.minus_card_token = true;
        state.draw(&mut rng());
        assert!(state.hand.is_empty());
        assert!(!state.minus_card_token);
        state.draw(&mut rng());
        assert_eq!(state.hand.len(), 1);
    }

    #[test]
    fn test_hand_stays_sorted_while_drawing() {
        let mut state = catalog::starting_state();
        state.discard.clear();
        state.deck = vec![SILVER, ESTATE, COPPER];
        for _ in 0..3 {
            state.draw(&mut rng());
        }
        assert_eq!(state.hand, vec![COPPER, ESTATE, SILVER]);
    }

    #[test]
    fn test_play_treasure_moves_card_and_adds_money() {
        let registry = catalog::standard_registry().unwrap();
        let mut state = catalog::starting_state();
        state.hand = vec![ESTATE, SILVER];
        state.play_treasure(&registry, 1).unwrap();
        assert_eq!(state.hand, vec![ESTATE]);
        assert_eq!(state.play, vec![SILVER]);
        assert_eq!(state.money, 2);
    }

    #[test]
    fn test_playing_a_non_treasure_is_fatal() {
        let registry = catalog::standard_registry().unwrap();
        let mut state = catalog::starting_state();
        state.hand = vec![ESTATE];
        let err = state.play_treasure(&registry, 0).unwrap_err();
        assert!(matches!(err, DominionError::InvariantViolation(_)));
    }

    #[test]
    fn test_settle_debt_pays_from_money() {
        let mut state = catalog::starting_state();
        state.money = 5;
        state.debt = 3;
        state.settle_debt().unwrap();
        assert_eq!(state.money, 2);
        assert_eq!(state.debt, 0);

        state.money = 1;
        state.debt = 4;
        state.settle_debt().unwrap();
        assert_eq!(state.money, 0);
        assert_eq!(state.debt, 3);
    }

    #[test]
    fn test_settle_debt_rejects_negative_amounts() {
        let mut state = catalog::starting_state();
        state.money = -1;
        assert!(state.settle_debt().is_err());

        let mut state = catalog::starting_state();
        state.debt = -1;
        assert!(state.settle_debt().is_err());
    }

    #[test]
    fn test_victory_points_ignores_play_and_trash() {
        let registry = catalog::standard_registry().unwrap();
        let mut state = catalog::starting_state();
        state.vp_tokens = 2;
        state.hand = vec![ESTATE];
        state.deck = vec![PROVINCE];
        state.discard = vec![DUCHY];
        state.play = vec![ESTATE];
        state.trash = vec![PROVINCE];
        // 2 tokens + 1 (estate) + 6 (province) + 3 (duchy)
        assert_eq!(state.victory_points(&registry).unwrap(), 12);
    }

    #[test]
    fn test_census_counts_zones_and_supply() {
        let mut state = catalog::starting_state();
        // 7 coppers in the starting discard plus 46 in supply.
        assert_eq!(state.census(COPPER), 53);
        state.hand.push(COPPER);
        assert_eq!(state.census(COPPER), 54);
    }

    #[test]
    fn test_render_hides_deck_contents_unless_cheating() {
        let registry = catalog::standard_registry().unwrap();
        let mut state = catalog::starting_state();
        state.deck = vec![GOLD];
        let normal = state.render(&registry, false).unwrap();
        assert!(normal.contains("DECK: 1 cards"));
        let cheat = state.render(&registry, true).unwrap();
        assert!(cheat.contains("DECK: GOLD"));
        assert!(!normal.contains("DEBT"));
        state.debt = 2;
        assert!(state.render(&registry, false).unwrap().contains("DEBT: 2"));
    }
}
