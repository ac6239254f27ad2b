//! The turn state machine
//!
//! Drives one turn after another: TurnStart (termination check, counter
//! reset, history snapshot), Draw, Treasure, DebtSettle, the Buy loop,
//! Cleanup, the conditional Donate subphase, and the mission check that
//! can loop straight into a bonus turn without advancing the turn
//! counter. Execution is strictly sequential; at most one decision
//! request is outstanding at any time.

use crate::catalog::PROVINCE;
use crate::core::{CardDefinition, Entry, Registry};
use crate::error::DominionError;
use crate::game::decision::{parse_answer, Answer, DecisionProvider};
use crate::game::effects::{self, ask_card_or_done, EffectContext};
use crate::game::history::GameHistory;
use crate::game::state::{position, GameState};
use crate::game::supply;
use crate::zones::Zone;
use crate::Result;
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Outcome of a completed game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    /// Completed turns. Mission turns share their parent's number.
    pub turns_played: u32,
    /// Final score at game end.
    pub score: u32,
}

/// Drives the phase state machine until the terminal victory pile runs
/// out, calling into the supply rules and the effect resolver, and
/// blocking on the decision provider wherever the player must choose.
pub struct GameLoop<'a> {
    registry: &'a Registry,
    state: &'a mut GameState,
    rng: Box<dyn RngCore>,
    history: GameHistory,
    cheat: bool,
    turn: u32,
}

impl<'a> GameLoop<'a> {
    pub fn new(registry: &'a Registry, state: &'a mut GameState) -> Self {
        GameLoop {
            registry,
            state,
            rng: Box::new(rand::thread_rng()),
            history: GameHistory::new(),
            cheat: false,
            turn: 1,
        }
    }

    /// Seed the shuffle RNG for deterministic games.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Box::new(ChaCha8Rng::seed_from_u64(seed));
        self
    }

    /// Render literal deck and discard contents instead of counts.
    pub fn with_cheat(mut self, cheat: bool) -> Self {
        self.cheat = cheat;
        self
    }

    /// The per-turn snapshot log recorded so far.
    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// Run the game to completion.
    pub fn run(&mut self, decisions: &mut dyn DecisionProvider) -> Result<GameResult> {
        loop {
            // TurnStart: the game ends before any mutation for this
            // turn once the terminal victory pile is gone.
            if self.terminal_pile_empty()? {
                decisions.show("NO MORE PROVINCES!");
                break;
            }
            self.state.reset_turn_counters();
            self.history.record(self.turn, self.state);

            self.draw_phase();
            decisions.show(&self.state.render(self.registry, self.cheat)?);

            self.treasure_phase(decisions)?;
            self.state.settle_debt()?;
            if self.state.debt > 0 {
                decisions.show(&format!("Ended buy phase with {} debt", self.state.debt));
            }

            self.buy_phase(decisions)?;
            self.cleanup_phase();
            self.donate_subphase(decisions)?;

            if self.mission_check(decisions) {
                continue;
            }
            decisions.show(&format!("Turn {} ended", self.turn));
            decisions.show("-----------------------------------");
            self.turn += 1;
        }

        decisions.show(&self.state.render(self.registry, true)?);
        Ok(GameResult {
            turns_played: self.turn - 1,
            score: self.state.victory_points(self.registry)?,
        })
    }

    fn terminal_pile_empty(&self) -> Result<bool> {
        match self.state.supply.get(PROVINCE) {
            Some(pile) => Ok(pile.remaining == 0),
            None => Err(DominionError::InvariantViolation(
                "BUG: PROVINCE has no supply pile".to_string(),
            )),
        }
    }

    /// Draw 5 + extra cards, then merge any saved cards into hand.
    fn draw_phase(&mut self) {
        let mut ndrawn = 5;
        if self.state.extra_draw > 0 {
            ndrawn += self.state.extra_draw;
            self.state.extra_draw = 0;
        }
        for _ in 0..ndrawn {
            self.state.draw(self.rng.as_mut());
        }
        if !self.state.saved.is_empty() {
            let saved = std::mem::take(&mut self.state.saved);
            self.state.hand.extend(saved);
        }
    }

    /// Play treasures one at a time, all at once, or not at all. Exits
    /// when no treasure remains in hand or on an explicit stop.
    fn treasure_phase(&mut self, decisions: &mut dyn DecisionProvider) -> Result<()> {
        while self.state.has_treasure(self.registry)? {
            let line = decisions.line("Play treasure: ")?;
            match parse_answer(&line) {
                Answer::Done => break,
                Answer::All => {
                    while let Some(index) = self.state.find_treasure(self.registry)? {
                        self.state.play_treasure(self.registry, index)?;
                    }
                }
                Answer::Name(name) => {
                    let played = match self.registry.lookup_card(&name) {
                        Ok(card) => card,
                        Err(DominionError::ParseError(msg)) => {
                            decisions.show(&msg);
                            decisions.show(&format!("Failed to parse {name}"));
                            continue;
                        }
                        Err(other) => return Err(other),
                    };
                    let Some(index) = position(&self.state.hand, played.name) else {
                        decisions.show(&format!("No {} in hand", played.name));
                        continue;
                    };
                    self.state.play_treasure(self.registry, index)?;
                }
            }
        }
        Ok(())
    }

    /// The buy loop: one purchase per remaining buy while no debt is
    /// outstanding. Parse and afford failures reprompt without cost; an
    /// unimplemented event effect fails after cost and debt are already
    /// applied, so it still consumes the buy.
    fn buy_phase(&mut self, decisions: &mut dyn DecisionProvider) -> Result<()> {
        while self.state.buys > 0 && self.state.debt == 0 {
            let prompt = format!(
                "${}, {} buys. Buy a card: ",
                self.state.money, self.state.buys
            );
            let line = decisions.line(&prompt)?;
            if matches!(parse_answer(&line), Answer::Done) {
                break;
            }
            let bought = match self.registry.lookup(&line) {
                Ok(entry) => entry,
                Err(DominionError::ParseError(msg)) => {
                    decisions.show(&msg);
                    decisions.show(&format!("Failed to parse {}", line.trim()));
                    continue;
                }
                Err(other) => return Err(other),
            };
            if bought.cost() as i32 > self.state.money {
                decisions.show(&format!("Can't afford card: {}", bought.name()));
                continue;
            }

            match bought {
                Entry::Card(card) => {
                    if self.state.is_mission_turn {
                        decisions.show(&format!("Can't buy card on mission turn: {}", card.name));
                        continue;
                    }
                    if !self.pile_has_stock(card)? {
                        decisions.show(&format!(
                            "Supply pile is empty, failed to gain {}",
                            card.name
                        ));
                        continue;
                    }
                    self.state.money -= card.cost as i32;
                    let mut ctx = EffectContext {
                        registry: self.registry,
                        state: &mut *self.state,
                        decisions: &mut *decisions,
                    };
                    if !supply::buy_card(&mut ctx, card)? {
                        // The pile was checked a moment ago; an empty
                        // one here is an engine bug.
                        return Err(DominionError::InvariantViolation(format!(
                            "BUG: validated gain failed for {}",
                            card.name
                        )));
                    }
                }
                Entry::Event(event) => {
                    self.state.money -= event.cost as i32;
                    self.state.debt += event.debt as i32;
                    let mut ctx = EffectContext {
                        registry: self.registry,
                        state: &mut *self.state,
                        decisions: &mut *decisions,
                    };
                    match effects::resolve(&mut ctx, event) {
                        Ok(()) => {}
                        Err(DominionError::UnimplementedEffect(name)) => {
                            // Cost and debt stay paid; the buy below is
                            // still consumed.
                            decisions.show(&format!("Unimplemented card: {name}"));
                        }
                        Err(other) => return Err(other),
                    }
                }
            }

            self.state.settle_debt()?;
            self.state.buys -= 1;
        }
        Ok(())
    }

    fn pile_has_stock(&self, card: &CardDefinition) -> Result<bool> {
        match self.state.supply.get(card.name) {
            Some(pile) => Ok(pile.remaining > 0),
            None => Err(DominionError::InvariantViolation(format!(
                "BUG: {} has no supply pile",
                card.name
            ))),
        }
    }

    /// Move all of hand and play into the discard.
    fn cleanup_phase(&mut self) {
        let hand = std::mem::take(&mut self.state.hand);
        self.state.discard.extend(hand);
        let play = std::mem::take(&mut self.state.play);
        self.state.discard.extend(play);
    }

    /// When a Donate was bought this turn: flush the deck into the
    /// discard and offer voluntary trashing until the player stops or
    /// the discard is empty.
    fn donate_subphase(&mut self, decisions: &mut dyn DecisionProvider) -> Result<()> {
        if !self.state.donated {
            return Ok(());
        }
        let deck = std::mem::take(&mut self.state.deck);
        self.state.discard.extend(deck);
        decisions.show(&format!(
            "Donate some cards: {}",
            self.state.discard.join(" ")
        ));
        while !self.state.discard.is_empty() {
            let Some(card) = ask_card_or_done(self.registry, decisions, "Donate a card? ")? else {
                break;
            };
            let Some(index) = position(&self.state.discard, card.name) else {
                decisions.show(&format!(
                    "No {} in deck: {}",
                    card.name,
                    self.state.discard.join(" ")
                ));
                continue;
            };
            self.state.trash_from(Zone::Discard, index);
        }
        Ok(())
    }

    /// Returns true when a bonus mission turn should follow without
    /// advancing the turn counter. Mission turns cannot nest.
    fn mission_check(&mut self, decisions: &mut dyn DecisionProvider) -> bool {
        if self.state.take_mission_turn {
            if self.state.is_mission_turn {
                decisions.show("Can't mission on a mission turn");
            } else {
                self.state.is_mission_turn = true;
                self.state.take_mission_turn = false;
                decisions.show("-- Taking mission turn --");
                return true;
            }
        }
        self.state.is_mission_turn = false;
        self.state.take_mission_turn = false;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{self, COPPER, ESTATE, GOLD, SILVER};
    use crate::game::scripted::ScriptedProvider;

    fn setup() -> (Registry, GameState) {
        (
            catalog::standard_registry().unwrap(),
            catalog::starting_state(),
        )
    }

    #[test]
    fn test_game_ends_immediately_on_exhausted_terminal_pile() {
        let (registry, mut state) = setup();
        state.supply.get_mut(PROVINCE).unwrap().remaining = 0;
        let mut game = GameLoop::new(&registry, &mut state);
        let mut decisions = ScriptedProvider::new(&[]);

        let result = game.run(&mut decisions).unwrap();
        assert_eq!(result.turns_played, 0);
        assert!(game.history().is_empty());
        assert!(decisions.saw("NO MORE PROVINCES!"));
    }

    #[test]
    fn test_play_all_treasures_from_hand() {
        let (registry, mut state) = setup();
        state.hand = vec![COPPER, COPPER, SILVER];
        let mut decisions = ScriptedProvider::new(&["all"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.treasure_phase(&mut decisions).unwrap();
        }
        assert_eq!(state.play.len(), 3);
        assert!(!state.has_treasure(&registry).unwrap());
        assert_eq!(state.money, 1 + 1 + 2);
        assert_eq!(decisions.remaining(), 0);
    }

    #[test]
    fn test_play_named_treasure_then_stop() {
        let (registry, mut state) = setup();
        state.hand = vec![COPPER, ESTATE, SILVER];
        let mut decisions = ScriptedProvider::new(&["silv", "done"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.treasure_phase(&mut decisions).unwrap();
        }
        assert_eq!(state.play, vec![SILVER]);
        assert_eq!(state.money, 2);
        assert_eq!(state.hand, vec![COPPER, ESTATE]);
    }

    #[test]
    fn test_treasure_prompt_reprompts_on_unknown_names() {
        let (registry, mut state) = setup();
        state.hand = vec![COPPER];
        let mut decisions = ScriptedProvider::new(&["xyzzy", "gold", "copper"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.treasure_phase(&mut decisions).unwrap();
        }
        assert!(decisions.saw("No such card: xyzzy"));
        assert!(decisions.saw("No GOLD in hand"));
        assert_eq!(state.money, 1);
    }

    #[test]
    fn test_unaffordable_buy_is_rejected_without_mutation() {
        let (registry, mut state) = setup();
        state.money = 2;
        let supply_before = state.supply.clone();
        let mut decisions = ScriptedProvider::new(&["province", "done"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.buy_phase(&mut decisions).unwrap();
        }
        assert!(decisions.saw("Can't afford card: PROVINCE"));
        assert_eq!(state.money, 2);
        assert_eq!(state.buys, 1);
        assert_eq!(state.supply, supply_before);
    }

    #[test]
    fn test_buying_a_card_pays_its_pile_tax_once() {
        let (registry, mut state) = setup();
        state.money = 10;
        let mut decisions = ScriptedProvider::new(&["silver"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.buy_phase(&mut decisions).unwrap();
        }
        // Cost 3, plus the pile's starting tax of 1 settled as debt.
        assert_eq!(state.money, 6);
        assert_eq!(state.debt, 0);
        assert_eq!(state.buys, 0);
        assert_eq!(state.supply[SILVER].tax, 0);
        assert_eq!(state.supply[SILVER].remaining, 39);
        assert!(state.discard.ends_with(&[SILVER]));
    }

    #[test]
    fn test_cards_cannot_be_bought_on_mission_turns() {
        let (registry, mut state) = setup();
        state.money = 10;
        state.is_mission_turn = true;
        let mut decisions = ScriptedProvider::new(&["silver", "done"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.buy_phase(&mut decisions).unwrap();
        }
        assert!(decisions.saw("Can't buy card on mission turn: SILVER"));
        assert_eq!(state.money, 10);
        assert_eq!(state.buys, 1);
    }

    #[test]
    fn test_events_can_be_bought_on_mission_turns() {
        let (registry, mut state) = setup();
        state.money = 10;
        state.is_mission_turn = true;
        let mut decisions = ScriptedProvider::new(&["expedition"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.buy_phase(&mut decisions).unwrap();
        }
        assert_eq!(state.extra_draw, 2);
        assert_eq!(state.money, 7);
    }

    #[test]
    fn test_unimplemented_event_still_consumes_the_buy() {
        let (registry, mut state) = setup();
        state.money = 10;
        let mut decisions = ScriptedProvider::new(&["banquet"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.buy_phase(&mut decisions).unwrap();
        }
        assert!(decisions.saw("Unimplemented card: BANQUET"));
        assert_eq!(state.money, 7);
        assert_eq!(state.buys, 0);
    }

    #[test]
    fn test_buy_loop_stops_while_debt_remains() {
        let (registry, mut state) = setup();
        state.money = 2;
        state.buys = 2;
        let mut decisions = ScriptedProvider::new(&["donate"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.buy_phase(&mut decisions).unwrap();
        }
        // Donate is free but leaves 8 debt; 2 money settle against it
        // and the remaining debt ends the loop with a buy to spare.
        assert!(state.donated);
        assert_eq!(state.money, 0);
        assert_eq!(state.debt, 6);
        assert_eq!(state.buys, 1);
        assert_eq!(decisions.remaining(), 0);
    }

    #[test]
    fn test_draw_phase_draws_five_plus_extra() {
        let (registry, mut state) = setup();
        state.discard.clear();
        state.deck = vec![COPPER; 10];
        state.extra_draw = 2;
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.draw_phase();
        }
        assert_eq!(state.hand.len(), 7);
        assert_eq!(state.deck.len(), 3);
        assert_eq!(state.extra_draw, 0);
    }

    #[test]
    fn test_minus_card_token_costs_one_draw_this_turn_only() {
        let (registry, mut state) = setup();
        state.discard.clear();
        state.deck = vec![COPPER; 12];
        state.minus_card_token = true;
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.draw_phase();
        }
        assert_eq!(state.hand.len(), 4);
        assert!(!state.minus_card_token);

        state.hand.clear();
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.draw_phase();
        }
        assert_eq!(state.hand.len(), 5);
    }

    #[test]
    fn test_saved_cards_rejoin_the_hand_after_drawing() {
        let (registry, mut state) = setup();
        state.discard.clear();
        state.saved = vec![GOLD];
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.draw_phase();
        }
        assert_eq!(state.hand, vec![GOLD]);
        assert!(state.saved.is_empty());
    }

    #[test]
    fn test_cleanup_moves_hand_and_play_to_discard() {
        let (registry, mut state) = setup();
        state.discard.clear();
        state.hand = vec![ESTATE];
        state.play = vec![COPPER, SILVER];
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.cleanup_phase();
        }
        assert!(state.hand.is_empty());
        assert!(state.play.is_empty());
        assert_eq!(state.discard, vec![ESTATE, COPPER, SILVER]);
    }

    #[test]
    fn test_donate_subphase_offers_the_whole_deck() {
        let (registry, mut state) = setup();
        state.donated = true;
        state.discard = vec![COPPER];
        state.deck = vec![GOLD];
        let mut decisions = ScriptedProvider::new(&["gold", "done"]);
        {
            let mut game = GameLoop::new(&registry, &mut state);
            game.donate_subphase(&mut decisions).unwrap();
        }
        assert!(state.deck.is_empty());
        assert_eq!(state.discard, vec![COPPER]);
        assert_eq!(state.trash, vec![GOLD]);
        assert!(decisions.saw("Donate some cards: COPPER GOLD"));
    }

    #[test]
    fn test_mission_check_grants_one_unnumbered_bonus_turn() {
        let (registry, mut state) = setup();
        state.take_mission_turn = true;
        let mut decisions = ScriptedProvider::new(&[]);
        let mut game = GameLoop::new(&registry, &mut state);
        assert!(game.mission_check(&mut decisions));
        assert!(game.state.is_mission_turn);
        assert!(!game.state.take_mission_turn);

        // A mission bought during a mission turn is refused.
        game.state.take_mission_turn = true;
        assert!(!game.mission_check(&mut decisions));
        assert!(!game.state.is_mission_turn);
        assert!(!game.state.take_mission_turn);
        assert!(decisions.saw("Can't mission on a mission turn"));
    }
}
