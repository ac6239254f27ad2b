//! Event effect resolution
//!
//! Each implemented event is a plain function over an [`EffectContext`].
//! Effects mutate counters and flags directly, gain cards through the
//! supply rules, and issue decision requests through the provider,
//! retrying indefinitely on invalid answers. Events whose rules are
//! intentionally unimplemented resolve to
//! [`DominionError::UnimplementedEffect`].

use crate::catalog::{CURSE, ESTATE, GOLD, PROVINCE, SILVER};
use crate::core::{CardDefinition, EventDefinition, Registry};
use crate::error::DominionError;
use crate::game::decision::DecisionProvider;
use crate::game::state::{position, GameState};
use crate::game::supply;
use crate::zones::Zone;
use crate::Result;

/// Everything an effect may touch: the catalog, the game state, and
/// the decision boundary.
pub struct EffectContext<'a> {
    pub registry: &'a Registry,
    pub state: &'a mut GameState,
    pub decisions: &'a mut dyn DecisionProvider,
}

/// Run an event's effect against the game state.
pub fn resolve(ctx: &mut EffectContext<'_>, event: &EventDefinition) -> Result<()> {
    match event.effect {
        Some(effect) => effect(ctx),
        None => Err(DominionError::UnimplementedEffect(event.name)),
    }
}

/// Ask for a card name until the answer resolves to a registered card.
pub fn ask_card<'r>(
    registry: &'r Registry,
    decisions: &mut dyn DecisionProvider,
    prompt: &str,
) -> Result<&'r CardDefinition> {
    loop {
        let line = decisions.line(prompt)?;
        match registry.lookup_card(&line) {
            Ok(card) => return Ok(card),
            Err(DominionError::ParseError(msg)) => decisions.show(&msg),
            Err(other) => return Err(other),
        }
    }
}

/// As [`ask_card`], but NONE/DONE ends the surrounding loop early and
/// yields `None`.
pub fn ask_card_or_done<'r>(
    registry: &'r Registry,
    decisions: &mut dyn DecisionProvider,
    prompt: &str,
) -> Result<Option<&'r CardDefinition>> {
    loop {
        let line = decisions.line(prompt)?;
        if matches!(line.trim().to_uppercase().as_str(), "NONE" | "DONE") {
            return Ok(None);
        }
        match registry.lookup_card(&line) {
            Ok(card) => return Ok(Some(card)),
            Err(DominionError::ParseError(msg)) => decisions.show(&msg),
            Err(other) => return Err(other),
        }
    }
}

/// Ask for a card until the named card is found in `zone`; returns the
/// index of its first copy there.
pub fn choose_from_zone(ctx: &mut EffectContext<'_>, zone: Zone, prompt: &str) -> Result<usize> {
    loop {
        let card = ask_card(ctx.registry, ctx.decisions, prompt)?;
        match position(ctx.state.zone(zone), card.name) {
            Some(index) => return Ok(index),
            None => ctx.decisions.show(&format!(
                "No {} in {}: {}",
                card.name,
                zone,
                ctx.state.zone(zone).join(" ")
            )),
        }
    }
}

/// +1 money, +1 buy, and the next draw is skipped. Once per turn; a
/// second invocation is a logged no-op.
pub fn borrow(ctx: &mut EffectContext<'_>) -> Result<()> {
    if ctx.state.borrowed {
        ctx.decisions.show("Can't borrow twice in one turn");
        return Ok(());
    }
    ctx.state.borrowed = true;
    ctx.state.money += 1;
    ctx.state.minus_card_token = true;
    ctx.state.buys += 1;
    Ok(())
}

/// +2 cards on next turn's draw.
pub fn expedition(ctx: &mut EffectContext<'_>) -> Result<()> {
    ctx.state.extra_draw += 2;
    Ok(())
}

/// Take an extra turn after this one.
pub fn mission(ctx: &mut EffectContext<'_>) -> Result<()> {
    ctx.state.take_mission_turn = true;
    Ok(())
}

/// +1 buy; set one chosen hand card aside until next turn. The choice
/// is automatic when the hand has exactly one card.
pub fn save(ctx: &mut EffectContext<'_>) -> Result<()> {
    ctx.state.buys += 1;
    if ctx.state.hand.is_empty() {
        return Ok(());
    }
    let index = if ctx.state.hand.len() == 1 {
        0
    } else {
        choose_from_zone(ctx, Zone::Hand, "Choose a card to save: ")?
    };
    let card = ctx.state.hand.remove(index);
    ctx.state.saved.push(card);
    Ok(())
}

/// +1 victory-point token, gain a GOLD.
pub fn wedding(ctx: &mut EffectContext<'_>) -> Result<()> {
    ctx.state.vp_tokens += 1;
    let gold = ctx.registry.card(GOLD)?;
    supply::gain_card(ctx, gold)?;
    Ok(())
}

/// Gain a PROVINCE; +9 victory-point tokens if that worked.
pub fn dominate(ctx: &mut EffectContext<'_>) -> Result<()> {
    let province = ctx.registry.card(PROVINCE)?;
    if supply::gain_card(ctx, province)? {
        ctx.state.vp_tokens += 9;
    }
    Ok(())
}

/// Add +2 tax to a chosen supply pile.
pub fn tax(ctx: &mut EffectContext<'_>) -> Result<()> {
    loop {
        let card = ask_card(ctx.registry, ctx.decisions, "Choose a card to tax: ")?;
        match ctx.state.supply.get_mut(card.name) {
            Some(pile) => {
                pile.tax += 2;
                return Ok(());
            }
            None => ctx
                .decisions
                .show(&format!("{} is not in the supply", card.name)),
        }
    }
}

/// +2 buys; gains may be topdecked for the rest of the turn.
pub fn travelling_fair(ctx: &mut EffectContext<'_>) -> Result<()> {
    ctx.state.buys += 2;
    ctx.state.travelling_faired = true;
    Ok(())
}

/// At end of turn, the whole deck is offered for voluntary trashing.
pub fn donate(ctx: &mut EffectContext<'_>) -> Result<()> {
    ctx.state.donated = true;
    Ok(())
}

/// +1 buy, gain a SILVER.
pub fn delve(ctx: &mut EffectContext<'_>) -> Result<()> {
    ctx.state.buys += 1;
    let silver = ctx.registry.card(SILVER)?;
    supply::gain_card(ctx, silver)?;
    Ok(())
}

/// Trash exactly two chosen cards from play.
pub fn bonfire(ctx: &mut EffectContext<'_>) -> Result<()> {
    let mut trashed = 0;
    while trashed < 2 {
        let index = choose_from_zone(ctx, Zone::Play, "Choose a card to trash: ")?;
        ctx.state.trash_from(Zone::Play, index);
        trashed += 1;
    }
    Ok(())
}

/// Gain three GOLD, but only with deck and discard both empty.
pub fn windfall(ctx: &mut EffectContext<'_>) -> Result<()> {
    if ctx.state.deck.is_empty() && ctx.state.discard.is_empty() {
        let gold = ctx.registry.card(GOLD)?;
        for _ in 0..3 {
            supply::gain_card(ctx, gold)?;
        }
    }
    Ok(())
}

/// Gain two SILVER, then +1 victory-point token per SILVER gained this
/// turn (including earlier gains).
pub fn conquest(ctx: &mut EffectContext<'_>) -> Result<()> {
    let silver = ctx.registry.card(SILVER)?;
    supply::gain_card(ctx, silver)?;
    supply::gain_card(ctx, silver)?;
    ctx.state.vp_tokens += ctx.state.gained_silvers;
    Ok(())
}

/// Gain an ESTATE; if that worked, +1 victory-point token per card
/// gained this turn (the estate included).
pub fn triumph(ctx: &mut EffectContext<'_>) -> Result<()> {
    let estate = ctx.registry.card(ESTATE)?;
    if supply::gain_card(ctx, estate)? {
        ctx.state.vp_tokens += ctx.state.gained_cards;
    }
    Ok(())
}

/// Gain a CURSE; if that worked, trash a chosen hand card and add
/// victory-point tokens equal to its cost.
pub fn ritual(ctx: &mut EffectContext<'_>) -> Result<()> {
    let curse = ctx.registry.card(CURSE)?;
    if !supply::gain_card(ctx, curse)? {
        return Ok(());
    }
    if ctx.state.hand.is_empty() {
        ctx.decisions.show("No card to trash");
        return Ok(());
    }
    let index = choose_from_zone(ctx, Zone::Hand, "Choose a card to trash: ")?;
    let name = ctx.state.hand[index];
    ctx.state.trash_from(Zone::Hand, index);
    ctx.state.vp_tokens += ctx.registry.card(name)?.cost;
    Ok(())
}

/// +1 victory-point token; permanently remove one copy of a chosen
/// victory card from its supply pile into the trash. Not a gain, so
/// the gain counters stay put.
pub fn salt_the_earth(ctx: &mut EffectContext<'_>) -> Result<()> {
    ctx.state.vp_tokens += 1;
    loop {
        let card = ask_card(
            ctx.registry,
            ctx.decisions,
            "Choose a victory card to trash from supply: ",
        )?;
        if card.victory.is_none() {
            ctx.decisions
                .show(&format!("{} is not a victory card", card.name));
            continue;
        }
        let pile = ctx.state.supply.get_mut(card.name).ok_or_else(|| {
            DominionError::InvariantViolation(format!("BUG: {} has no supply pile", card.name))
        })?;
        if pile.remaining == 0 {
            ctx.decisions
                .show(&format!("No more {} in supply", card.name));
            continue;
        }
        pile.remaining -= 1;
        ctx.state.trash.push(card.name);
        return Ok(());
    }
}

/// Gain one SILVER per SILVER currently in play.
pub fn raid(ctx: &mut EffectContext<'_>) -> Result<()> {
    let num_silvers = ctx
        .state
        .play
        .iter()
        .filter(|&&name| name == SILVER)
        .count();
    let silver = ctx.registry.card(SILVER)?;
    for _ in 0..num_silvers {
        supply::gain_card(ctx, silver)?;
    }
    Ok(())
}

/// Trash up to two chosen hand cards (NONE/DONE exits early), then
/// gain one SILVER per card trashed.
pub fn trade(ctx: &mut EffectContext<'_>) -> Result<()> {
    let mut num_trashed = 0;
    while num_trashed < 2 {
        let Some(card) = ask_card_or_done(ctx.registry, ctx.decisions, "Trash a card from hand? ")?
        else {
            break;
        };
        let Some(index) = position(&ctx.state.hand, card.name) else {
            ctx.decisions.show(&format!(
                "No {} in hand: {}",
                card.name,
                ctx.state.hand.join(" ")
            ));
            continue;
        };
        // Parity quirk: the removal happens out of the discard pile at
        // the index located in hand, not out of the hand itself.
        if index < ctx.state.discard.len() {
            ctx.state.trash_from(Zone::Discard, index);
        }
        num_trashed += 1;
    }
    let silver = ctx.registry.card(SILVER)?;
    for _ in 0..num_trashed {
        supply::gain_card(ctx, silver)?;
    }
    Ok(())
}
