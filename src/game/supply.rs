//! Gain and buy rules over the supply table

use crate::catalog::SILVER;
use crate::core::CardDefinition;
use crate::error::DominionError;
use crate::game::effects::EffectContext;
use crate::Result;

/// Gain `card` from the supply. Fails without mutating anything when
/// the pile is already empty. On success the pile shrinks by one, the
/// per-turn gain counters advance, and the card lands in the discard,
/// or on top of the deck if an active travelling fair is in effect and
/// the player says so.
pub fn gain_card(ctx: &mut EffectContext<'_>, card: &CardDefinition) -> Result<bool> {
    let pile = ctx.state.supply.get_mut(card.name).ok_or_else(|| {
        DominionError::InvariantViolation(format!("BUG: {} has no supply pile", card.name))
    })?;
    if pile.remaining == 0 {
        ctx.decisions.show(&format!(
            "Supply pile is empty, failed to gain {}",
            card.name
        ));
        return Ok(false);
    }
    pile.remaining -= 1;
    if card.name == SILVER {
        ctx.state.gained_silvers += 1;
    }
    ctx.state.gained_cards += 1;

    let topdeck = ctx.state.travelling_faired
        && ctx
            .decisions
            .confirm(&format!("Topdeck {} for travelling fair? ", card.name))?;
    if topdeck {
        ctx.state.deck.push(card.name);
    } else {
        ctx.state.discard.push(card.name);
    }
    Ok(true)
}

/// Buy `card`: gain it, then pay any accumulated pile tax as debt.
/// Only the first successful purchase after a tax was levied pays it.
pub fn buy_card(ctx: &mut EffectContext<'_>, card: &CardDefinition) -> Result<bool> {
    if !gain_card(ctx, card)? {
        return Ok(false);
    }
    let pile = ctx.state.supply.get_mut(card.name).ok_or_else(|| {
        DominionError::InvariantViolation(format!("BUG: {} has no supply pile", card.name))
    })?;
    let tax = std::mem::take(&mut pile.tax);
    ctx.state.debt += tax as i32;
    Ok(true)
}
