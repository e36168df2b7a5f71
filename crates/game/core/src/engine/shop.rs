//! Item purchases: pricing, recipes and slot limits.

use super::ActionError;
use crate::champions::EffectContext;
use crate::config::GameConfig;
use crate::env::GameEnv;
use crate::events::GameEvent;
use crate::state::{ItemInstance, Piece, PieceId, Side};

/// A validated purchase, ready to apply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Purchase {
    pub item: ItemInstance,
    /// Gold actually charged after recipe credit.
    pub price: u32,
    /// Indices into the buyer's item list consumed by the recipe, ascending.
    pub consumed: Vec<usize>,
}

/// Validates buying `name` for `piece` without touching the board.
///
/// Recipe components already held are consumed and their cost credited
/// against the price. The slot cap is checked after that consumption.
pub fn plan_purchase(
    treasury_gold: u32,
    env: &GameEnv<'_>,
    piece: &Piece,
    name: &str,
) -> Result<Purchase, ActionError> {
    let definition = env
        .item(name)
        .ok_or_else(|| ActionError::UnknownItem(name.to_owned()))?;

    if definition.unique && piece.items.iter().any(|held| held.name == definition.name) {
        return Err(ActionError::UniqueItemHeld(definition.name.clone()));
    }

    let mut consumed = Vec::new();
    let mut credit = 0u32;
    for component in &definition.recipe {
        let slot = piece
            .items
            .iter()
            .enumerate()
            .find(|(index, held)| held.name == *component && !consumed.contains(index));
        if let Some((index, held)) = slot {
            consumed.push(index);
            credit = credit.saturating_add(held.cost);
        }
    }
    consumed.sort_unstable();

    if piece.items.len() - consumed.len() >= GameConfig::MAX_ITEMS {
        return Err(ActionError::ItemCapReached);
    }

    let price = definition.cost.saturating_sub(credit);
    if treasury_gold < price {
        return Err(ActionError::InsufficientGold {
            needed: price,
            available: treasury_gold,
        });
    }

    Ok(Purchase {
        item: ItemInstance::from_definition(definition),
        price,
        consumed,
    })
}

/// Charges the buyer's side and swaps recipe components for the new item.
pub fn purchase(ctx: &mut EffectContext<'_>, buyer: PieceId, side: Side, purchase: Purchase) {
    if !ctx.state.treasury.debit(side, purchase.price) {
        tracing::warn!(%side, price = purchase.price, "purchase no longer affordable; skipped");
        return;
    }
    ctx.emit(GameEvent::GoldSpent {
        side,
        amount: purchase.price,
    });

    let Some(piece) = ctx.piece_mut(buyer) else {
        return;
    };
    let mut consumed = Vec::with_capacity(purchase.consumed.len());
    for index in purchase.consumed.iter().rev() {
        consumed.push(piece.items.remove(*index).name);
    }
    consumed.reverse();

    let name = purchase.item.name.clone();
    if piece.items.try_push(purchase.item).is_err() {
        tracing::warn!(piece = %buyer, item = %name, "item slots full after purchase");
        return;
    }
    tracing::debug!(piece = %buyer, item = %name, price = purchase.price, "item purchased");
    ctx.emit(GameEvent::ItemPurchased {
        piece: buyer,
        item: name,
        consumed,
    });
}
