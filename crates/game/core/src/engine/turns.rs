//! Post-action bookkeeping and round advancement.
//!
//! After every resolved command the scheduler runs, in order:
//!
//! 1. monster bounties for `MonsterSlain` events seen so far
//! 2. dead-piece removal (linked pieces of a dead parent die with it)
//! 3. aura refresh, then HP clamping against the refreshed max HP
//! 4. minion promotion on the enemy back rank
//! 5. victory check
//! 6. round advance, scheduled monster spawns, passive income, turn start
//!    hooks for the new side, then steps 1-3 and 5 once more

use crate::champions::EffectContext;
use crate::events::{GameEvent, GoldReason};
use crate::state::{GameResult, GameStatus, Piece, PieceId, Side};
use crate::status::{apply_debuff, refresh_auras};

/// Runs everything that follows an accepted command, including the switch
/// to the next side's turn.
pub(crate) fn finish_action(ctx: &mut EffectContext<'_>) {
    let cursor = settle(ctx, 0);
    promote(ctx);
    let finished = check_victory(ctx);

    ctx.state.round += 1;
    if finished {
        return;
    }

    spawn_monsters(ctx);
    start_turn(ctx);
    settle(ctx, cursor);
    check_victory(ctx);
    tracing::trace!(
        round = ctx.state.round,
        events = ctx.events.len(),
        "action settled"
    );
}

/// Readies a freshly built board: monsters due now, auras, turn-start event.
pub(crate) fn open_board(ctx: &mut EffectContext<'_>) {
    let round = ctx.state.round;
    let side = ctx.state.active_side();
    spawn_monsters(ctx);
    refresh_auras(ctx);
    ctx.emit(GameEvent::TurnStarted { round, side });
}

/// Bounties, removal, auras and clamping. Returns the new event cursor.
fn settle(ctx: &mut EffectContext<'_>, cursor: usize) -> usize {
    let cursor = award_bounties(ctx, cursor);
    remove_dead(ctx);
    refresh_auras(ctx);
    for piece in &mut ctx.state.pieces {
        piece.clamp_hp();
    }
    cursor
}

// ============================================================================
// Monster rewards
// ============================================================================

/// Pays the catalog bounty for every monster slain since `cursor`.
fn award_bounties(ctx: &mut EffectContext<'_>, cursor: usize) -> usize {
    let slain: Vec<(String, Side)> = ctx.events[cursor.min(ctx.events.len())..]
        .iter()
        .filter_map(|event| match event {
            GameEvent::MonsterSlain {
                unit, killer_side, ..
            } => Some((unit.clone(), *killer_side)),
            _ => None,
        })
        .collect();
    let end = ctx.events.len();

    for (unit, side) in slain {
        let template = ctx.env.template(&unit);
        let Some(bounty) = template.and_then(|t| t.bounty.as_ref()) else {
            continue;
        };
        if bounty.gold > 0 {
            ctx.state.treasury.credit(side, bounty.gold);
            ctx.emit(GameEvent::GoldAwarded {
                side,
                amount: bounty.gold,
                reason: GoldReason::Bounty,
            });
        }
        if let Some(buff) = &bounty.buff {
            let team: Vec<PieceId> = ctx
                .state
                .living()
                .filter(|p| p.side == side)
                .map(|p| p.id)
                .collect();
            for id in team {
                let mut buff = buff.clone();
                buff.caster_side = Some(side);
                apply_debuff(ctx, id, buff);
            }
        }
        tracing::debug!(%unit, %side, gold = bounty.gold, "monster bounty paid");
    }
    end
}

// ============================================================================
// Cleanup
// ============================================================================

fn remove_dead(ctx: &mut EffectContext<'_>) {
    let round = ctx.state.round;

    // Linked pieces follow their parent, transitively.
    loop {
        let state = &*ctx.state;
        let orphans: Vec<PieceId> = state
            .living()
            .filter(|p| {
                p.linked_to
                    .is_some_and(|parent| !state.piece(parent).is_some_and(Piece::is_alive))
            })
            .map(|p| p.id)
            .collect();
        if orphans.is_empty() {
            break;
        }
        for id in orphans {
            if let Some(piece) = ctx.piece_mut(id) {
                piece.hp = 0;
                piece.death_round = Some(round);
            }
            ctx.emit(GameEvent::PieceSlain {
                piece: id,
                killer: None,
                round,
            });
        }
    }

    let dead: Vec<(PieceId, u32)> = ctx
        .state
        .pieces
        .iter()
        .filter(|p| !p.is_alive())
        .map(|p| (p.id, p.death_round.unwrap_or(round)))
        .collect();
    if dead.is_empty() {
        return;
    }

    for timer in &mut ctx.state.monsters {
        let Some(current) = timer.current else {
            continue;
        };
        if let Some((_, died)) = dead.iter().find(|(id, _)| *id == current) {
            timer.current = None;
            timer.next_round =
                (timer.spawn.respawn_interval > 0).then(|| died + timer.spawn.respawn_interval);
        }
    }

    ctx.state.pieces.retain(Piece::is_alive);
    for (id, _) in dead {
        tracing::debug!(piece = %id, "piece removed");
        ctx.emit(GameEvent::PieceRemoved { piece: id });
    }
}

// ============================================================================
// Promotion
// ============================================================================

fn promote(ctx: &mut EffectContext<'_>) {
    let height = ctx.config().board_height;
    let candidates: Vec<(PieceId, String)> = ctx
        .state
        .living()
        .filter(|p| p.on_enemy_back_rank(height))
        .filter_map(|p| p.promotes_to.clone().map(|to| (p.id, to)))
        .collect();

    for (id, to) in candidates {
        let template = ctx.env.template(&to);
        let Some(piece) = ctx.piece_mut(id) else {
            continue;
        };
        let Some(template) = template else {
            tracing::warn!(
                piece = %id,
                unit = %to,
                "promotion target missing from catalog; skipped"
            );
            piece.promotes_to = None;
            continue;
        };
        let from = std::mem::take(&mut piece.unit);
        piece.transform_into(template);
        // Promotion happens once, whatever the new template says.
        piece.promotes_to = None;
        tracing::debug!(piece = %id, %from, %to, "promoted");
        ctx.emit(GameEvent::Promoted {
            piece: id,
            from,
            to,
        });
    }
}

// ============================================================================
// Victory
// ============================================================================

/// Finishes the game if the kings say so. Returns true once finished.
fn check_victory(ctx: &mut EffectContext<'_>) -> bool {
    if ctx.state.status.is_finished() {
        return true;
    }
    let kings: Vec<Side> = ctx
        .state
        .living()
        .filter(|p| p.kind.is_king() && p.side.is_player())
        .map(|p| p.side)
        .collect();

    let result = match kings.as_slice() {
        [] => Some(GameResult::Draw),
        [side] => Some(GameResult::Winner(*side)),
        _ => {
            // neutral monsters count as something else on the board
            let others = ctx.state.living().count() > kings.len();
            (!others).then_some(GameResult::Draw)
        }
    };
    let Some(result) = result else {
        return false;
    };

    ctx.state.status = GameStatus::Finished(result);
    tracing::debug!(?result, round = ctx.state.round, "game finished");
    ctx.emit(GameEvent::GameFinished { result });
    true
}

// ============================================================================
// Round advance
// ============================================================================

/// Places every scheduled monster whose round has come, if its square is free.
fn spawn_monsters(ctx: &mut EffectContext<'_>) {
    let round = ctx.state.round;
    for index in 0..ctx.state.monsters.len() {
        let timer = &ctx.state.monsters[index];
        if timer.current.is_some() || timer.next_round.is_none_or(|due| round < due) {
            continue;
        }
        let spawn = timer.spawn.clone();
        if ctx.state.is_occupied(spawn.position) {
            tracing::trace!(
                unit = %spawn.unit,
                position = %spawn.position,
                "spawn square occupied"
            );
            continue;
        }
        let Some(template) = ctx.env.template(&spawn.unit) else {
            tracing::warn!(unit = %spawn.unit, "monster missing from catalog; spawn retired");
            ctx.state.monsters[index].next_round = None;
            continue;
        };

        let id = ctx.state.spawn(template, Side::Neutral, spawn.position);
        let timer = &mut ctx.state.monsters[index];
        timer.current = Some(id);
        timer.next_round = None;
        tracing::debug!(piece = %id, unit = %spawn.unit, round, "monster spawned");
        ctx.emit(GameEvent::MonsterSpawned {
            piece: id,
            unit: spawn.unit,
            position: spawn.position,
        });
    }
}

/// Income, turn-start event and `pre_enter_turn` for the side now active.
/// Neutral monsters run their upkeep on blue turns.
fn start_turn(ctx: &mut EffectContext<'_>) {
    let round = ctx.state.round;
    let side = ctx.state.active_side();

    let income = ctx.config().passive_income;
    if income > 0 {
        ctx.state.treasury.credit(side, income);
        ctx.emit(GameEvent::GoldAwarded {
            side,
            amount: income,
            reason: GoldReason::Income,
        });
    }
    ctx.emit(GameEvent::TurnStarted { round, side });
    tracing::debug!(round, %side, "turn started");

    refresh_auras(ctx);

    let upkeep: Vec<PieceId> = ctx
        .state
        .living()
        .filter(|p| p.side == side || (side == Side::Blue && p.is_neutral()))
        .map(|p| p.id)
        .collect();
    for id in upkeep {
        let Some(kind) = ctx.living(id).map(|p| p.kind) else {
            continue;
        };
        ctx.nested(|ctx| kind.behavior().on_pre_enter_turn(ctx, id));
    }
}
