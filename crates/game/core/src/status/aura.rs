//! Aura projection.
//!
//! Auras never touch stats directly. Each refresh first strips every
//! aura-derived debuff whose source no longer reaches its holder, then
//! re-projects a fresh debuff from every active aura onto each piece in
//! range. Projections bypass immunity and unique checks.

use std::collections::BTreeSet;

use crate::champions::EffectContext;
use crate::state::{Aura, GameState, Piece};

/// Whether `aura` carried by `source` currently reaches `candidate`.
pub fn aura_reaches(aura: &Aura, source: &Piece, candidate: &Piece) -> bool {
    aura.active
        && source.id != candidate.id
        && candidate.is_alive()
        && (source.is_alive() || !aura.requires_caster_alive)
        && source.position.chebyshev(candidate.position) <= aura.range
        && aura.filter.matches(source.side, candidate.side)
}

/// Strips stale projections, then re-projects every live aura.
pub fn refresh_auras(ctx: &mut EffectContext<'_>) {
    cleanup_auras(ctx.state);
    project_auras(ctx.state);
}

/// Removes aura-derived debuffs that no source currently justifies.
pub fn cleanup_auras(state: &mut GameState) {
    let expected: Vec<BTreeSet<String>> = state
        .pieces
        .iter()
        .map(|holder| {
            state
                .pieces
                .iter()
                .flat_map(|source| {
                    source
                        .auras
                        .iter()
                        .filter(move |aura| aura_reaches(aura, source, holder))
                        .map(Aura::debuff_id)
                })
                .collect()
        })
        .collect();

    for (holder, keep) in state.pieces.iter_mut().zip(expected) {
        holder
            .debuffs
            .retain(|d| !d.is_aura_projection() || keep.contains(&d.id));
    }
}

/// Replaces each reachable target's projection with a fresh copy.
pub fn project_auras(state: &mut GameState) {
    let mut projections = Vec::new();
    for source in &state.pieces {
        for aura in &source.auras {
            for candidate in &state.pieces {
                if aura_reaches(aura, source, candidate) {
                    projections.push((candidate.id, aura.clone(), source.id, source.side));
                }
            }
        }
    }

    for (target, aura, caster, caster_side) in projections {
        let stamp = state.next_stamp();
        let debuff = aura.project(caster, caster_side, stamp);
        if let Some(piece) = state.piece_mut(target) {
            piece.debuffs.retain(|d| d.id != debuff.id);
            piece.debuffs.push(debuff);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::state::{AuraFilter, Side};
    use crate::stats::{StatKind, StatModifier};
    use crate::testing::PieceBuilder;

    fn ward() -> Aura {
        Aura::new("ward", 1, AuraFilter::Allies)
            .with_effects(vec![StatModifier::add(StatKind::PhysicalResistance, 10)])
    }

    fn guardian() -> Piece {
        PieceBuilder::new("guardian")
            .side(Side::Blue)
            .at(3, 3)
            .aura(ward())
            .build()
    }

    fn board() -> GameState {
        GameState::new(&GameConfig::without_monsters())
    }

    #[test]
    fn aura_buffs_allies_in_range_but_not_its_source() {
        let mut state = board();
        let guard = state.insert(guardian());
        let near = state.insert(PieceBuilder::new("ally").side(Side::Blue).at(4, 4).build());
        let far = state.insert(PieceBuilder::new("ally").side(Side::Blue).at(6, 6).build());
        let foe = state.insert(PieceBuilder::new("foe").side(Side::Red).at(3, 4).build());

        cleanup_auras(&mut state);
        project_auras(&mut state);

        let resist = |state: &GameState, id| state.piece(id).map(|p| p.physical_resistance());
        assert_eq!(resist(&state, near), Some(10));
        assert_eq!(resist(&state, far), Some(0));
        assert_eq!(resist(&state, foe), Some(0));
        assert_eq!(resist(&state, guard), Some(0));
    }

    #[test]
    fn leaving_range_strips_the_projection() {
        let mut state = board();
        state.insert(guardian());
        let ally = state.insert(PieceBuilder::new("ally").side(Side::Blue).at(3, 4).build());
        project_auras(&mut state);

        if let Some(piece) = state.piece_mut(ally) {
            piece.position = crate::state::Position::new(3, 6);
        }
        cleanup_auras(&mut state);

        assert!(state.piece(ally).is_some_and(|p| p.debuffs.is_empty()));
    }

    #[test]
    fn repeated_projection_does_not_stack() {
        let mut state = board();
        state.insert(guardian());
        let ally = state.insert(PieceBuilder::new("ally").side(Side::Blue).at(3, 4).build());

        project_auras(&mut state);
        project_auras(&mut state);

        assert_eq!(state.piece(ally).map(|p| p.debuffs.len()), Some(1));
    }

    #[test]
    fn dead_source_stops_projecting() {
        let mut state = board();
        let guard = state.insert(guardian());
        let ally = state.insert(PieceBuilder::new("ally").side(Side::Blue).at(3, 4).build());
        project_auras(&mut state);

        if let Some(piece) = state.piece_mut(guard) {
            piece.hp = 0;
        }
        cleanup_auras(&mut state);

        assert!(state.piece(ally).is_some_and(|p| p.debuffs.is_empty()));
    }
}
