//! Deterministic commitment to a board snapshot.

use sha2::{Digest, Sha256};

use super::GameState;

impl GameState {
    /// SHA-256 over the bincode encoding of the whole board.
    ///
    /// Two replays of the same commands with the same seed must produce the
    /// same root; any divergence in pieces, gold, round or status changes it.
    pub fn state_root(&self) -> [u8; 32] {
        let mut hasher = Sha256::new();
        // bincode is deterministic for the types used on the board
        if let Ok(bytes) = bincode::serialize(self) {
            hasher.update(&bytes);
        }
        hasher.finalize().into()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GameConfig;
    use crate::state::GameState;
    use crate::testing::PieceBuilder;

    #[test]
    fn root_changes_with_the_board() {
        let mut state = GameState::new(&GameConfig::without_monsters());
        state.insert(PieceBuilder::new("a").build());
        let before = state.state_root();

        assert_eq!(before, state.clone().state_root());

        state.pieces[0].hp -= 1;
        assert_ne!(before, state.state_root());
        assert_eq!(hex::encode(before).len(), 64);
    }
}
