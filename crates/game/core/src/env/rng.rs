//! Combat randomness.
//!
//! Critical strikes and hit chances draw from a [`CombatRng`] handle passed
//! into every action. Nothing in the engine reads ambient randomness, so a
//! replay with the same seed and commands reproduces the same board.

/// Source of combat randomness threaded through action resolution.
///
/// Implementations must be deterministic for a given seed.
pub trait CombatRng {
    /// Next raw 32-bit value in the sequence.
    fn next_u32(&mut self) -> u32;

    /// Uniform roll in `0..100`.
    fn roll_percent(&mut self) -> u32 {
        self.next_u32() % 100
    }

    /// Returns true with probability `percent`/100. Values ≤ 0 never
    /// succeed and values ≥ 100 always do, without consuming a roll.
    fn chance(&mut self, percent: i32) -> bool {
        if percent <= 0 {
            return false;
        }
        if percent >= 100 {
            return true;
        }
        (self.roll_percent() as i32) < percent
    }
}

/// PCG random number generator (PCG-XSH-RR, 64-bit state, 32-bit output).
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator whose sequence is fully determined by `seed`.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            state: mix_seed(seed),
        }
    }

    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR permutation of the LCG state.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl CombatRng for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Spreads low-entropy seeds (0, 1, 2, ...) across the state space.
fn mix_seed(seed: u64) -> u64 {
    let mut hash = seed ^ 0x9e3779b97f4a7c15;
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ceb9fe1a85ec53);
    hash ^= hash >> 33;
    hash
}

/// Replays a fixed list of percent rolls, for tests and scripted scenarios.
///
/// Each value is returned verbatim by [`CombatRng::roll_percent`]. Once the
/// script is exhausted every roll returns 99, so percentage checks below
/// 100 fail.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedRng {
    rolls: Vec<u32>,
    cursor: usize,
}

impl ScriptedRng {
    pub fn new(rolls: impl Into<Vec<u32>>) -> Self {
        Self {
            rolls: rolls.into(),
            cursor: 0,
        }
    }

    /// A script that never succeeds on any check below 100%.
    pub fn always_fail() -> Self {
        Self::default()
    }

    /// Rolls consumed so far.
    pub fn consumed(&self) -> usize {
        self.cursor
    }
}

impl CombatRng for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.rolls.get(self.cursor).copied().unwrap_or(99);
        self.cursor += 1;
        value
    }
}
