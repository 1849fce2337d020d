//! Seeded randomness for the combat rules.
//!
//! Every probabilistic rule (dodge, passive evasion, grit resistance,
//! cleanse/purge selection, AI skill choice) draws through [`CombatRng`], so a
//! fight replays identically from the same seed. Oracles are pure functions of
//! their seed; all state lives in the roll nonce.

use std::sync::Arc;

use crate::combatant::CombatantId;

/// Maps a mixed seed to a random value. Same seed, same value.
pub trait RngOracle: Send + Sync {
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a uniform value in `[0, 1)`.
    fn next_unit(&self, seed: u64) -> f64 {
        self.next_u32(seed) as f64 / (u32::MAX as f64 + 1.0)
    }
}

/// One PCG-XSH-RR step over the seed: 64-bit state in, 32-bit output.
///
/// Stateless: the caller's seed is the whole state, so the same mixed seed
/// always maps to the same output.
///
/// See O'Neill, "PCG: A Family of Simple Fast Space-Efficient Statistically
/// Good Algorithms for Random Number Generation" (pcg-random.org).
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// Knuth's 64-bit LCG multiplier, the PCG reference default.
    const MULTIPLIER: u64 = 6364136223846793005;
    /// Odd increment; any odd value gives the full 2^64 period.
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Oracle that ignores the seed and always yields the same value.
///
/// `FixedRng::LOW` makes every `chance` roll succeed, `FixedRng::HIGH` makes
/// every roll below certainty fail. Used to pin outcomes in tests and
/// scripted encounters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedRng(pub u32);

impl FixedRng {
    pub const LOW: Self = Self(0);
    pub const HIGH: Self = Self(u32::MAX);
}

impl RngOracle for FixedRng {
    fn next_u32(&self, _seed: u64) -> u32 {
        self.0
    }
}

/// Mixes the combat seed, roll nonce, combatant and [`RollContext`] into the
/// seed for one draw.
///
/// # Arguments
///
/// * `game_seed` - seed fixed for the whole combat
/// * `nonce` - draw counter, so repeated rolls in one context differ
/// * `actor_id` - the combatant the roll is made for
/// * `context` - the rule drawing, as a [`RollContext`] discriminant
///
/// Each input is spread by its own odd constant before the XOR, then a
/// murmur3-style finalizer avalanches the result so neighbouring nonces land
/// far apart.
pub fn compute_seed(game_seed: u64, nonce: u64, actor_id: u32, context: u32) -> u64 {
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (actor_id as u64).wrapping_mul(0x517cc1b727220a95);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // avalanche
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Which rule a random draw belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum RollContext {
    DodgeBuff = 0,
    Evasion = 1,
    GritResist = 2,
    Cleanse = 3,
    Purge = 4,
    AiChoice = 5,
}

/// Stateful draw source handed to the rules.
///
/// Wraps an oracle with the combat seed and a monotonically increasing roll
/// nonce so consecutive draws are independent.
#[derive(Clone)]
pub struct CombatRng {
    oracle: Arc<dyn RngOracle>,
    seed: u64,
    nonce: u64,
}

impl CombatRng {
    /// PCG-backed source for the given combat seed.
    pub fn new(seed: u64) -> Self {
        Self::with_oracle(Arc::new(PcgRng), seed)
    }

    pub fn with_oracle(oracle: Arc<dyn RngOracle>, seed: u64) -> Self {
        Self {
            oracle,
            seed,
            nonce: 0,
        }
    }

    /// Source that always rolls the same value, see [`FixedRng`].
    pub fn fixed(value: FixedRng) -> Self {
        Self::with_oracle(Arc::new(value), 0)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> u64 {
        self.nonce
    }

    /// Uniform roll in `[0, 1)`.
    pub fn roll(&mut self, actor: CombatantId, context: RollContext) -> f64 {
        let seed = compute_seed(self.seed, self.nonce, actor.0, context as u32);
        self.nonce += 1;
        self.oracle.next_unit(seed)
    }

    /// Returns true when a roll lands below `probability`.
    pub fn chance(&mut self, actor: CombatantId, context: RollContext, probability: f32) -> bool {
        self.roll(actor, context) < probability as f64
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, actor: CombatantId, context: RollContext, len: usize) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty range");
        let picked = (self.roll(actor, context) * len as f64) as usize;
        picked.min(len.saturating_sub(1))
    }

    /// Picks up to `count` distinct indices from `0..len`, uniformly and
    /// without replacement (partial Fisher-Yates).
    pub fn sample(
        &mut self,
        actor: CombatantId,
        context: RollContext,
        len: usize,
        count: usize,
    ) -> Vec<usize> {
        let mut pool: Vec<usize> = (0..len).collect();
        let take = count.min(len);
        for i in 0..take {
            let j = i + self.index(actor, context, len - i);
            pool.swap(i, j);
        }
        pool.truncate(take);
        pool
    }
}

impl core::fmt::Debug for CombatRng {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CombatRng")
            .field("seed", &self.seed)
            .field("nonce", &self.nonce)
            .finish()
    }
}
