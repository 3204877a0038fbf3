//! Round State
//!
//! Per-session mutable state for one guessing round.

use crate::core::rng::SecretRng;
use crate::{SECRET_MAX, SECRET_MIN};

/// State of a single guessing round.
///
/// Invariant: `lower <= secret <= upper` holds from round start until the
/// winning guess, because bounds only ever narrow toward the secret.
#[derive(Clone, Debug)]
pub struct RoundState {
    /// The number the player is trying to find.
    pub secret: u32,

    /// Inclusive lower bound known to contain the secret.
    pub lower: u32,

    /// Inclusive upper bound known to contain the secret.
    pub upper: u32,

    /// Guesses made so far this round.
    pub guesses: u32,

    /// Generator for this session's secrets.
    pub rng: SecretRng,
}

impl RoundState {
    /// Start a round with a generator seeded from `seed`.
    pub fn new(seed: u64) -> Self {
        Self::from_rng(SecretRng::new(seed))
    }

    /// Start a round drawing the secret from an existing generator.
    pub fn from_rng(mut rng: SecretRng) -> Self {
        let secret = rng.pick_secret();
        Self {
            secret,
            lower: SECRET_MIN,
            upper: SECRET_MAX,
            guesses: 0,
            rng,
        }
    }

    /// Reset for a new round: fresh secret, full bounds, zero guesses.
    pub fn reset(&mut self) {
        self.secret = self.rng.pick_secret();
        self.lower = SECRET_MIN;
        self.upper = SECRET_MAX;
        self.guesses = 0;
    }

    /// Check whether a guess lies within the current bounds.
    #[inline]
    pub fn contains(&self, guess: u32) -> bool {
        guess >= self.lower && guess <= self.upper
    }

    /// Check the round invariant.
    ///
    /// A session that fails this (only possible through a bug or stale
    /// state) is given a fresh round instead of an error page.
    pub fn is_consistent(&self) -> bool {
        self.lower <= self.secret && self.secret <= self.upper
    }
}
