//! Guess Evaluator
//!
//! The single-step state transition at the heart of the game: validate a
//! submitted guess against the round's bounds, then narrow the bounds or
//! finish the round. Pure and synchronous; one transition per request.

use std::cmp::Ordering;

use crate::game::state::RoundState;

/// How quickly the player found the secret, by attempt count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WinTier {
    /// Under 5 attempts.
    Fast,
    /// Under 10 attempts.
    Okay,
    /// 10 attempts or more.
    Slow,
}

impl WinTier {
    /// Classify an attempt count.
    pub fn for_attempts(attempts: u32) -> Self {
        if attempts < 5 {
            WinTier::Fast
        } else if attempts < 10 {
            WinTier::Okay
        } else {
            WinTier::Slow
        }
    }
}

/// Summary of a won round, used for the message and the highscore record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WinReport {
    /// Total guesses taken, including the winning one.
    pub attempts: u32,
    /// The secret that was found.
    pub secret: u32,
    /// Message tier.
    pub tier: WinTier,
}

/// Result of evaluating one in-bounds guess.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Guess was below the secret; lower bound raised.
    TooLow {
        /// New inclusive lower bound.
        lower: u32,
        /// Unchanged inclusive upper bound.
        upper: u32,
    },
    /// Guess was above the secret; upper bound lowered.
    TooHigh {
        /// Unchanged inclusive lower bound.
        lower: u32,
        /// New inclusive upper bound.
        upper: u32,
    },
    /// Guess hit the secret.
    Won(WinReport),
}

impl GuessOutcome {
    /// Player-facing message for this outcome.
    pub fn message(&self) -> String {
        match self {
            GuessOutcome::TooLow { lower, upper } => {
                format!("Too low! The number is between {lower} and {upper}.")
            }
            GuessOutcome::TooHigh { lower, upper } => {
                format!("Too high! The number is between {lower} and {upper}.")
            }
            GuessOutcome::Won(report) => {
                let WinReport { attempts, secret, tier } = report;
                let tries = if *attempts == 1 { "try" } else { "tries" };
                match tier {
                    WinTier::Fast => {
                        format!("Excellent! You nailed {secret} in just {attempts} {tries}.")
                    }
                    WinTier::Okay => {
                        format!("Well done! You found {secret} in {attempts} {tries}.")
                    }
                    WinTier::Slow => {
                        format!("Got there in the end! {secret} took you {attempts} {tries}.")
                    }
                }
            }
        }
    }
}

/// Rejected guess submissions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GuessError {
    /// Input did not parse as an integer.
    #[error("Please enter a whole number between {lower} and {upper}.")]
    NotANumber {
        /// Current inclusive lower bound.
        lower: u32,
        /// Current inclusive upper bound.
        upper: u32,
    },

    /// Input parsed but lies outside the current bounds.
    #[error("Out of range! Your guess must be between {lower} and {upper}.")]
    OutOfBounds {
        /// Current inclusive lower bound.
        lower: u32,
        /// Current inclusive upper bound.
        upper: u32,
    },
}

/// Parse and validate a raw form value against the round's current bounds.
///
/// Rejections leave the round untouched; the error message names the
/// bounds the player has to stay inside.
pub fn validate_guess(raw: &str, round: &RoundState) -> Result<u32, GuessError> {
    let value: i64 = raw.trim().parse().map_err(|_| GuessError::NotANumber {
        lower: round.lower,
        upper: round.upper,
    })?;

    if value < round.lower as i64 || value > round.upper as i64 {
        return Err(GuessError::OutOfBounds {
            lower: round.lower,
            upper: round.upper,
        });
    }

    Ok(value as u32)
}

/// Apply one validated guess to the round.
///
/// Increments the guess count, then narrows a bound or reports the win.
/// On a win the caller records the highscore and resets the round; the
/// round state itself keeps the final counts until then.
pub fn evaluate(round: &mut RoundState, guess: u32) -> GuessOutcome {
    debug_assert!(round.contains(guess), "guess must be validated first");

    round.guesses += 1;

    match guess.cmp(&round.secret) {
        Ordering::Less => {
            round.lower = guess + 1;
            GuessOutcome::TooLow {
                lower: round.lower,
                upper: round.upper,
            }
        }
        Ordering::Greater => {
            round.upper = guess - 1;
            GuessOutcome::TooHigh {
                lower: round.lower,
                upper: round.upper,
            }
        }
        Ordering::Equal => GuessOutcome::Won(WinReport {
            attempts: round.guesses,
            secret: round.secret,
            tier: WinTier::for_attempts(round.guesses),
        }),
    }
}

// =============================================================================
// TESTS
// =============================================================================
