//! Game rules.
//!
//! One round, one secret, one pure transition per submitted guess.

pub mod guess;
pub mod state;

pub use guess::{evaluate, validate_guess, GuessError, GuessOutcome, WinReport, WinTier};
pub use state::RoundState;
