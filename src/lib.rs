//! # Hilo Game Server
//!
//! Single-session number-guessing web game with a persisted highscore list.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       HILO SERVER                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  └── rng.rs      - Xorshift128+ secret-number generator      │
//! │                                                              │
//! │  game/           - Game rules (pure)                         │
//! │  ├── state.rs    - Per-round state (secret, bounds, count)   │
//! │  └── guess.rs    - Validation and the guess transition       │
//! │                                                              │
//! │  highscore/      - Persisted completed-round records         │
//! │  ├── record.rs   - Pipe-delimited record codec               │
//! │  └── store.rs    - Flat file store, writers serialized       │
//! │                                                              │
//! │  network/        - HTTP surface (non-deterministic)          │
//! │  ├── server.rs   - Router, config, serve loop                │
//! │  ├── session.rs  - Cookie-keyed player sessions              │
//! │  ├── handlers.rs - GET/POST game endpoint, health, JSON view │
//! │  └── pages.rs    - HTML page assembly                        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Round Contract
//!
//! The `game/` module is pure and synchronous: one validated guess makes
//! exactly one transition. Bounds only narrow toward the secret, so
//! `lower <= secret <= upper` holds for the whole round. Secrets come from
//! a seeded generator, making every round replayable in tests.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod highscore;
pub mod network;

// Re-export commonly used types
pub use crate::core::rng::SecretRng;
pub use crate::game::guess::{evaluate, validate_guess, GuessError, GuessOutcome, WinTier};
pub use crate::game::state::RoundState;
pub use crate::highscore::{HighscoreList, HighscoreRecord, HighscoreStore};
pub use crate::network::{run, ServerConfig};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Smallest possible secret
pub const SECRET_MIN: u32 = 1;

/// Largest possible secret
pub const SECRET_MAX: u32 = 100;
