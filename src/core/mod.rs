//! Deterministic primitives.
//!
//! Everything in this module is reproducible from a seed, so game behavior
//! can be replayed exactly in tests.

pub mod rng;

pub use rng::{derive_session_seed, SecretRng};
