//! HTTP surface and session plumbing.

pub mod handlers;
pub mod pages;
pub mod server;
pub mod session;

pub use server::{router, run, AppState, GameServerError, ServerConfig};
pub use session::{PlayerSession, SessionId, SessionManager};
