//! Hosting of draft matching state, one session per mounted matching view.

pub mod manager;

pub use manager::{MatchingSession, MatchingSessionManager};
