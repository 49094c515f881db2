// Public API - what other modules can use
pub use models::{IdentityView, LeaderboardEntry, PlayerStats};
pub use ranking::assign_ranks;
pub use service::{StatsService, DEFAULT_SCAN_WINDOW};

// Internal modules
pub mod handlers;
mod models;
mod ranking;
mod service;
