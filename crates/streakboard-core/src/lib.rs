//! # Streakboard Core Library
//!
//! Client-side logic for the Streakboard accountability leaderboard. The
//! CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Streak**: pure elapsed-time breakdown since a reference instant, its
//!   display formatting, and a tick-driven tracker that republishes it
//! - **Clock**: injectable time source so every computation is testable
//! - **Badges / Leaderboard**: tiering and ranking by streak length
//! - **API**: async REST client for auth, profiles and the leaderboard
//! - **Storage**: TOML configuration and the persisted login session
//!
//! ## Key Components
//!
//! - [`StreakTracker`]: periodic elapsed-time publisher
//! - [`evaluate`]: the pure per-tick computation
//! - [`ApiClient`]: backend client
//! - [`Config`]: application configuration management

pub mod api;
pub mod avatar;
pub mod badge;
pub mod clock;
pub mod error;
pub mod leaderboard;
pub mod storage;
pub mod streak;

pub use api::{ApiClient, SignupForm, User};
pub use badge::Badge;
pub use clock::{ManualClock, SystemClock, TimeSource};
pub use error::{ApiError, ConfigError, CoreError, TrackerError, ValidationError};
pub use leaderboard::{Leaderboard, LeaderboardEntry};
pub use storage::{Config, Session};
pub use streak::{
    evaluate, ElapsedBreakdown, Reading, ReadingStatus, ReferenceInstant, StreakDisplay,
    StreakTracker,
};
