pub mod auth;
pub mod avatar;
pub mod badge;
pub mod config;
pub mod leaderboard;
pub mod profile;
pub mod relapse;
pub mod streak;
