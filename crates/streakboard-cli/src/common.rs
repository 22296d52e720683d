//! Shared plumbing for CLI commands.

use std::path::PathBuf;

use streakboard_core::storage::data_dir;
use streakboard_core::{ApiClient, Config, Session};

pub type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Single-threaded runtime for one command invocation.
pub fn runtime() -> CliResult<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

pub fn config_dir() -> CliResult<PathBuf> {
    Ok(data_dir()?)
}

pub fn load_config() -> CliResult<Config> {
    Ok(Config::load_from(&config_dir()?)?)
}

pub fn load_session() -> CliResult<Option<Session>> {
    Ok(Session::load_from(&config_dir()?)?)
}

/// The stored session, or an error telling the user to log in.
pub fn require_session() -> CliResult<Session> {
    load_session()?.ok_or_else(|| "not logged in; run `streakboard auth login` first".into())
}

/// Client for the configured backend, authenticated when a session exists.
pub fn api_client(config: &Config, session: Option<&Session>) -> CliResult<ApiClient> {
    let client = ApiClient::new(config.api_base_url()?, config.api_timeout())?;
    Ok(match session {
        Some(s) => client.with_token(s.access_token.clone()),
        None => client,
    })
}

pub fn print_json<T: serde::Serialize>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
