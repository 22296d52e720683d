use clap::Subcommand;
use streakboard_core::{ReferenceInstant, SystemClock};

use crate::common::{api_client, config_dir, load_config, require_session, runtime, CliResult};

#[derive(Subcommand)]
pub enum RelapseAction {
    /// Set when the current streak started (ISO-8601, UTC if no offset)
    Set { at: String },
    /// Restart the streak from now
    Reset,
}

pub fn run(action: RelapseAction) -> CliResult {
    let config = load_config()?;
    let mut session = require_session()?;
    let api = api_client(&config, Some(&session))?;
    let rt = runtime()?;

    let stored = match action {
        RelapseAction::Set { at } => {
            let at = ReferenceInstant::Text(at).parse()?;
            rt.block_on(api.update_relapse(at, &SystemClock))?
        }
        RelapseAction::Reset => rt.block_on(api.reset_streak(&SystemClock))?,
    };

    session.user.last_relapse_datetime = ReferenceInstant::Text(stored.clone());
    session.save_to(&config_dir()?)?;
    println!("Streak start set to {stored}");
    Ok(())
}
