use std::path::PathBuf;

use clap::Subcommand;
use streakboard_core::avatar::avatar_url;

use crate::common::{
    api_client, config_dir, load_config, require_session, runtime, CliResult,
};

#[derive(Subcommand)]
pub enum AvatarAction {
    /// Print where a user's avatar is served from
    Url {
        /// Username (yourself when omitted)
        username: Option<String>,
        /// Stored avatar path, if known
        #[arg(long)]
        stored: Option<String>,
    },
    /// Upload a JPG or PNG (max 10MB) as your profile photo
    Upload { path: PathBuf },
    /// Remove your profile photo
    Remove,
}

pub fn run(action: AvatarAction) -> CliResult {
    let config = load_config()?;
    let backend = config.api_base_url()?;

    match action {
        AvatarAction::Url { username, stored } => {
            let (username, stored) = match username {
                Some(name) => (name, stored),
                None => {
                    let session = require_session()?;
                    (session.user.username, stored.or(session.user.avatar_url))
                }
            };
            println!("{}", avatar_url(&backend, &username, stored.as_deref()));
        }
        AvatarAction::Upload { path } => {
            let mut session = require_session()?;
            let api = api_client(&config, Some(&session))?;
            let resp = runtime()?.block_on(api.upload_avatar(&path))?;
            session.user.avatar_url = Some(resp.avatar_url);
            session.save_to(&config_dir()?)?;
            println!("Profile photo updated");
        }
        AvatarAction::Remove => {
            let mut session = require_session()?;
            if session.user.avatar_url.is_none() {
                return Err("No profile photo to remove".into());
            }
            let api = api_client(&config, Some(&session))?;
            runtime()?.block_on(api.remove_avatar(session.user.sharing_code.as_deref()))?;
            session.user.avatar_url = None;
            session.save_to(&config_dir()?)?;
            println!("Profile photo removed");
        }
    }
    Ok(())
}
