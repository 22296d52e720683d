use clap::Args;
use streakboard_core::avatar::avatar_url;
use streakboard_core::{evaluate, ReferenceInstant, StreakDisplay, SystemClock, TimeSource, User};
use url::Url;

use crate::common::{
    api_client, config_dir, load_config, print_json, require_session, runtime, CliResult,
};

#[derive(Args)]
pub struct ProfileArgs {
    /// Username to look up (your own account when omitted; requires login)
    username: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: ProfileArgs) -> CliResult {
    let config = load_config()?;
    let rt = runtime()?;

    let user = match args.username {
        Some(username) => {
            let api = api_client(&config, None)?;
            rt.block_on(api.user_profile(&username))?
        }
        None => {
            let mut session = require_session()?;
            let api = api_client(&config, Some(&session))?;
            let me = rt.block_on(api.me())?;
            session.user = me.clone();
            session.save_to(&config_dir()?)?;
            me
        }
    };

    if args.json {
        return print_json(&user);
    }
    print_user(&user, &config.api_base_url()?);
    Ok(())
}

/// "March 4, 2025" style date, or the raw text if it does not parse.
fn member_since(created_at: &str) -> String {
    ReferenceInstant::from(created_at)
        .parse()
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

pub fn print_user(user: &User, backend: &Url) {
    let reading = evaluate(&user.last_relapse_datetime, SystemClock.now());
    let avatar = avatar_url(backend, &user.username, user.avatar_url.as_deref());

    println!("{}", user.username);
    if let Some(rank) = user.rank {
        println!("  Rank:          #{rank}");
    }
    println!("  Badge:         {}", user.badge);
    println!("  Streak:        {}", StreakDisplay::from_reading(&reading));
    if !user.email.is_empty() {
        let state = if user.email_verified { "verified" } else { "unverified" };
        println!("  Email:         {} ({state})", user.email);
    }
    if let Some(code) = user.sharing_code.as_deref() {
        println!("  Sharing code:  {code}");
    }
    println!("  Avatar:        {avatar}");
    println!("  Member since:  {}", member_since(&user.created_at));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_since_formats_backend_timestamp() {
        assert_eq!(member_since("2025-03-04T10:00:00+00:00"), "March 4, 2025");
        assert_eq!(member_since("whenever"), "whenever");
    }
}
