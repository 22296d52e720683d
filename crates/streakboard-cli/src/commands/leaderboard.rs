use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use clap::Args;
use streakboard_core::{
    evaluate, Leaderboard, LeaderboardEntry, StreakDisplay, SystemClock, TimeSource,
};

use crate::common::{api_client, load_config, load_session, print_json, runtime, CliResult};

#[derive(Args)]
pub struct LeaderboardArgs {
    /// Show only this user's standing
    #[arg(long)]
    user: Option<String>,
    /// Keep re-fetching every `leaderboard.refresh_interval_secs`
    #[arg(long)]
    watch: bool,
    /// Stop watching after this many fetches
    #[arg(long, requires = "watch")]
    rounds: Option<u64>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: LeaderboardArgs) -> CliResult {
    let config = load_config()?;
    let api = api_client(&config, None)?;
    let me = load_session()?.map(|s| s.user.username);
    let rt = runtime()?;

    if !args.watch {
        let board = rt.block_on(api.leaderboard())?;
        return show(&board, &args, me.as_deref());
    }

    config.validate()?;
    let period = config.leaderboard_refresh();
    rt.block_on(async {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        let mut fetched = 0u64;
        while args.rounds.map_or(true, |max| fetched < max) {
            interval.tick().await;
            fetched += 1;
            match api.leaderboard().await {
                Ok(board) => show(&board, &args, me.as_deref())?,
                // A failed refresh keeps the last board on screen.
                Err(e) if fetched > 1 => tracing::warn!(error = %e, "leaderboard refresh failed"),
                Err(e) => return Err(e.into()),
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn show(board: &Leaderboard, args: &LeaderboardArgs, me: Option<&str>) -> CliResult {
    if let Some(username) = args.user.as_deref() {
        let entry = board
            .entry(username)
            .ok_or_else(|| format!("{username} is not on the leaderboard"))?;
        if args.json {
            return print_json(entry);
        }
        print!("{}", row(entry, SystemClock.now()));
        return Ok(());
    }
    if args.json {
        return print_json(board);
    }
    print!("{}", render(board, me, SystemClock.now()));
    Ok(())
}

fn row(entry: &LeaderboardEntry, now: DateTime<Utc>) -> String {
    let streak = StreakDisplay::from_reading(&evaluate(&entry.last_relapse_datetime, now));
    format!(
        "{:>4}  {:<20} {:<12} {}\n",
        format!("#{}", entry.rank),
        entry.username,
        entry.badge.to_string(),
        streak
    )
}

/// Podium (second, first, third) followed by everyone else.
fn render(board: &Leaderboard, me: Option<&str>, now: DateTime<Utc>) -> String {
    if board.is_empty() {
        return "No verified users yet.\n".to_string();
    }

    let mut out = String::from("PODIUM\n");
    for entry in board.podium() {
        out.push_str(&row(entry, now));
    }
    if !board.rest().is_empty() {
        out.push('\n');
        for entry in board.rest() {
            out.push_str(&row(entry, now));
        }
    }
    if let Some(rank) = me.and_then(|name| board.rank_of(name)) {
        let _ = writeln!(out, "\nYour rank: #{rank} of {}", board.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use streakboard_core::Badge;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap()
    }

    fn entry(name: &str, days: i64) -> LeaderboardEntry {
        let start = now() - chrono::Duration::days(days);
        LeaderboardEntry {
            username: name.into(),
            avatar_url: None,
            sharing_code: None,
            streak_seconds: days * 86_400,
            badge: Badge::for_streak_seconds(days * 86_400),
            created_at: "2025-01-01T00:00:00+00:00".into(),
            last_relapse_datetime: start.into(),
            rank: 0,
        }
    }

    fn board() -> Leaderboard {
        Leaderboard::from_entries(vec![
            entry("ana", 1),
            entry("bo", 40),
            entry("cy", 10),
            entry("dee", 3),
        ])
    }

    #[test]
    fn podium_is_second_first_third_then_rest() {
        let out = render(&board(), None, now());
        let names: Vec<_> = out
            .lines()
            .filter_map(|l| l.split_whitespace().nth(1))
            .collect();
        assert_eq!(names, ["cy", "bo", "dee", "ana"]);
        assert!(out.starts_with("PODIUM\n"));
        assert!(out.contains("  #2  cy "));
        assert!(out.contains("40 Days : 00 Hrs : 00 Min : 00 Sec"));
        assert!(!out.contains("Your rank"));
    }

    #[test]
    fn logged_in_user_sees_own_rank() {
        let out = render(&board(), Some("dee"), now());
        assert!(out.ends_with("Your rank: #3 of 4\n"));
        assert!(!render(&board(), Some("ghost"), now()).contains("Your rank"));
    }

    #[test]
    fn small_board_has_no_rest_section() {
        let two = Leaderboard::from_entries(vec![entry("ana", 1), entry("bo", 2)]);
        let out = render(&two, None, now());
        assert_eq!(out.lines().count(), 3);
        assert_eq!(render(&Leaderboard::default(), None, now()), "No verified users yet.\n");
    }
}
