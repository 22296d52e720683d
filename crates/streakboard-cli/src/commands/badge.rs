use clap::Args;
use streakboard_core::streak::SECS_PER_DAY;
use streakboard_core::Badge;

use crate::common::{print_json, CliResult};

#[derive(Args)]
pub struct BadgeArgs {
    /// Streak length in whole days
    #[arg(long, conflicts_with = "seconds")]
    days: Option<u64>,
    /// Streak length in seconds
    #[arg(long)]
    seconds: Option<i64>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: BadgeArgs) -> CliResult {
    let streak_seconds = match (args.days, args.seconds) {
        (Some(days), _) => i64::try_from(days.saturating_mul(SECS_PER_DAY)).unwrap_or(i64::MAX),
        (None, Some(secs)) => secs,
        (None, None) => {
            list_tiers(args.json)?;
            return Ok(());
        }
    };

    let badge = Badge::for_streak_seconds(streak_seconds);
    let until_next = Badge::seconds_until_next(streak_seconds);
    if args.json {
        print_json(&serde_json::json!({
            "badge": badge,
            "next": badge.next(),
            "seconds_until_next": until_next,
        }))?;
    } else {
        println!("{badge}");
        if let (Some(next), Some(secs)) = (badge.next(), until_next) {
            println!("Next: {next} in {:.1} days", secs as f64 / SECS_PER_DAY as f64);
        }
    }
    Ok(())
}

fn list_tiers(json: bool) -> CliResult {
    if json {
        let tiers: Vec<_> = Badge::ALL
            .iter()
            .map(|b| serde_json::json!({ "badge": b, "min_days": b.min_days() }))
            .collect();
        return print_json(&tiers);
    }
    for badge in Badge::ALL {
        println!("{:>4} days  {badge}", badge.min_days());
    }
    Ok(())
}
