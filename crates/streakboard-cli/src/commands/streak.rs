use std::sync::Arc;

use clap::Subcommand;
use serde::Serialize;
use streakboard_core::streak::log_reading;
use streakboard_core::{
    evaluate, Badge, Reading, ReferenceInstant, StreakDisplay, StreakTracker, SystemClock,
    TimeSource,
};

use crate::common::{load_config, load_session, print_json, runtime, CliResult};

#[derive(Subcommand)]
pub enum StreakAction {
    /// Print the current elapsed streak once
    Show {
        /// Streak start (ISO-8601). Defaults to your own when logged in
        reference: Option<String>,
        /// Treat the reference as epoch milliseconds
        #[arg(long)]
        epoch_ms: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print the elapsed streak on every tick
    Watch {
        /// Streak start (ISO-8601). Defaults to your own when logged in
        reference: Option<String>,
        /// Treat the reference as epoch milliseconds
        #[arg(long)]
        epoch_ms: bool,
        /// Stop after this many readings (runs until interrupted otherwise)
        #[arg(long)]
        ticks: Option<u64>,
    },
}

#[derive(Serialize)]
struct StreakReport<'a> {
    reference: &'a ReferenceInstant,
    reading: Reading,
    display: StreakDisplay,
    badge: Badge,
}

fn resolve_reference(raw: Option<String>, epoch_ms: bool) -> CliResult<ReferenceInstant> {
    match raw {
        Some(raw) if epoch_ms => Ok(ReferenceInstant::EpochMillis(
            raw.trim()
                .parse()
                .map_err(|_| format!("'{raw}' is not an epoch millisecond value"))?,
        )),
        Some(raw) => Ok(ReferenceInstant::Text(raw)),
        None => match load_session()? {
            Some(session) => Ok(session.user.last_relapse_datetime),
            None => Err("no reference given and not logged in".into()),
        },
    }
}

pub fn run(action: StreakAction) -> CliResult {
    match action {
        StreakAction::Show {
            reference,
            epoch_ms,
            json,
        } => {
            let reference = resolve_reference(reference, epoch_ms)?;
            let reading = evaluate(&reference, SystemClock.now());
            log_reading(&reference, &reading);
            let display = StreakDisplay::from_reading(&reading);
            let badge = Badge::for_breakdown(&reading.breakdown);
            if json {
                print_json(&StreakReport {
                    reference: &reference,
                    reading,
                    display,
                    badge,
                })?;
            } else {
                println!("{display}");
                println!("Badge: {badge}");
            }
        }
        StreakAction::Watch {
            reference,
            epoch_ms,
            ticks,
        } => {
            let reference = resolve_reference(reference, epoch_ms)?;
            let config = load_config()?;
            let rt = runtime()?;
            rt.block_on(async {
                let mut tracker =
                    StreakTracker::with_period(Arc::new(SystemClock), config.tick_period())?;
                let mut rx = tracker.subscribe();
                tracker.set_reference(Some(reference));

                if config.tracker.show_placeholder {
                    println!("{}", StreakDisplay::placeholder());
                }
                tracker.activate()?;

                let mut seen = 0u64;
                while ticks.map_or(true, |max| seen < max) {
                    if rx.changed().await.is_err() {
                        break;
                    }
                    let reading = *rx.borrow_and_update();
                    println!("{}", StreakDisplay::from_reading(&reading));
                    seen += 1;
                }
                tracker.deactivate();
                Ok::<(), Box<dyn std::error::Error>>(())
            })?;
        }
    }
    Ok(())
}
