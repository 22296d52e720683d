use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod common;

#[derive(Parser)]
#[command(name = "streakboard", version, about = "Streakboard CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Elapsed streak time
    Streak {
        #[command(subcommand)]
        action: commands::streak::StreakAction,
    },
    /// Badge tiers
    Badge(commands::badge::BadgeArgs),
    /// Show the leaderboard
    Leaderboard(commands::leaderboard::LeaderboardArgs),
    /// Show a user's public profile
    Profile(commands::profile::ProfileArgs),
    /// Account and login management
    Auth {
        #[command(subcommand)]
        action: commands::auth::AuthAction,
    },
    /// Move or reset your streak start
    Relapse {
        #[command(subcommand)]
        action: commands::relapse::RelapseAction,
    },
    /// Profile photo management
    Avatar {
        #[command(subcommand)]
        action: commands::avatar::AvatarAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("STREAKBOARD_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Streak { action } => commands::streak::run(action),
        Commands::Badge(args) => commands::badge::run(args),
        Commands::Leaderboard(args) => commands::leaderboard::run(args),
        Commands::Profile(args) => commands::profile::run(args),
        Commands::Auth { action } => commands::auth::run(action),
        Commands::Relapse { action } => commands::relapse::run(action),
        Commands::Avatar { action } => commands::avatar::run(action),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
