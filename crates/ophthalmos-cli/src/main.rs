use anyhow::Result;
use clap::{Parser, Subcommand};
use ophthalmos_core::color::Color;
use ophthalmos_core::cone::SensitivityProfile;
use ophthalmos_core::game::GameMode;
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(name = "ophthalmos")]
#[command(about = "Ophthalmos - cone contrast test, color adaptation and color perception games", long_about = None)]
struct Cli {
    /// Use this config file instead of the platform default
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep everything in memory instead of talking to the backend
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage the local account
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Take the nine-question cone contrast test
    ConeTest,
    /// Adapt colors to a sensitivity profile
    Adapt {
        /// Colors as #RRGGBB
        #[arg(required = true, value_name = "HEX")]
        colors: Vec<Color>,
        /// Profile as L,M,S percentages; defaults to the latest saved test
        #[arg(long, value_name = "L,M,S", value_parser = commands::parse_profile)]
        profile: Option<SensitivityProfile>,
    },
    /// Show the sample palette, original and adapted
    Simulate {
        /// Profile as L,M,S percentages; defaults to the latest saved test
        #[arg(long, value_name = "L,M,S", value_parser = commands::parse_profile)]
        profile: Option<SensitivityProfile>,
    },
    /// Play a 30-second color perception game
    Play {
        /// color-match or pattern
        mode: GameMode,
        /// Seed for reproducible rounds
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Show performance statistics
    Stats,
}

#[derive(Subcommand)]
enum AccountAction {
    /// Create an account and remember it on this machine
    Create { name: String },
    /// Show the remembered account
    Show,
    /// Forget the remembered account
    Forget,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let ctx = commands::AppContext::load(cli.config, cli.offline)?;

    match cli.command {
        Commands::Account { action } => match action {
            AccountAction::Create { name } => commands::account::create(&ctx, &name).await?,
            AccountAction::Show => commands::account::show(&ctx).await?,
            AccountAction::Forget => commands::account::forget(&ctx).await?,
        },
        Commands::ConeTest => commands::cone_test::run(&ctx).await?,
        Commands::Adapt { colors, profile } => commands::adapt::adapt(&ctx, &colors, profile).await?,
        Commands::Simulate { profile } => commands::adapt::simulate(&ctx, profile).await?,
        Commands::Play { mode, seed } => commands::play::run(&ctx, mode, seed).await?,
        Commands::Stats => commands::stats::show(&ctx).await?,
    }

    Ok(())
}
