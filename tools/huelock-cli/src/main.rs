//! Huelock CLI — simulate the tracking loop, manage profiles, check
//! configuration.
//!
//! Usage:
//!   huelock simulate [OPTIONS]       Run the closed loop in a synthetic world
//!   huelock profiles <SUBCOMMAND>    List, save, or show named profiles
//!   huelock check [--profile NAME]   Validate and print a configuration

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "huelock",
    about = "Color-target tracking with closed-loop pointer correction",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Profiles directory override
    #[arg(long, global = true)]
    profiles_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the tracking loop against a synthetic moving target
    Simulate {
        /// Number of ticks to run
        #[arg(long, default_value = "240")]
        ticks: u32,

        /// Initial target offset from the pointer (x)
        #[arg(long, default_value = "60.0")]
        offset_x: f64,

        /// Initial target offset from the pointer (y)
        #[arg(long, default_value = "30.0")]
        offset_y: f64,

        /// Target drift per tick (x)
        #[arg(long, default_value = "1.0")]
        drift_x: f64,

        /// Target drift per tick (y)
        #[arg(long, default_value = "0.5")]
        drift_y: f64,

        /// Target disc radius in pixels
        #[arg(long, default_value = "12")]
        radius: i32,

        /// Profile to run with (defaults otherwise)
        #[arg(long)]
        profile: Option<String>,

        /// Write a JSONL session log to this path
        #[arg(long)]
        log: Option<PathBuf>,
    },

    /// Manage named configuration profiles
    Profiles {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Validate a configuration and print its effective parameters
    Check {
        /// Profile to check (defaults otherwise)
        #[arg(long)]
        profile: Option<String>,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// List saved profiles
    List,

    /// Save the default configuration under a name
    Save {
        name: String,

        /// Start from an existing JSON config file instead of defaults
        #[arg(long)]
        from: Option<PathBuf>,
    },

    /// Print a saved profile
    Show { name: String },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    huelock_common::logging::init_logging(&huelock_common::config::LoggingConfig {
        level: log_level.to_string(),
        json: false,
        file: None,
    });

    match cli.command {
        Commands::Simulate {
            ticks,
            offset_x,
            offset_y,
            drift_x,
            drift_y,
            radius,
            profile,
            log,
        } => commands::simulate::run(
            ticks,
            (offset_x, offset_y),
            (drift_x, drift_y),
            radius,
            profile,
            cli.profiles_dir,
            log,
        ),
        Commands::Profiles { action } => match action {
            ProfileAction::List => commands::profiles::list(cli.profiles_dir),
            ProfileAction::Save { name, from } => {
                commands::profiles::save(name, from, cli.profiles_dir)
            }
            ProfileAction::Show { name } => commands::profiles::show(name, cli.profiles_dir),
        },
        Commands::Check { profile } => commands::check::run(profile, cli.profiles_dir),
    }
}
