pub mod commands;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use returnly_core::config::{AppConfig, ConfigOverrides, LoadOptions};

#[derive(Debug, Parser)]
#[command(
    name = "returnly",
    about = "Returns engine operator CLI",
    long_about = "Operate the returns engine: apply migrations, check return \
                  eligibility, and initiate returns against the configured database.",
    after_help = "Examples:\n  returnly migrate\n  returnly check b0eebc99-9c0b-4ef8-bb6d-6bb9bd380b14\n  returnly initiate b0eebc99-9c0b-4ef8-bb6d-6bb9bd380b14"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Override the configured database URL")]
    database_url: Option<String>,
    #[arg(long, global = true, help = "Override the configured log level")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Report whether an order is eligible for return (read-only)")]
    Check {
        #[arg(help = "Order identifier (UUID)")]
        order_id: String,
    },
    #[command(about = "Initiate a return for an eligible order (guarded status transition)")]
    Initiate {
        #[arg(help = "Order identifier (UUID)")]
        order_id: String,
    },
}

fn init_logging(config: &AppConfig) {
    use returnly_core::config::LogFormat::*;
    use tracing::Level;

    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);

    match config.logging.format {
        Compact => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).compact().init();
        }
        Pretty => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).pretty().init();
        }
        Json => {
            tracing_subscriber::fmt().with_target(false).with_max_level(log_level).json().init();
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let config = match AppConfig::load(LoadOptions {
        overrides: ConfigOverrides { database_url: cli.database_url, log_level: cli.log_level },
        ..LoadOptions::default()
    }) {
        Ok(config) => config,
        Err(error) => {
            let result = commands::CommandResult::failure(
                "config",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
            println!("{}", result.output);
            return ExitCode::from(result.exit_code);
        }
    };
    init_logging(&config);

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(&config),
        Command::Check { order_id } => commands::check::run(&config, &order_id),
        Command::Initiate { order_id } => commands::initiate::run(&config, &order_id),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}
