//! sdebug CLI
//!
//! Terminal dashboard for a steppable simulation: watches one projection of
//! its state, writes values and moves simulation time forward.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use sdebug_core::logging_facility::{self, Profile};

mod commands;
mod config;
mod render;

use config::{Config, GlobalArgs};

#[derive(Debug, Parser)]
#[command(name = "sdebug")]
#[command(about = "sdebug - debugger for steppable simulations", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Poll one projection and print what changes
    Watch(commands::watch::WatchArgs),
    /// Write one state value
    SetState(commands::set_state::SetStateArgs),
    /// Run the simulation until a time such as `2.5s` or `300ms`
    RunUntil(commands::run::RunUntilArgs),
    /// Step single events until the watched projection changes
    Step(commands::run::StepArgs),
}

impl Commands {
    async fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Commands::Watch(args) => commands::watch::execute(config, args).await,
            Commands::SetState(args) => commands::set_state::execute(config, args).await,
            Commands::RunUntil(args) => commands::run::execute_run_until(config, args).await,
            Commands::Step(args) => commands::run::execute_step(config, args).await,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from(cli.global);
    logging_facility::init(Profile::from_json_flag(config.json_logs));

    match cli.command.run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
