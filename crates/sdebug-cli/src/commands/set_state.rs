//! Set-state command
//!
//! Usage: sdebug set-state <PATH> <VALUE>

use clap::Args;

use sdebug_engine::commands;

use super::connect;
use crate::config::Config;

#[derive(Debug, Args)]
pub struct SetStateArgs {
    /// Dotted path of the value, e.g. `sim.pump.rate`
    pub path: String,

    /// New value; written as an int, float or string depending on its text
    pub value: String,
}

pub async fn execute(config: &Config, args: SetStateArgs) -> anyhow::Result<()> {
    let backend = connect(config)?;
    let kind = commands::set_state(&backend, &args.path, &args.value).await?;
    println!("{} = {} ({})", args.path, args.value, kind);
    Ok(())
}
