//! Watch command
//!
//! Usage: sdebug watch <PROJECTION> [--scope <PATH>] [--level <LEVEL>] [--glob <GLOB>] [--lines <N>] [--once]

use std::io;
use std::time::Duration;

use clap::Args;

use sdebug_engine::commands::status;
use sdebug_engine::projection::Projection;

use super::{connect, style, ViewArgs};
use crate::config::Config;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Projection to watch: log, state, tree or map
    pub projection: Projection,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Delay between polls
    #[arg(long, default_value_t = 500)]
    pub interval_ms: u64,

    /// Poll once and exit
    #[arg(long)]
    pub once: bool,
}

pub async fn execute(config: &Config, args: WatchArgs) -> anyhow::Result<()> {
    let backend = connect(config)?;
    let (precision, sim) =
        futures::try_join!(config.resolve_precision(&backend), status(&backend))?;
    println!("{}", sim.header("Simulator", precision));

    let mut sink = args.view.sink(io::stdout(), style(config, precision));
    let mut reconciler = args.view.reconciler(args.projection);
    let interval = Duration::from_millis(args.interval_ms);

    loop {
        let verdict = reconciler.poll_with_sink(&backend, &mut sink).await;
        if let Some(e) = sink.take_error() {
            return Err(e.into());
        }
        if let Some(err) = verdict.failure {
            if args.once {
                return Err(err.into());
            }
            eprintln!("poll failed: {}", err);
        }
        if args.once {
            return Ok(());
        }

        tokio::select! {
            _ = tokio::time::sleep(interval) => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }
    }
}
