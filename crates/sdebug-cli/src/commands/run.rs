//! Time control commands
//!
//! Usage:
//!   sdebug run-until <TIME>
//!   sdebug step <PROJECTION> [--max-steps <N>]

use std::io;

use clap::Args;

use sdebug_core::diff::render_human_summary;
use sdebug_engine::commands::{self, status, DEFAULT_MAX_STEPS};
use sdebug_engine::projection::Projection;

use super::{connect, style, ViewArgs};
use crate::config::Config;

#[derive(Debug, Args)]
pub struct RunUntilArgs {
    /// Target time with an optional unit suffix (ns, us, ms, s, m, h, d)
    pub time: String,
}

#[derive(Debug, Args)]
pub struct StepArgs {
    /// Projection whose change ends the stepping: log, state, tree or map
    pub projection: Projection,

    #[command(flatten)]
    pub view: ViewArgs,

    /// Give up after this many events
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS, value_parser = clap::value_parser!(u64).range(1..))]
    pub max_steps: u64,
}

pub async fn execute_run_until(config: &Config, args: RunUntilArgs) -> anyhow::Result<()> {
    let backend = connect(config)?;
    commands::run_until(&backend, &args.time).await?;

    let (precision, sim) =
        futures::try_join!(config.resolve_precision(&backend), status(&backend))?;
    println!("{}", sim.header("Simulator", precision));
    Ok(())
}

pub async fn execute_step(config: &Config, args: StepArgs) -> anyhow::Result<()> {
    let backend = connect(config)?;
    let precision = config.resolve_precision(&backend).await?;

    let mut sink = args.view.sink(io::stdout(), style(config, precision));
    let mut reconciler = args.view.reconciler(args.projection);

    // Baseline, so only changes made by the steps count.
    let baseline = reconciler.poll(&backend).await;
    if let Some(err) = baseline.failure {
        return Err(err.into());
    }

    let report =
        commands::run_until_changed(&backend, &mut reconciler, &mut sink, args.max_steps).await?;
    if let Some(e) = sink.take_error() {
        return Err(e.into());
    }
    if let Some(err) = report.verdict.failure {
        return Err(err.into());
    }

    let steps = report.steps;
    let noun = if steps == 1 { "event" } else { "events" };
    match &report.verdict.diff {
        Some(diff) => println!("stepped {} {}: {}", steps, noun, render_human_summary(diff)),
        None if report.exited => println!("stepped {} {}: simulation exited", steps, noun),
        None => println!("stepped {} {}: no change", steps, noun),
    }

    let sim = status(&backend).await?;
    println!("{}", sim.header("Simulator", precision));
    Ok(())
}
