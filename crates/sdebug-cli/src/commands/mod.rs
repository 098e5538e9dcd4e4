//! Subcommand implementations.

use std::io::Write;

use clap::Args;

use sdebug_core::filter::{Scope, ViewFilter};
use sdebug_core::model::LogLevel;
use sdebug_core::parse::{parse_level, parse_path};
use sdebug_core_types::TraceId;
use sdebug_engine::projection::{Projection, ALL_STATE};
use sdebug_engine::reconciler::Reconciler;
use sdebug_http::HttpBackend;

use crate::config::Config;
use crate::render::{Style, TerminalSink};

pub mod run;
pub mod set_state;
pub mod watch;

/// View filter flags shared by `watch` and `step`
#[derive(Debug, Clone, Args)]
pub struct ViewArgs {
    /// Only show this component and what's under it
    #[arg(long, value_parser = parse_scope)]
    pub scope: Option<Scope>,

    /// Least severe log level to show
    #[arg(long, default_value = "info", value_parser = parse_level_arg)]
    pub level: LogLevel,

    /// Include `display-*` values in the state view
    #[arg(long)]
    pub show_internal: bool,

    /// State paths to fetch, e.g. `sim.pump.*`
    #[arg(long, default_value = ALL_STATE, value_parser = parse_glob)]
    pub glob: String,

    /// Only print the last N lines of each log update
    #[arg(long, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub lines: Option<usize>,
}

impl ViewArgs {
    /// Reconciler for `projection` with these view settings
    pub fn reconciler(&self, projection: Projection) -> Reconciler {
        Reconciler::new(projection)
            .with_filter(self.filter())
            .with_state_glob(self.glob.clone())
            .with_trace_id(TraceId::new())
    }

    /// Terminal sink honouring `--lines`
    pub fn sink<W: Write>(&self, writer: W, style: Style) -> TerminalSink<W> {
        TerminalSink::new(writer, style, self.filter().scope).with_log_tail(self.lines)
    }

    pub fn filter(&self) -> ViewFilter {
        ViewFilter {
            scope: self.scope.clone().unwrap_or_default(),
            min_severity: self.level,
            show_internal: self.show_internal,
        }
    }
}

fn parse_scope(text: &str) -> Result<Scope, String> {
    parse_path(text).map(Scope::new).map_err(|e| e.to_string())
}

fn parse_glob(text: &str) -> Result<String, String> {
    if text.trim().is_empty() {
        return Err("glob must not be empty".to_string());
    }
    Ok(text.to_string())
}

fn parse_level_arg(text: &str) -> Result<LogLevel, String> {
    parse_level(text).map_err(|e| e.to_string())
}

fn connect(config: &Config) -> anyhow::Result<HttpBackend> {
    Ok(HttpBackend::new(&config.http)?)
}

fn style(config: &Config, precision: usize) -> Style {
    Style {
        colorize: config.colorize,
        precision,
    }
}
