//! Global command line options.

use clap::builder::RangedU64ValueParser;
use clap::Args;

use sdebug_core::errors::ExError;
use sdebug_engine::capability::Control;
use sdebug_http::HttpConfig;

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Address the simulation is bound to
    #[arg(long, global = true, default_value = "127.0.0.1")]
    pub server: String,

    /// Port the simulation is bound to
    #[arg(long, global = true, default_value_t = 9000, value_parser = clap::value_parser!(u16).range(1..))]
    pub port: u16,

    /// Decimal places for times and floats [simulation's precision]
    #[arg(long, global = true, value_parser = RangedU64ValueParser::<usize>::new().range(0..=32))]
    pub precision: Option<usize>,

    /// Don't color code output
    #[arg(long, global = true)]
    pub no_colors: bool,

    /// Request timeout in milliseconds
    #[arg(long, global = true, default_value_t = 5000)]
    pub timeout_ms: u64,

    /// Emit JSON logs on stderr
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Settings shared by every command
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub http: HttpConfig,
    /// Fixed precision; `None` asks the simulation
    pub precision: Option<usize>,
    pub colorize: bool,
    pub json_logs: bool,
}

impl Config {
    /// Precision from the command line, else the simulation's own
    ///
    /// # Errors
    ///
    /// Transport errors when the simulation has to be asked.
    pub async fn resolve_precision<C>(&self, control: &C) -> Result<usize, ExError>
    where
        C: Control + ?Sized,
    {
        match self.precision {
            Some(precision) => Ok(precision),
            None => control.precision().await,
        }
    }
}

impl From<GlobalArgs> for Config {
    fn from(args: GlobalArgs) -> Self {
        Self {
            http: HttpConfig {
                server: args.server,
                port: args.port,
                timeout_ms: args.timeout_ms,
            },
            precision: args.precision,
            colorize: !args.no_colors,
            json_logs: args.json_logs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct TestCli {
        #[command(flatten)]
        global: GlobalArgs,
    }

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let mut argv = vec!["sdebug"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).map(|cli| Config::from(cli.global))
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.http, HttpConfig::default());
        assert_eq!(config.precision, None);
        assert!(config.colorize);
        assert!(!config.json_logs);
    }

    #[test]
    fn test_overrides() {
        let config = parse(&[
            "--server",
            "10.0.0.2",
            "--port",
            "9100",
            "--precision",
            "3",
            "--no-colors",
            "--timeout-ms",
            "250",
        ])
        .unwrap();
        assert_eq!(config.http.base_url(), "http://10.0.0.2:9100");
        assert_eq!(config.http.timeout_ms, 250);
        assert_eq!(config.precision, Some(3));
        assert!(!config.colorize);
    }

    #[test]
    fn test_port_range() {
        assert!(parse(&["--port", "0"]).is_err());
        assert!(parse(&["--port", "65536"]).is_err());
        assert!(parse(&["--port", "65535"]).is_ok());
    }

    #[test]
    fn test_precision_range() {
        assert!(parse(&["--precision", "32"]).is_ok());
        assert!(parse(&["--precision", "33"]).is_err());
    }
}
