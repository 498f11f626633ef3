use clap::Parser;
use std::path::PathBuf;

use crate::labels::StatusLabels;

/// Log files read when no PATH is given.
pub const DEFAULT_INPUTS: [&str; 3] = [
    "logs/prod-api-prod-out.log",
    "logs/api-dev-out.log",
    "logs/api-prod-out.log",
];

/// Immutable configuration used by the application runtime
#[derive(Debug, Clone)]
pub struct Config {
    pub inputs: Vec<PathBuf>,
    pub labels: StatusLabels,
}

/// User-facing CLI arguments (kept private to the CLI layer)
#[derive(Parser, Debug)]
#[command(name = "statuslog", version, about = "Count HTTP status codes in access logs")]
struct Args {
    /// Access log files to summarize
    #[arg(value_name = "PATH", default_values = DEFAULT_INPUTS)]
    inputs: Vec<PathBuf>,

    /// Report a status code under a label, e.g. --label 301=Moved (repeatable; overrides defaults)
    #[arg(long = "label", value_name = "CODE=TEXT", value_parser = parse_label)]
    labels: Vec<(u16, String)>,

    /// Start from an empty label table; only --label codes are reported
    #[arg(long = "no-default-labels")]
    no_default_labels: bool,
}

fn parse_label(raw: &str) -> Result<(u16, String), String> {
    let (code, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=TEXT, got `{raw}`"))?;
    let code = code
        .trim()
        .parse::<u16>()
        .map_err(|e| format!("invalid status code `{code}`: {e}"))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(format!("empty label for status code {code}"));
    }
    Ok((code, text.to_string()))
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        let mut labels = if args.no_default_labels {
            StatusLabels::empty()
        } else {
            StatusLabels::default()
        };
        for (code, text) in args.labels {
            labels.insert(code, text);
        }
        Config {
            inputs: args.inputs,
            labels,
        }
    }
}

/// Parse CLI options into an application Config
pub fn parse() -> Config {
    Args::parse().into()
}
