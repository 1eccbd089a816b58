use std::path::PathBuf;

use clap::Parser;

use crate::data::Metric;

#[derive(Parser, Debug)]
#[command(name = "health_scatter")]
#[command(author, version, about = "Interactive scatter plot of per-region health statistics")]
pub struct Cli {
    /// CSV file to load at startup
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Initial x axis metric (poverty, age, income)
    #[arg(short, long, value_parser = parse_metric)]
    pub x: Option<Metric>,

    /// Initial y axis metric (obesity, smokes, healthcare)
    #[arg(short, long, value_parser = parse_metric)]
    pub y: Option<Metric>,

    /// Increase log verbosity (-v, -vv for more)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Default log filter for the verbosity flag.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

fn parse_metric(s: &str) -> Result<Metric, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_metrics_and_verbosity() {
        let cli = Cli::parse_from(["health_scatter", "--x", "age", "-y", "smokes", "-vv"]);
        assert_eq!(cli.x, Some(Metric::Age));
        assert_eq!(cli.y, Some(Metric::Smokes));
        assert_eq!(cli.log_level(), "debug");
        assert!(cli.data.is_none());
    }

    #[test]
    fn rejects_unknown_metric() {
        assert!(Cli::try_parse_from(["health_scatter", "--x", "height"]).is_err());
    }
}
