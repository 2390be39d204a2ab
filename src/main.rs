use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use beatwatch::data::duration::{format_duration, parse_duration};
use beatwatch::export::{export_to_file, Report};
use beatwatch::{EventSource, FileSource, Fixture, FixtureSource, HeartbeatMonitor, MonitorConfig, Settings};

#[derive(Parser, Debug)]
#[command(name = "beatwatch", version)]
#[command(about = "Detect services that missed too many consecutive heartbeats")]
struct Args {
    /// Path to a JSON array of heartbeat records ("-" reads stdin)
    #[arg(
        required_unless_present_any = ["fixture", "list_fixtures"],
        conflicts_with = "fixture"
    )]
    file: Option<PathBuf>,

    /// Expected interval between heartbeats, in seconds
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    expected_interval_seconds: Option<u64>,

    /// Consecutive missed heartbeats that trigger an alert
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    allowed_misses: Option<u32>,

    /// Expected interval as a duration, e.g. "90s" or "1.5m" (works with --fixture)
    #[arg(short, long, value_parser = parse_interval, conflicts_with = "expected_interval_seconds")]
    interval: Option<Duration>,

    /// Allowed consecutive misses (works with --fixture)
    #[arg(
        short,
        long,
        value_parser = clap::value_parser!(u32).range(1..),
        conflicts_with = "allowed_misses"
    )]
    misses: Option<u32>,

    /// Settings file (TOML, YAML or JSON); BEATWATCH_* variables override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run a built-in fixture instead of reading a file
    #[arg(long)]
    fixture: Option<String>,

    /// List built-in fixtures and exit
    #[arg(long)]
    list_fixtures: bool,

    /// Print the full result with per-service status instead of only alerts
    #[arg(short, long)]
    summary: bool,

    /// Also write the full report to a JSON file
    #[arg(short, long)]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Logs go to stderr so stdout stays valid JSON. Override with RUST_LOG=beatwatch=debug.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.list_fixtures {
        for fixture in Fixture::all() {
            println!("{:<16} {}", fixture.name, fixture.description);
        }
        return Ok(());
    }

    let config = resolve_config(&args)?;
    info!(
        expected_interval = %format_duration(config.expected_interval),
        allowed_misses = config.allowed_misses,
        "monitor configured"
    );

    let mut source: Box<dyn EventSource> = match (&args.fixture, &args.file) {
        (Some(name), _) => Box::new(FixtureSource::new(name)?),
        (None, Some(path)) => Box::new(FileSource::new(path)),
        (None, None) => bail!("no input given: pass a file or --fixture"),
    };

    let records = source
        .load()
        .with_context(|| format!("failed to load {}", source.description()))?;
    info!(source = source.description(), records = records.len(), "loaded batch");

    let result = HeartbeatMonitor::new(config)?.process(&records);

    if let Some(path) = &args.export {
        export_to_file(&result, path)?;
        info!(path = %path.display(), "exported report");
    }

    let output = if args.summary {
        Report::new(&result).to_json()?
    } else {
        serde_json::to_string_pretty(&result.alerts)?
    };
    println!("{}", output);

    Ok(())
}

fn parse_interval(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

/// Settings file and environment first, command-line values on top.
fn resolve_config(args: &Args) -> Result<MonitorConfig> {
    let settings = Settings::load(args.config.as_deref())?;

    let expected_interval = match args
        .interval
        .or(args.expected_interval_seconds.map(Duration::from_secs))
    {
        Some(interval) => interval,
        None => parse_duration(&settings.expected_interval)?,
    };
    let allowed_misses = args
        .misses
        .or(args.allowed_misses)
        .unwrap_or(settings.allowed_misses);

    Ok(MonitorConfig::new(expected_interval, allowed_misses)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("beatwatch").chain(args.iter().copied()))
    }

    #[test]
    fn fixture_takes_interval_and_misses_flags() {
        let args = parse(&["--fixture", "near-miss", "--interval", "90s", "--misses", "5"]).unwrap();
        assert_eq!(args.fixture.as_deref(), Some("near-miss"));

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.expected_interval, Duration::from_secs(90));
        assert_eq!(config.allowed_misses, 5);
    }

    #[test]
    fn positional_values_follow_the_file() {
        let args = parse(&["heartbeats.json", "30", "2"]).unwrap();
        assert_eq!(args.file, Some(PathBuf::from("heartbeats.json")));

        let config = resolve_config(&args).unwrap();
        assert_eq!(config.expected_interval, Duration::from_secs(30));
        assert_eq!(config.allowed_misses, 2);
    }

    #[test]
    fn short_flags_work_with_a_file() {
        let args = parse(&["-", "-i", "500ms", "-m", "4"]).unwrap();
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.expected_interval, Duration::from_millis(500));
        assert_eq!(config.allowed_misses, 4);
    }

    #[test]
    fn flag_and_positional_for_the_same_value_conflict() {
        assert!(parse(&["heartbeats.json", "60", "--interval", "90s"]).is_err());
        assert!(parse(&["heartbeats.json", "60", "3", "--misses", "4"]).is_err());
    }

    #[test]
    fn invalid_flag_values_are_rejected() {
        assert!(parse(&["--fixture", "near-miss", "--misses", "0"]).is_err());
        assert!(parse(&["--fixture", "near-miss", "--interval", "soon"]).is_err());
    }

    #[test]
    fn input_is_required() {
        assert!(parse(&[]).is_err());
        assert!(parse(&["--list-fixtures"]).is_ok());
    }
}
