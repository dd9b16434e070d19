//! Mindful Web diagnostics - replay recorded status events through a ledger.

use anyhow::{Context, Result};
use clap::Parser;
use ledger::{Ledger, LedgerConfig, Query, DEFAULT_MAX_SIZE};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

/// Replay a JSON event log through a bounded ledger and print what it keeps
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// JSON file holding an array of {kind, message, duration?} records
    events: PathBuf,

    /// Ledger capacity
    #[arg(long, default_value_t = DEFAULT_MAX_SIZE)]
    max_size: usize,

    /// Build the ledger disabled
    #[arg(long)]
    disabled: bool,

    /// Only print entries of this kind
    #[arg(long)]
    kind: Option<String>,

    /// Skip entries of this kind
    #[arg(long)]
    exclude_kind: Option<String>,

    /// Only print the most recent N matching entries
    #[arg(long)]
    limit: Option<usize>,

    /// Print per-kind counts instead of entries
    #[arg(long)]
    stats: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> LedgerConfig {
        LedgerConfig::new()
            .with_max_size(self.max_size)
            .with_enabled(!self.disabled)
    }

    fn query(&self) -> Query {
        Query {
            kind: self.kind.clone(),
            exclude_kind: self.exclude_kind.clone(),
            limit: self.limit,
        }
    }
}

/// One recorded event.
#[derive(Debug, Deserialize)]
struct EventRecord {
    kind: String,
    message: String,
    #[serde(default)]
    duration: Option<u64>,
}

fn parse_events(raw: &str) -> Result<Vec<EventRecord>> {
    serde_json::from_str(raw).context("event file must be a JSON array of {kind, message} records")
}

fn replay(ledger: &mut Ledger, events: Vec<EventRecord>) {
    for event in events {
        debug!(kind = %event.kind, "replaying event");
        ledger.add(event.kind, event.message, event.duration);
    }
}

fn render_stats(ledger: &Ledger) -> String {
    let mut lines = vec![format!("total: {}/{}", ledger.size(), ledger.max_size())];
    for (kind, count) in ledger.kinds() {
        lines.push(format!("{kind}: {count}"));
    }
    lines.join("\n")
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut ledger = Ledger::with_config(args.config())?;

    let raw = fs::read_to_string(&args.events)
        .with_context(|| format!("failed to read {}", args.events.display()))?;
    let events = parse_events(&raw)?;
    info!(count = events.len(), max_size = ledger.max_size(), "replaying events");
    replay(&mut ledger, events);

    if args.stats {
        println!("{}", render_stats(&ledger));
    } else {
        let entries = ledger.get(&args.query());
        println!("{}", serde_json::to_string_pretty(&entries)?);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EVENTS: &str = r#"[
        {"kind": "info", "message": "a"},
        {"kind": "info", "message": "b", "duration": 3000},
        {"kind": "error", "message": "c"}
    ]"#;

    #[test]
    fn test_args_default() {
        let args = Args::parse_from(["mindful-diagnostics", "events.json"]);
        assert_eq!(args.events, PathBuf::from("events.json"));
        assert_eq!(args.max_size, 50);
        assert!(!args.disabled);
        assert_eq!(args.query(), Query::all());
    }

    #[test]
    fn test_args_query() {
        let args = Args::parse_from([
            "mindful-diagnostics",
            "events.json",
            "--kind",
            "error",
            "--limit",
            "1",
            "--max-size",
            "2",
        ]);
        assert_eq!(args.query(), Query::by_kind("error").with_limit(1));
        assert_eq!(args.config().max_size, 2);
    }

    #[test]
    fn test_parse_events() {
        let events = parse_events(EVENTS).unwrap();
        assert_eq!(events.len(), 3);
        assert_eq!(events[1].duration, Some(3000));
        assert!(parse_events("{}").is_err());
    }

    #[test]
    fn test_replay_into_small_ledger() {
        let mut ledger = Ledger::with_config(LedgerConfig::new().with_max_size(2)).unwrap();
        replay(&mut ledger, parse_events(EVENTS).unwrap());

        let messages: Vec<String> = ledger
            .entries()
            .iter()
            .map(|e| e.message().to_string())
            .collect();
        assert_eq!(messages, ["b", "c"]);
        assert_eq!(render_stats(&ledger), "total: 2/2\ninfo: 1\nerror: 1");
    }

    #[test]
    fn test_args_exclude_kind() {
        let args = Args::parse_from(["mindful-diagnostics", "events.json", "--exclude-kind", "info"]);
        let mut ledger = Ledger::with_config(args.config()).unwrap();
        replay(&mut ledger, parse_events(EVENTS).unwrap());

        let entries = ledger.get(&args.query());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message(), "c");
    }

    #[test]
    fn test_large_max_size_replay() {
        let args = Args::parse_from([
            "mindful-diagnostics",
            "events.json",
            "--max-size",
            "1000000000000",
        ]);
        let mut ledger = Ledger::with_config(args.config()).unwrap();
        replay(&mut ledger, parse_events(EVENTS).unwrap());
        assert_eq!(ledger.size(), 3);
    }

    #[test]
    fn test_disabled_replay() {
        let args = Args::parse_from(["mindful-diagnostics", "events.json", "--disabled"]);
        let mut ledger = Ledger::with_config(args.config()).unwrap();
        replay(&mut ledger, parse_events(EVENTS).unwrap());
        assert_eq!(ledger.size(), 0);
    }
}
