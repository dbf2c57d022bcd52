//! Structured JSON telemetry for tournament runs.

use std::fs::{self, File};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::{LoggingConfig, ResolvedOutputs};

pub const TELEMETRY_FILE: &str = "telemetry.jsonl";

/// Belief updates are emitted at TRACE and DEBUG by the bot's observer.
const BELIEF_TARGET: &str = "fish_bot::belief";

/// Keeps the non-blocking writer alive; logs flush when this drops.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    pub telemetry_path: PathBuf,
}

/// Filter directives for a run: the configured level everywhere, with belief
/// updates opened up to TRACE when requested.
pub fn filter_directives(logging: &LoggingConfig) -> String {
    let level = logging.level().unwrap_or(Level::INFO);
    let base = level.as_str().to_ascii_lowercase();
    if logging.belief_events && level < Level::TRACE {
        format!("{base},{BELIEF_TARGET}=trace")
    } else {
        base
    }
}

/// Installs a JSON subscriber writing to `telemetry.jsonl` beside the summary.
/// `RUST_LOG` takes precedence over the configured directives.
pub fn init_logging(
    logging: &LoggingConfig,
    outputs: &ResolvedOutputs,
    run_id: &str,
) -> Result<Option<LoggingGuard>> {
    if !logging.enable_structured {
        return Ok(None);
    }

    let telemetry_dir = outputs.telemetry_dir();
    fs::create_dir_all(&telemetry_dir)
        .with_context(|| format!("creating telemetry directory {}", telemetry_dir.display()))?;
    let telemetry_path = telemetry_dir.join(TELEMETRY_FILE);
    let file = File::create(&telemetry_path)
        .with_context(|| format!("creating telemetry file {}", telemetry_path.display()))?;

    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(file);
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directives(logging)))
        .context("building log filter")?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_current_span(false)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("WARN: a tracing subscriber is already installed; telemetry for '{run_id}' goes there");
    }
    tracing::info!(
        target: "fish_bench::run",
        run_id,
        belief_events = logging.belief_events,
        "structured logging enabled"
    );

    Ok(Some(LoggingGuard {
        _guard: guard,
        telemetry_path,
    }))
}
