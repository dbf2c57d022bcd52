use std::path::PathBuf;

use clap::Parser;

use fish_bench::config::{BenchmarkConfig, ResolvedOutputs};
use fish_bench::logging::init_logging;
use fish_bench::tournament::TournamentRunner;

/// Tournament harness pitting two Go Fish strategies against each other.
#[derive(Debug, Parser)]
#[command(
    name = "fish-bench",
    author,
    version,
    about = "Deterministic two-player Go Fish tournament harness"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the number of games to play.
    #[arg(long, value_name = "GAMES")]
    games: Option<usize>,

    /// Override the RNG seed for deck shuffles.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (no tournament is run).
    #[arg(long)]
    validate_only: bool,

    /// Log every belief update regardless of config.
    #[arg(long)]
    log_belief_events: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchmarkConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(games) = cli.games {
        config.games.count = games;
    }

    if let Some(seed) = cli.seed {
        config.games.seed = Some(seed);
    }

    if cli.log_belief_events {
        config.logging.belief_events = true;
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let games = config.games.count;
    let rules = config.rules;

    println!(
        "Loaded configuration '{run_id}': {} vs {} over {games} game{} ({} ranks x {}, hands of {})",
        config.agents[0].name,
        config.agents[1].name,
        if games == 1 { "" } else { "s" },
        rules.ranks,
        rules.suit_size,
        rules.hand_size,
    );

    let _logging_guard = init_logging(&config.logging, &outputs, &run_id)?;
    let runner = TournamentRunner::new(config, outputs)?;

    if cli.validate_only {
        println!("Validation-only mode: tournament execution skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Tournament complete for '{run_id}': {} games -> {} rows at {}",
        summary.games_played,
        summary.rows_written,
        summary.jsonl_path.display()
    );
    println!("Summary table: {}", summary.summary_path.display());
    for agent in &summary.summary.agents {
        println!(
            "  {:<24} {:>5} wins ({:.1}%), avg books {:.2}",
            agent.name,
            agent.wins,
            agent.win_rate * 100.0,
            agent.avg_books
        );
    }
    println!(
        "  ties: {}, peak belief worlds: {}",
        summary.summary.ties, summary.summary.max_peak_worlds
    );
    if let Some(telemetry_path) = summary.telemetry_path.as_ref() {
        println!("Telemetry log: {}", telemetry_path.display());
    }

    Ok(())
}
