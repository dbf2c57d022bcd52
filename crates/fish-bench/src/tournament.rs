use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use fish_bot::policy::{Heuristic, HeuristicStrategy, RandomStrategy, Strategy};
use fish_bot::runner::{GameOutcome, RunnerError as GameError, play_game};
use fish_bot::telemetry::TracingObserver;
use fish_core::game::{GoFish, SetupError};
use fish_core::model::PlayerId;
use rand::{RngCore, SeedableRng, rngs::StdRng};
use serde::Serialize;
use thiserror::Error;
use tracing::{Level, event};

use crate::config::{AgentConfig, AgentKind, BenchmarkConfig, ResolvedOutputs};
use crate::logging::TELEMETRY_FILE;
use crate::summary::{SummaryCollector, SummaryError, TournamentSummary};

/// Primary entry point for orchestrating tournaments.
pub struct TournamentRunner {
    config: BenchmarkConfig,
    outputs: ResolvedOutputs,
    agents: [AgentBlueprint; 2],
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub games_played: usize,
    pub rows_written: usize,
    pub jsonl_path: PathBuf,
    pub summary_path: PathBuf,
    pub telemetry_path: Option<PathBuf>,
    pub summary: TournamentSummary,
}

/// Everything known about one finished game.
#[derive(Debug, Clone)]
pub struct GameRecord {
    pub game_index: usize,
    pub deal_seed: u64,
    /// Agent names indexed by seat; seat 0 opens.
    pub seating: [String; 2],
    pub outcome: GameOutcome,
    pub belief_events: usize,
    pub contractions: usize,
    pub elapsed_ms: f64,
}

impl GameRecord {
    pub fn is_tie(&self) -> bool {
        self.outcome.totals[0] == self.outcome.totals[1]
    }

    pub fn winner_agent(&self) -> &str {
        &self.seating[self.outcome.winner.index()]
    }
}

impl TournamentRunner {
    /// Build a runner from a validated configuration.
    pub fn new(config: BenchmarkConfig, outputs: ResolvedOutputs) -> Result<Self, TournamentError> {
        let agents = match config.agents.as_slice() {
            [first, second] => [
                AgentBlueprint::from_config(first)?,
                AgentBlueprint::from_config(second)?,
            ],
            other => return Err(TournamentError::SeatCount { found: other.len() }),
        };

        Ok(Self {
            config,
            outputs,
            agents,
        })
    }

    /// Execute the tournament, streaming JSONL rows to disk.
    pub fn run(&self) -> Result<RunSummary, TournamentError> {
        ensure_parent(self.outputs.jsonl.parent())?;
        ensure_parent(self.outputs.summary_md.parent())?;

        let mut writer = BufWriter::new(File::create(&self.outputs.jsonl)?);
        let mut rng = StdRng::seed_from_u64(self.config.games.seed.unwrap_or(0));
        let mut collector = SummaryCollector::new(&self.config);
        let mut rows_written = 0usize;

        for game_index in 0..self.config.games.count {
            let deal_seed = rng.next_u64();
            let record = self.play_one(game_index, deal_seed)?;
            collector.record_game(&record)?;
            write_game_row(&mut writer, &self.config.run_id, &record)?;
            rows_written += 1;
        }

        writer.flush()?;

        let summary = collector.finalize();
        summary.write_markdown(&self.outputs.summary_md)?;

        let telemetry_path = self
            .config
            .logging
            .enable_structured
            .then(|| self.outputs.telemetry_dir().join(TELEMETRY_FILE));

        Ok(RunSummary {
            games_played: self.config.games.count,
            rows_written,
            jsonl_path: self.outputs.jsonl.clone(),
            summary_path: self.outputs.summary_md.clone(),
            telemetry_path,
            summary,
        })
    }

    fn play_one(&self, game_index: usize, deal_seed: u64) -> Result<GameRecord, TournamentError> {
        let order = self.seat_order(game_index);
        let mut strategies = order.map(|agent| self.agents[agent].spawn_strategy(deal_seed));
        let seating = order.map(|agent| self.agents[agent].name.clone());

        let observer = if self.config.logging.belief_events {
            TracingObserver::new()
        } else {
            TracingObserver::silent()
        };

        let start = Instant::now();
        let mut game = GoFish::new_game_with_observer(self.config.rules, deal_seed, observer)?;
        let outcome = play_game(&mut game, &mut strategies, self.config.games.turn_limit)?;
        let elapsed_ms = start.elapsed().as_secs_f64() * 1_000.0;

        let observer = game.engine().observer();
        let record = GameRecord {
            game_index,
            deal_seed,
            seating,
            outcome,
            belief_events: observer.events(),
            contractions: observer.contractions(),
            elapsed_ms,
        };

        event!(
            target: "fish_bench::game",
            Level::INFO,
            run_id = %self.config.run_id,
            game_index = game_index as u64,
            deal_seed,
            first = %record.seating[0],
            second = %record.seating[1],
            winner = record.winner_agent(),
            turns = record.outcome.turns as u64,
            peak_worlds = record.outcome.peak_worlds as u64,
            elapsed_ms,
        );
        Ok(record)
    }

    /// Agent index for each seat.
    fn seat_order(&self, game_index: usize) -> [usize; 2] {
        if self.config.games.alternate_start && game_index % 2 == 1 {
            [1, 0]
        } else {
            [0, 1]
        }
    }
}

fn ensure_parent(path: Option<&Path>) -> Result<(), TournamentError> {
    if let Some(dir) = path.filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

fn write_game_row(
    writer: &mut BufWriter<File>,
    run_id: &str,
    record: &GameRecord,
) -> Result<(), TournamentError> {
    let outcome = &record.outcome;
    let row = GameLogRow {
        run_id,
        game_id: format!("G{:05}", record.game_index),
        game_index: record.game_index,
        deal_seed: record.deal_seed,
        first: &record.seating[0],
        second: &record.seating[1],
        winner: (!record.is_tie()).then(|| record.winner_agent()),
        winner_seat: outcome.winner,
        totals: outcome.totals,
        books: outcome.books,
        turns: outcome.turns,
        confirms: outcome.confirms,
        denies: outcome.denies,
        forced_draws: outcome.forced_draws,
        peak_worlds: outcome.peak_worlds,
        belief_events: record.belief_events,
        contractions: record.contractions,
        elapsed_ms: record.elapsed_ms,
    };

    serde_json::to_writer(&mut *writer, &row)?;
    writer.write_all(b"\n")?;
    Ok(())
}

#[derive(Serialize)]
struct GameLogRow<'a> {
    run_id: &'a str,
    game_id: String,
    game_index: usize,
    deal_seed: u64,
    first: &'a str,
    second: &'a str,
    /// `None` on a tie; `winner_seat` still follows the ledger's tie rule.
    winner: Option<&'a str>,
    winner_seat: PlayerId,
    totals: [usize; 2],
    books: [usize; 2],
    turns: usize,
    confirms: usize,
    denies: usize,
    forced_draws: usize,
    peak_worlds: usize,
    belief_events: usize,
    contractions: usize,
    elapsed_ms: f64,
}

#[derive(Debug, Error)]
pub enum TournamentError {
    #[error("{0}")]
    Agent(#[from] AgentError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize log row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("game setup failed: {0}")]
    Setup(#[from] SetupError),
    #[error("game execution failed: {0}")]
    Game(#[from] GameError),
    #[error("configuration requires exactly 2 agents but found {found}")]
    SeatCount { found: usize },
    #[error("summary error: {0}")]
    Summary(#[from] SummaryError),
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid parameter for agent '{name}': {message}")]
    InvalidParam { name: String, message: String },
}

struct AgentBlueprint {
    name: String,
    implementation: AgentImplementation,
}

enum AgentImplementation {
    /// `None` derives the seed from each game's deal seed.
    Random { seed: Option<u64> },
    Heuristic(Heuristic),
}

impl AgentBlueprint {
    fn from_config(config: &AgentConfig) -> Result<Self, AgentError> {
        let params = AgentParams::new(&config.name, &config.params)?;
        let implementation = match config.kind {
            AgentKind::Random => AgentImplementation::Random {
                seed: params.seed()?,
            },
            AgentKind::Hoarding => AgentImplementation::Heuristic(Heuristic::Hoarding),
            AgentKind::MinimizeUncertainty => {
                AgentImplementation::Heuristic(Heuristic::MinimizeUncertainty)
            }
            AgentKind::FinishFast => AgentImplementation::Heuristic(Heuristic::FinishFast),
            AgentKind::ExploitExplore => {
                let boundary = params.boundary()?.unwrap_or(Heuristic::DEFAULT_BOUNDARY);
                AgentImplementation::Heuristic(Heuristic::ExploitExplore { boundary })
            }
        };

        Ok(Self {
            name: config.name.clone(),
            implementation,
        })
    }

    fn spawn_strategy(&self, deal_seed: u64) -> Box<dyn Strategy> {
        match self.implementation {
            AgentImplementation::Random { seed } => {
                let seed = seed.map_or(deal_seed, |seed| seed ^ deal_seed);
                Box::new(RandomStrategy::with_seed(seed))
            }
            AgentImplementation::Heuristic(heuristic) => {
                Box::new(HeuristicStrategy::new(heuristic))
            }
        }
    }
}

struct AgentParams<'a> {
    name: &'a str,
    mapping: Option<&'a serde_yaml::Mapping>,
}

impl<'a> AgentParams<'a> {
    fn new(name: &'a str, params: &'a serde_yaml::Value) -> Result<Self, AgentError> {
        if params.is_null() {
            return Ok(Self {
                name,
                mapping: None,
            });
        }

        let mapping = params.as_mapping().ok_or_else(|| AgentError::InvalidParam {
            name: name.to_string(),
            message: "expected mapping for agent params".to_string(),
        })?;
        Ok(Self {
            name,
            mapping: Some(mapping),
        })
    }

    fn get(&self, key: &str) -> Option<&'a serde_yaml::Value> {
        self.mapping?
            .iter()
            .find_map(|(k, value)| (k.as_str() == Some(key)).then_some(value))
    }

    fn invalid(&self, message: impl Into<String>) -> AgentError {
        AgentError::InvalidParam {
            name: self.name.to_string(),
            message: message.into(),
        }
    }

    fn seed(&self) -> Result<Option<u64>, AgentError> {
        self.get("seed")
            .map(|value| {
                value
                    .as_u64()
                    .ok_or_else(|| self.invalid("seed must be a non-negative integer"))
            })
            .transpose()
    }

    fn boundary(&self) -> Result<Option<f64>, AgentError> {
        let Some(value) = self.get("boundary") else {
            return Ok(None);
        };
        let boundary = value
            .as_f64()
            .ok_or_else(|| self.invalid("boundary must be a number"))?;
        if !(0.0..=1.0).contains(&boundary) {
            return Err(self.invalid(format!("boundary {boundary} is outside [0, 1]")));
        }
        Ok(Some(boundary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent(kind: AgentKind, params: &str) -> AgentConfig {
        AgentConfig {
            name: "agent".to_string(),
            kind,
            params: serde_yaml::from_str(params).expect("params yaml"),
        }
    }

    #[test]
    fn exploit_explore_reads_boundary() {
        let blueprint =
            AgentBlueprint::from_config(&agent(AgentKind::ExploitExplore, "boundary: 0.35"))
                .unwrap();
        assert!(matches!(
            blueprint.implementation,
            AgentImplementation::Heuristic(Heuristic::ExploitExplore { boundary })
                if (boundary - 0.35).abs() < 1e-12
        ));
    }

    #[test]
    fn exploit_explore_defaults_boundary() {
        let blueprint =
            AgentBlueprint::from_config(&agent(AgentKind::ExploitExplore, "{}")).unwrap();
        assert!(matches!(
            blueprint.implementation,
            AgentImplementation::Heuristic(Heuristic::ExploitExplore { boundary })
                if boundary == Heuristic::DEFAULT_BOUNDARY
        ));
    }

    #[test]
    fn rejects_out_of_range_boundary() {
        let err = AgentBlueprint::from_config(&agent(AgentKind::ExploitExplore, "boundary: 1.5"))
            .err()
            .expect("boundary rejected");
        assert!(err.to_string().contains("outside [0, 1]"));
    }

    #[test]
    fn rejects_non_mapping_params() {
        let err = AgentBlueprint::from_config(&agent(AgentKind::Random, "[1, 2]"))
            .err()
            .expect("params rejected");
        assert!(err.to_string().contains("expected mapping"));
    }

    #[test]
    fn random_seed_mixes_with_deal_seed() {
        let blueprint = AgentBlueprint::from_config(&agent(AgentKind::Random, "seed: 7")).unwrap();
        assert!(matches!(
            blueprint.implementation,
            AgentImplementation::Random { seed: Some(7) }
        ));
        assert_eq!(blueprint.spawn_strategy(1).name(), "random");
    }
}
