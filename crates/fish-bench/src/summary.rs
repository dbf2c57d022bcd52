use std::collections::HashMap;
use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::{AgentKind, BenchmarkConfig};
use crate::tournament::GameRecord;

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("agent '{0}' defined in results but missing from configuration")]
    UnknownAgent(String),
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Accumulates per-agent results while a tournament runs.
pub struct SummaryCollector {
    run_id: String,
    agents: HashMap<String, AgentAccumulator>,
    agent_order: Vec<String>,
    games: usize,
    ties: usize,
    turns: usize,
    peak_worlds: usize,
    peak_worlds_total: usize,
}

impl SummaryCollector {
    pub fn new(config: &BenchmarkConfig) -> Self {
        let mut agents = HashMap::new();
        let mut order = Vec::new();
        for agent in &config.agents {
            agents.insert(agent.name.clone(), AgentAccumulator::new(agent.kind));
            order.push(agent.name.clone());
        }

        Self {
            run_id: config.run_id.clone(),
            agents,
            agent_order: order,
            games: 0,
            ties: 0,
            turns: 0,
            peak_worlds: 0,
            peak_worlds_total: 0,
        }
    }

    pub fn record_game(&mut self, record: &GameRecord) -> Result<(), SummaryError> {
        self.games += 1;
        self.turns += record.outcome.turns;
        self.peak_worlds = self.peak_worlds.max(record.outcome.peak_worlds);
        self.peak_worlds_total += record.outcome.peak_worlds;
        let tied = record.is_tie();
        if tied {
            self.ties += 1;
        }

        for (seat, name) in record.seating.iter().enumerate() {
            let acc = self
                .agents
                .get_mut(name)
                .ok_or_else(|| SummaryError::UnknownAgent(name.clone()))?;
            acc.games += 1;
            acc.books += record.outcome.books[seat];
            if seat == 0 {
                acc.games_first += 1;
            }
            if !tied && record.winner_agent() == name {
                acc.wins += 1;
                if seat == 0 {
                    acc.wins_first += 1;
                }
            }
        }
        Ok(())
    }

    pub fn finalize(self) -> TournamentSummary {
        let mut agents = Vec::with_capacity(self.agent_order.len());
        for name in &self.agent_order {
            if let Some(acc) = self.agents.get(name) {
                agents.push(AgentSummary {
                    name: name.clone(),
                    kind: acc.kind,
                    games: acc.games,
                    wins: acc.wins,
                    win_rate: ratio(acc.wins, acc.games),
                    first_win_rate: ratio(acc.wins_first, acc.games_first),
                    avg_books: ratio(acc.books, acc.games),
                });
            }
        }

        TournamentSummary {
            run_id: self.run_id,
            games: self.games,
            ties: self.ties,
            avg_turns: ratio(self.turns, self.games),
            avg_peak_worlds: ratio(self.peak_worlds_total, self.games),
            max_peak_worlds: self.peak_worlds,
            agents,
        }
    }
}

struct AgentAccumulator {
    kind: AgentKind,
    games: usize,
    games_first: usize,
    wins: usize,
    wins_first: usize,
    books: usize,
}

impl AgentAccumulator {
    fn new(kind: AgentKind) -> Self {
        Self {
            kind,
            games: 0,
            games_first: 0,
            wins: 0,
            wins_first: 0,
            books: 0,
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

#[derive(Debug, Clone)]
pub struct AgentSummary {
    pub name: String,
    pub kind: AgentKind,
    pub games: usize,
    pub wins: usize,
    pub win_rate: f64,
    /// Win rate over the games this agent opened.
    pub first_win_rate: f64,
    pub avg_books: f64,
}

#[derive(Debug, Clone)]
pub struct TournamentSummary {
    pub run_id: String,
    pub games: usize,
    pub ties: usize,
    pub avg_turns: f64,
    pub avg_peak_worlds: f64,
    pub max_peak_worlds: usize,
    pub agents: Vec<AgentSummary>,
}

impl TournamentSummary {
    pub fn to_markdown(&self) -> String {
        let mut rows = String::new();
        rows.push_str(&format!("# Tournament Summary: {}\n\n", self.run_id));
        rows.push_str(&format!(
            "Games: {} | Ties: {} | Avg turns: {:.1} | Peak belief worlds: avg {:.1}, max {}\n\n",
            self.games, self.ties, self.avg_turns, self.avg_peak_worlds, self.max_peak_worlds
        ));
        rows.push_str("| Agent | Kind | Games | Wins | Win % | Win % opening | Avg books |\n");
        rows.push_str("|-------|------|-------|------|-------|---------------|-----------|\n");

        for agent in &self.agents {
            rows.push_str(&format!(
                "| {name} | {kind} | {games} | {wins} | {win:.1}% | {first:.1}% | {books:.2} |\n",
                name = agent.name,
                kind = agent.kind.label(),
                games = agent.games,
                wins = agent.wins,
                win = agent.win_rate * 100.0,
                first = agent.first_win_rate * 100.0,
                books = agent.avg_books,
            ));
        }
        rows
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), SummaryError> {
        fs::write(path, self.to_markdown()).map_err(|source| SummaryError::Io {
            context: "writing summary markdown",
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fish_bot::GameOutcome;
    use fish_core::model::PlayerId;

    fn config() -> BenchmarkConfig {
        let yaml = r#"
run_id: "summary_unit"
games:
  count: 2
agents:
  - name: "a"
    kind: "hoarding"
  - name: "b"
    kind: "random"
outputs:
  jsonl: "out/games.jsonl"
  summary_md: "out/summary.md"
"#;
        let mut cfg: BenchmarkConfig = serde_yaml::from_str(yaml).expect("parse");
        cfg.validate().expect("validate");
        cfg
    }

    fn record(seating: [&str; 2], totals: [usize; 2], winner: PlayerId) -> GameRecord {
        GameRecord {
            game_index: 0,
            deal_seed: 0,
            seating: seating.map(str::to_string),
            outcome: GameOutcome {
                winner,
                totals,
                books: [totals[0] / 4, totals[1] / 4],
                turns: 10,
                confirms: 4,
                denies: 5,
                forced_draws: 1,
                peak_worlds: 30,
            },
            belief_events: 0,
            contractions: 0,
            elapsed_ms: 0.0,
        }
    }

    #[test]
    fn wins_are_attributed_by_seat() {
        let mut collector = SummaryCollector::new(&config());
        collector
            .record_game(&record(["a", "b"], [32, 20], PlayerId::First))
            .unwrap();
        collector
            .record_game(&record(["b", "a"], [20, 32], PlayerId::Second))
            .unwrap();
        let summary = collector.finalize();

        assert_eq!(summary.games, 2);
        assert_eq!(summary.ties, 0);
        assert_eq!(summary.max_peak_worlds, 30);
        let a = &summary.agents[0];
        assert_eq!((a.name.as_str(), a.wins, a.games), ("a", 2, 2));
        assert!((a.first_win_rate - 1.0).abs() < 1e-12);
        assert!((a.avg_books - 8.0).abs() < 1e-12);
        assert_eq!(summary.agents[1].wins, 0);

        let markdown = summary.to_markdown();
        assert!(markdown.contains("| a | hoarding | 2 | 2 | 100.0% |"));
    }

    #[test]
    fn ties_credit_nobody() {
        let mut collector = SummaryCollector::new(&config());
        collector
            .record_game(&record(["a", "b"], [24, 24], PlayerId::First))
            .unwrap();
        let summary = collector.finalize();
        assert_eq!(summary.ties, 1);
        assert!(summary.agents.iter().all(|agent| agent.wins == 0));
    }

    #[test]
    fn unknown_agents_are_rejected() {
        let mut collector = SummaryCollector::new(&config());
        let err = collector
            .record_game(&record(["a", "ghost"], [30, 22], PlayerId::First))
            .unwrap_err();
        assert!(matches!(err, SummaryError::UnknownAgent(name) if name == "ghost"));
    }
}
