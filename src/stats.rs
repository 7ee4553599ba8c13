//! Statistics tracking for the simulation.

use crate::evolution::{GenerationPair, Transition};
use crate::grid::Field;
use crate::strategy::Strategy;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Statistics snapshot for one generation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    /// Generation this snapshot describes (0 = initial field)
    pub generation: u64,
    /// Field height
    pub rows: usize,
    /// Field width
    pub cols: usize,
    /// Cells playing Cooperate
    pub cooperators: usize,
    /// Cells playing Defect
    pub defectors: usize,
    /// Fraction of cooperators (0.0 - 1.0)
    pub cooperation_rate: f64,
    /// Mean payoff of the scoring pass that produced this generation
    pub mean_score: f64,
    /// Best payoff of that scoring pass
    pub max_score: f64,
    /// Cells whose strategy changed on the step into this generation
    pub changed: usize,
}

impl Stats {
    /// Create new empty stats
    pub fn new() -> Self {
        Self::default()
    }

    /// Stats for a field that has not been evolved yet
    pub fn initial(field: &Field) -> Self {
        let mut stats = Self::new();
        stats.fill_population(field);
        stats
    }

    /// Update stats after a step: `scored` is the previous generation with
    /// its payoffs, `next` the field it produced
    pub fn update(&mut self, generation: u64, scored: &Field, next: &Field) {
        self.generation = generation;
        self.fill_population(next);

        let n = scored.len() as f64;
        self.mean_score = scored.cells().iter().map(|c| c.score).sum::<f64>() / n;
        self.max_score = scored
            .cells()
            .iter()
            .map(|c| c.score)
            .fold(f64::MIN, f64::max);
        self.changed = scored
            .cells()
            .iter()
            .zip(next.cells())
            .filter(|(a, b)| a.strategy != b.strategy)
            .count();
    }

    fn fill_population(&mut self, field: &Field) {
        self.rows = field.rows();
        self.cols = field.cols();
        self.cooperators = field.count(Strategy::Cooperate);
        self.defectors = field.len() - self.cooperators;
        self.cooperation_rate = self.cooperators as f64 / field.len() as f64;
    }

    /// Format stats as a one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Gen:{:6} | C:{:6} | D:{:6} | Coop:{:5.1}% | Score:{:.2} (max {:.2}) | Changed:{}",
            self.generation,
            self.cooperators,
            self.defectors,
            self.cooperation_rate * 100.0,
            self.mean_score,
            self.max_score,
            self.changed
        )
    }
}

/// Historical statistics tracker
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StatsHistory {
    /// All recorded stats snapshots
    pub snapshots: Vec<Stats>,
    /// Recording interval in generations
    pub interval: u64,
}

impl StatsHistory {
    /// Create new history with recording interval
    pub fn new(interval: u64) -> Self {
        Self {
            snapshots: Vec::new(),
            interval: interval.max(1),
        }
    }

    /// True if `generation` falls on the recording interval
    pub fn should_record(&self, generation: u64) -> bool {
        generation % self.interval.max(1) == 0
    }

    /// Record a stats snapshot
    pub fn record(&mut self, stats: Stats) {
        self.snapshots.push(stats);
    }

    /// Most recent snapshot
    pub fn latest(&self) -> Option<&Stats> {
        self.snapshots.last()
    }

    /// Cooperation rate over time
    pub fn cooperation_series(&self) -> Vec<(u64, f64)> {
        self.snapshots
            .iter()
            .map(|s| (s.generation, s.cooperation_rate))
            .collect()
    }

    /// Save history to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }

    /// Load history from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Number of cells in each transition class over the final step
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionCounts {
    pub stayed_cooperator: usize,
    pub became_cooperator: usize,
    pub became_defector: usize,
    pub stayed_defector: usize,
}

impl TransitionCounts {
    pub fn from_pair(pair: &GenerationPair) -> Self {
        let mut counts = Self::default();
        for transition in pair.transitions() {
            *counts.get_mut(transition) += 1;
        }
        counts
    }

    pub fn get(&self, transition: Transition) -> usize {
        match transition {
            Transition::StayedCooperator => self.stayed_cooperator,
            Transition::BecameCooperator => self.became_cooperator,
            Transition::BecameDefector => self.became_defector,
            Transition::StayedDefector => self.stayed_defector,
        }
    }

    fn get_mut(&mut self, transition: Transition) -> &mut usize {
        match transition {
            Transition::StayedCooperator => &mut self.stayed_cooperator,
            Transition::BecameCooperator => &mut self.became_cooperator,
            Transition::BecameDefector => &mut self.became_defector,
            Transition::StayedDefector => &mut self.stayed_defector,
        }
    }

    pub fn total(&self) -> usize {
        Transition::ALL.iter().map(|&t| self.get(t)).sum()
    }
}
