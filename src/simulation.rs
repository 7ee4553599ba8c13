//! Simulation driver - generation loop with stats and history of the last
//! two generations.

use crate::evolution::{update_strategies, GenerationPair};
use crate::grid::Field;
use crate::payoff::update_scores;
use crate::stats::{Stats, StatsHistory};
use crate::strategy::Payoff;

/// A running spatial game
pub struct Simulation {
    // Generations
    current: Field,
    previous: Option<Field>,

    // State
    generation: u64,
    payoff: Payoff,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,
}

impl Simulation {
    /// Start a simulation from an initial field, recording stats every generation
    pub fn new(field: Field, payoff: Payoff) -> Self {
        Self::with_stats_interval(field, payoff, 1)
    }

    /// Start a simulation recording stats every `stats_interval` generations
    pub fn with_stats_interval(field: Field, payoff: Payoff, stats_interval: u64) -> Self {
        let stats = Stats::initial(&field);
        let mut stats_history = StatsHistory::new(stats_interval);
        stats_history.record(stats.clone());

        Self {
            current: field,
            previous: None,
            generation: 0,
            payoff,
            stats,
            stats_history,
        }
    }

    /// Advance one generation
    pub fn step(&mut self) {
        // Phase 1: score every cell against its neighborhood
        let scored = update_scores(&self.current, self.payoff);

        // Phase 2: imitate the best neighbor into a fresh field
        let next = update_strategies(&scored);

        self.generation += 1;
        self.stats.update(self.generation, &scored, &next);
        if self.stats_history.should_record(self.generation) {
            self.stats_history.record(self.stats.clone());
        }
        log::debug!("{}", self.stats.summary());

        // Older generations are dropped here
        self.previous = Some(std::mem::replace(&mut self.current, next));
    }

    /// Run for a fixed number of generations
    pub fn run(&mut self, steps: u64) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Generations evolved so far
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Latest generation
    pub fn current(&self) -> &Field {
        &self.current
    }

    /// Generation before the latest; the initial field if nothing has run
    pub fn penultimate(&self) -> &Field {
        self.previous.as_ref().unwrap_or(&self.current)
    }

    /// True once every cell plays the same strategy
    pub fn is_uniform(&self) -> bool {
        self.stats.cooperators == 0 || self.stats.defectors == 0
    }

    /// Consume the simulation, keeping the last two generations
    pub fn into_generations(self) -> GenerationPair {
        let penultimate = match self.previous {
            Some(previous) => previous,
            None => self.current.clone(),
        };
        GenerationPair {
            penultimate,
            last: self.current,
        }
    }
}
