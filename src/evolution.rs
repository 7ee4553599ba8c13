//! Imitate-the-best-neighbor strategy update and the generation loop.

use crate::grid::{Cell, Field};
use crate::payoff::update_scores;
use crate::strategy::{Payoff, Strategy};

/// Next generation from a scored field.
///
/// Each cell starts with its own strategy and score as the incumbent, then
/// visits its in-bounds neighbors in [`MOORE_OFFSETS`](crate::grid::MOORE_OFFSETS)
/// order. A neighbor takes over only with a strictly greater score, so the
/// cell keeps its strategy on ties and the earliest of several tied
/// neighbors wins. Scores in the returned field are reset to 0.
pub fn update_strategies(scored: &Field) -> Field {
    scored.map_cells(|row, col| {
        let mut best_score = scored.score(row, col);
        let mut best = scored.strategy(row, col);

        for (r, c) in scored.neighbors(row, col) {
            let candidate = scored.score(r, c);
            if candidate > best_score {
                best_score = candidate;
                best = scored.strategy(r, c);
            }
        }

        Cell::new(best)
    })
}

/// One score -> replace cycle
pub fn step(field: &Field, b: Payoff) -> Field {
    let scored = update_scores(field, b);
    update_strategies(&scored)
}

/// Apply `nsteps` generations. Zero steps returns `field` untouched.
pub fn evolve(field: Field, nsteps: u64, b: Payoff) -> Field {
    (0..nsteps).fold(field, |current, _| step(&current, b))
}

/// The last two generations of a run: both are needed to classify how
/// each cell changed on the final step.
#[derive(Clone, Debug, PartialEq)]
pub struct GenerationPair {
    pub penultimate: Field,
    pub last: Field,
}

/// Rejected pair of generations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("generations differ in size: {penultimate_rows}x{penultimate_cols} vs {last_rows}x{last_cols}")]
pub struct DimensionMismatch {
    pub penultimate_rows: usize,
    pub penultimate_cols: usize,
    pub last_rows: usize,
    pub last_cols: usize,
}

impl GenerationPair {
    pub fn new(penultimate: Field, last: Field) -> Result<Self, DimensionMismatch> {
        check_dimensions(&penultimate, &last)?;
        Ok(Self { penultimate, last })
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.last.rows()
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.last.cols()
    }

    /// Transition of the cell at `(row, col)` over the final step
    pub fn transition(&self, row: usize, col: usize) -> Transition {
        Transition::between(
            self.penultimate.strategy(row, col),
            self.last.strategy(row, col),
        )
    }

    /// Per-cell transitions, row-major
    pub fn transitions(&self) -> impl Iterator<Item = Transition> + '_ {
        self.penultimate
            .cells()
            .iter()
            .zip(self.last.cells())
            .map(|(before, after)| Transition::between(before.strategy, after.strategy))
    }
}

pub(crate) fn check_dimensions(penultimate: &Field, last: &Field) -> Result<(), DimensionMismatch> {
    if penultimate.rows() != last.rows() || penultimate.cols() != last.cols() {
        return Err(DimensionMismatch {
            penultimate_rows: penultimate.rows(),
            penultimate_cols: penultimate.cols(),
            last_rows: last.rows(),
            last_cols: last.cols(),
        });
    }
    Ok(())
}

/// Run `nsteps` generations and keep the last two.
///
/// With `nsteps == 0` nothing evolves and both generations are the
/// initial field.
pub fn last_two_generations(field: Field, nsteps: u64, b: Payoff) -> GenerationPair {
    if nsteps == 0 {
        return GenerationPair {
            penultimate: field.clone(),
            last: field,
        };
    }

    let penultimate = evolve(field, nsteps - 1, b);
    let last = step(&penultimate, b);
    GenerationPair { penultimate, last }
}

/// How a cell's strategy changed over one step
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// C -> C
    StayedCooperator,
    /// D -> C
    BecameCooperator,
    /// C -> D
    BecameDefector,
    /// D -> D
    StayedDefector,
}

impl Transition {
    pub const ALL: [Transition; 4] = [
        Transition::StayedCooperator,
        Transition::BecameCooperator,
        Transition::BecameDefector,
        Transition::StayedDefector,
    ];

    pub fn between(before: Strategy, after: Strategy) -> Self {
        match (before, after) {
            (Strategy::Cooperate, Strategy::Cooperate) => Transition::StayedCooperator,
            (Strategy::Defect, Strategy::Cooperate) => Transition::BecameCooperator,
            (Strategy::Cooperate, Strategy::Defect) => Transition::BecameDefector,
            (Strategy::Defect, Strategy::Defect) => Transition::StayedDefector,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy::{Cooperate as C, Defect as D};

    fn payoff(b: f64) -> Payoff {
        Payoff::new(b).unwrap()
    }

    fn scored(rows: Vec<Vec<Strategy>>, scores: &[&[f64]]) -> Field {
        let mut field = Field::from_rows(rows).unwrap();
        for (r, row) in scores.iter().enumerate() {
            for (c, &s) in row.iter().enumerate() {
                field.set_score(r, c, s);
            }
        }
        field
    }

    #[test]
    fn test_self_wins_ties() {
        let field = scored(
            vec![vec![D, C, C], vec![C, C, C], vec![C, C, C]],
            &[&[5.0, 1.0, 1.0], &[1.0, 5.0, 1.0], &[1.0, 1.0, 1.0]],
        );
        let next = update_strategies(&field);

        assert_eq!(next.strategy(1, 1), C);
    }

    #[test]
    fn test_self_wins_ties_after_scoring() {
        // With b = 1 every cell of this 2x2 field scores 3.
        let field = Field::from_rows(vec![vec![D, C], vec![C, C]]).unwrap();
        let scored = update_scores(&field, payoff(1.0));
        assert_eq!(scored.score(0, 0), scored.score(1, 1));

        let next = update_strategies(&scored);
        assert!(next.same_layout(&field));
    }

    #[test]
    fn test_first_tied_neighbor_in_scan_order_wins() {
        let field = scored(
            vec![vec![C, C, D], vec![C, C, C], vec![C, C, C]],
            &[&[1.0, 1.0, 6.0], &[1.0, 1.0, 1.0], &[6.0, 1.0, 1.0]],
        );
        // (0,2) is visited before (2,0)
        assert_eq!(update_strategies(&field).strategy(1, 1), D);

        let field = scored(
            vec![vec![D, C, D], vec![D, D, D], vec![D, D, D]],
            &[&[0.0, 7.0, 0.0], &[0.0, 1.0, 0.0], &[0.0, 0.0, 7.0]],
        );
        // (0,1) is visited before (2,2)
        assert_eq!(update_strategies(&field).strategy(1, 1), C);
    }

    #[test]
    fn test_strictly_greater_later_neighbor_wins() {
        let field = scored(
            vec![vec![C, D, C], vec![D, C, C], vec![C, C, C]],
            &[&[0.0, 4.0, 0.0], &[3.0, 1.0, 0.0], &[0.0, 9.0, 0.0]],
        );
        // (0,1) leads with 4 until (2,1) beats it
        assert_eq!(update_strategies(&field).strategy(1, 1), C);

        let field = scored(
            vec![vec![C, D, C], vec![D, C, C], vec![C, C, C]],
            &[&[0.0, 4.0, 0.0], &[3.0, 1.0, 0.0], &[0.0, 2.0, 0.0]],
        );
        assert_eq!(update_strategies(&field).strategy(1, 1), D);
    }

    #[test]
    fn test_update_strategies_resets_scores() {
        let field = scored(vec![vec![C, D]], &[&[2.0, 3.0]]);
        let next = update_strategies(&field);

        assert!(next.cells().iter().all(|c| c.score == 0.0));
        assert_eq!(next.strategy(0, 0), D);
        assert_eq!(next.strategy(0, 1), D);
    }

    #[test]
    fn test_evolve_zero_steps_is_identity() {
        let field = Field::from_rows(vec![vec![C, D, C], vec![D, C, D]]).unwrap();
        let evolved = evolve(field.clone(), 0, payoff(1.9));
        assert_eq!(evolved, field);
    }

    #[test]
    fn test_lone_defector_takes_over_small_field() {
        let mut field = Field::filled(3, 3, C).unwrap();
        field.set_strategy(1, 1, D);

        let next = evolve(field, 1, payoff(3.0));
        assert_eq!(next.count(D), 9);
    }

    #[test]
    fn test_last_two_generations_zero_steps() {
        let field = Field::from_rows(vec![vec![C, D]]).unwrap();
        let pair = last_two_generations(field.clone(), 0, payoff(1.5));

        assert_eq!(pair.penultimate, field);
        assert_eq!(pair.last, field);
        assert!(pair.transitions().all(|t| matches!(
            t,
            Transition::StayedCooperator | Transition::StayedDefector
        )));
    }

    #[test]
    fn test_last_two_generations_matches_evolve() {
        let mut field = Field::filled(5, 5, C).unwrap();
        field.set_strategy(2, 2, D);
        field.set_strategy(0, 4, D);
        let b = payoff(1.85);

        let pair = last_two_generations(field.clone(), 4, b);
        assert_eq!(pair.penultimate, evolve(field.clone(), 3, b));
        assert_eq!(pair.last, evolve(field, 4, b));
    }

    #[test]
    fn test_transitions() {
        let before = Field::from_rows(vec![vec![C, C, D, D]]).unwrap();
        let after = Field::from_rows(vec![vec![C, D, C, D]]).unwrap();
        let pair = GenerationPair::new(before, after).unwrap();

        assert_eq!(
            pair.transitions().collect::<Vec<_>>(),
            vec![
                Transition::StayedCooperator,
                Transition::BecameDefector,
                Transition::BecameCooperator,
                Transition::StayedDefector,
            ]
        );
        assert_eq!(pair.transition(0, 2), Transition::BecameCooperator);
    }

    #[test]
    fn test_generation_pair_rejects_mismatch() {
        let a = Field::filled(2, 3, C).unwrap();
        let b = Field::filled(3, 2, C).unwrap();
        assert!(GenerationPair::new(a, b).is_err());
    }
}
