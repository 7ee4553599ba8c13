//! Payoff engine: per-cell scores over the Moore neighborhood.

use crate::grid::{Cell, Field};
use crate::strategy::Payoff;

/// Total payoff of the cell at `(row, col)` against every in-bounds cell of
/// its Moore neighborhood, itself included. No wraparound.
pub fn score(field: &Field, row: usize, col: usize, b: Payoff) -> f64 {
    let me = field.strategy(row, col);

    let own = b.game_between(me, me);
    field
        .neighbors(row, col)
        .map(|(r, c)| b.game_between(me, field.strategy(r, c)))
        .fold(own, |acc, x| acc + x)
}

/// Scored snapshot of `field`: same strategies, every score recomputed
pub fn update_scores(field: &Field, b: Payoff) -> Field {
    field.map_cells(|row, col| Cell {
        strategy: field.strategy(row, col),
        score: score(field, row, col, b),
    })
}
