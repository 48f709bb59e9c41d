use hashbrown::HashSet;

use crate::*;
pub use random::*;

mod random;

/// Produces the cell-to-symbol assignment for a fresh game.
pub trait PairGenerator {
    fn generate(self, size: Coord2, palette: &[Symbol]) -> Result<PairGrid>;
}

/// How the generator distributes the active symbols over the grid. Both
/// strategies satisfy the exactly-twice invariant.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum DealStrategy {
    /// Per cell, draw a symbol uniformly among those not yet used twice.
    Rejection,
    /// Shuffle the exact two-of-each multiset over the cells.
    Shuffle,
}

/// Checks size and palette preconditions, returning the required pair count.
pub(crate) fn validate_inputs(size: Coord2, palette: &[Symbol]) -> Result<CellCount> {
    let (rows, cols) = size;
    let total_cells = mult(rows, cols);
    if rows == 0 || cols == 0 || total_cells % 2 != 0 {
        return Err(GameError::InvalidGridDimensions);
    }

    let distinct: HashSet<Symbol> = palette.iter().copied().collect();
    if distinct.len() != palette.len() {
        return Err(GameError::DuplicateSymbol);
    }

    let pairs = total_cells / 2;
    if (palette.len() as CellCount) < pairs {
        return Err(GameError::InsufficientPalette {
            required: pairs,
            available: palette.len() as u16,
        });
    }
    Ok(pairs)
}
