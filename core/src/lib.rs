#![no_std]

extern crate alloc;

use core::ops::Index;
use core::time::Duration;
use hashbrown::HashMap;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use card::*;
pub use error::*;
pub use generator::*;
pub use selection::*;
pub use session::*;
pub use types::*;

mod card;
mod error;
mod generator;
mod selection;
mod session;
mod types;

/// Mismatched cards stay face up this long before the revert starts.
pub const DEFAULT_REVEAL_HOLD_MS: u32 = 350;
/// Further delay between covering the cards and accepting input again.
pub const DEFAULT_COVER_DELAY_MS: u32 = 150;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub reveal_hold_ms: u32,
    pub cover_delay_ms: u32,
}

impl GameConfig {
    pub const fn new(size: Coord2) -> Self {
        Self {
            size,
            reveal_hold_ms: DEFAULT_REVEAL_HOLD_MS,
            cover_delay_ms: DEFAULT_COVER_DELAY_MS,
        }
    }

    pub const fn with_delays(size: Coord2, reveal_hold_ms: u32, cover_delay_ms: u32) -> Self {
        Self {
            size,
            reveal_hold_ms,
            cover_delay_ms,
        }
    }

    /// Rejects zero-sized and odd-celled grids; cards come in pairs.
    pub fn validate(&self) -> Result<()> {
        let (rows, cols) = self.size;
        if rows == 0 || cols == 0 || mult(rows, cols) % 2 != 0 {
            Err(GameError::InvalidGridDimensions)
        } else {
            Ok(())
        }
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }

    /// How long a mismatched pair stays face up before the revert.
    pub const fn reveal_hold(&self) -> Duration {
        Duration::from_millis(self.reveal_hold_ms as u64)
    }

    /// How long the session keeps ignoring input after the cards are covered.
    pub const fn cover_delay(&self) -> Duration {
        Duration::from_millis(self.cover_delay_ms as u64)
    }
}

/// Immutable cell-to-symbol assignment for one game.
///
/// Invariant: every symbol that appears in the grid appears in exactly two
/// cells. `from_symbols` is the only constructor and enforces this.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PairGrid {
    symbols: Array2<Symbol>,
}

impl PairGrid {
    pub fn from_symbols(symbols: Array2<Symbol>) -> Result<Self> {
        let mut occurrences: HashMap<Symbol, CellCount> = HashMap::new();
        for &symbol in symbols.iter() {
            *occurrences.entry(symbol).or_insert(0) += 1;
        }
        if occurrences.values().any(|&count| count != 2) {
            return Err(GameError::UnpairedSymbol);
        }
        Ok(Self { symbols })
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.symbols.dim();
        (dim.0 as Coord, dim.1 as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        self.symbols.len() as CellCount
    }

    pub fn pair_count(&self) -> CellCount {
        self.total_cells() / 2
    }

    /// Count of distinct symbols in use, always equal to `pair_count`.
    pub fn symbol_count(&self) -> CellCount {
        let mut seen = hashbrown::HashSet::new();
        seen.extend(self.symbols.iter().copied());
        seen.len() as CellCount
    }
}

impl Index<Coord2> for PairGrid {
    type Output = Symbol;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.symbols[coords.to_nd_index()]
    }
}

/// Result of feeding one player selection into the session.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SelectOutcome {
    /// Selection was rejected by the state machine; nothing changed.
    Ignored,
    /// First card of a turn turned face up.
    Revealed,
    /// Second card completed a pair.
    Matched,
    /// Second card did not match; the session is now resolving.
    Mismatched,
    /// The match completed the last open pair.
    Won,
}

impl SelectOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Result of firing one scheduled resolution continuation.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ResolveOutcome {
    /// No resolution was pending; a stale continuation fired harmlessly.
    NoChange,
    /// The mismatched pair went back to face down.
    Reverted,
    /// The resolution finished and input is accepted again.
    Cleared,
}

impl ResolveOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn grid_constructor_enforces_exactly_twice() {
        let symbols = Array2::from_shape_vec(
            (2, 2),
            vec![Symbol(0), Symbol(1), Symbol(1), Symbol(0)],
        )
        .unwrap();
        let grid = PairGrid::from_symbols(symbols).unwrap();
        assert_eq!(grid.pair_count(), 2);
        assert_eq!(grid.symbol_count(), 2);
        assert_eq!(grid[(0, 0)], grid[(1, 1)]);
    }

    #[test]
    fn grid_constructor_rejects_unpaired_symbols() {
        let symbols = Array2::from_shape_vec(
            (2, 2),
            vec![Symbol(0), Symbol(0), Symbol(0), Symbol(1)],
        )
        .unwrap();
        assert_eq!(
            PairGrid::from_symbols(symbols),
            Err(GameError::UnpairedSymbol)
        );
    }

    #[test]
    fn config_rejects_odd_and_empty_grids() {
        assert_eq!(
            GameConfig::new((3, 3)).validate(),
            Err(GameError::InvalidGridDimensions)
        );
        assert_eq!(
            GameConfig::new((0, 4)).validate(),
            Err(GameError::InvalidGridDimensions)
        );
        assert!(GameConfig::new((4, 4)).validate().is_ok());
        assert!(GameConfig::new((2, 1)).validate().is_ok());
    }

    #[test]
    fn config_exposes_resolution_delays() {
        let config = GameConfig::with_delays((4, 4), 350, 150);
        assert_eq!(config.reveal_hold(), Duration::from_millis(350));
        assert_eq!(config.cover_delay(), Duration::from_millis(150));
        assert_eq!(config.pair_count(), 8);
    }
}
