use alloc::vec::Vec;
use smallvec::SmallVec;

use super::*;

/// Seeded generator; the same seed always deals the same grid.
///
/// The palette is shuffled before the first `pair_count` entries become the
/// active symbol set, so callers may pass it in any fixed order.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomPairGenerator {
    seed: u64,
    strategy: DealStrategy,
}

impl RandomPairGenerator {
    pub fn new(seed: u64, strategy: DealStrategy) -> Self {
        Self { seed, strategy }
    }
}

impl PairGenerator for RandomPairGenerator {
    fn generate(self, size: Coord2, palette: &[Symbol]) -> Result<PairGrid> {
        use rand::prelude::*;

        let pairs = validate_inputs(size, palette)?;
        let total_cells = mult(size.0, size.1) as usize;
        let mut rng = SmallRng::seed_from_u64(self.seed);

        let mut deck: SmallVec<[Symbol; 32]> = SmallVec::from_slice(palette);
        deck.shuffle(&mut rng);
        let active = &deck[..pairs as usize];

        let cells = match self.strategy {
            DealStrategy::Rejection => {
                // The draw is restricted to symbols with remaining capacity,
                // which is the redraw-until-free loop with the retries
                // collapsed into a single bounded draw.
                let mut occurrences: SmallVec<[u8; 32]> = SmallVec::from_elem(0, active.len());
                let mut cells = Vec::with_capacity(total_cells);
                for _ in 0..total_cells {
                    let open: SmallVec<[usize; 32]> = (0..active.len())
                        .filter(|&i| occurrences[i] < 2)
                        .collect();
                    let i = open[rng.random_range(0..open.len())];
                    occurrences[i] += 1;
                    cells.push(active[i]);
                }
                cells
            }
            DealStrategy::Shuffle => {
                let mut cells = Vec::with_capacity(total_cells);
                for &symbol in active {
                    cells.push(symbol);
                    cells.push(symbol);
                }
                cells.shuffle(&mut rng);
                cells
            }
        };

        log::debug!(
            "dealt {}x{} grid, {} pairs, strategy {:?}",
            size.0,
            size.1,
            pairs,
            self.strategy
        );

        let symbols = ndarray::Array2::from_shape_vec((size.0 as usize, size.1 as usize), cells)
            .expect("cell count matches grid shape");
        PairGrid::from_symbols(symbols)
    }
}
