use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Places mines by shuffling every position index of the board and keeping
/// the first `mines` of them, which makes the chosen positions distinct by
/// construction.
#[derive(Clone, Debug)]
pub struct ShuffleMineGenerator {
    rng: SmallRng,
}

impl ShuffleMineGenerator {
    /// Deterministic generator for reproducible layouts.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Generator seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }
}

impl MineGenerator for ShuffleMineGenerator {
    fn generate(&mut self, config: BoardConfig) -> MineLayout {
        let cols = config.cols as CellCount;
        let mut positions: Vec<CellCount> = (0..config.total_cells()).collect();
        positions.shuffle(&mut self.rng);

        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());
        for &position in &positions[..config.mines as usize] {
            let coords = ((position / cols) as Coord, (position % cols) as Coord);
            mine_mask[coords.to_nd_index()] = true;
        }

        let layout = MineLayout::from_mine_mask(mine_mask);
        log::debug!(
            "generated layout: {} mines on {:?}",
            layout.mine_count(),
            layout.size()
        );
        layout
    }
}
