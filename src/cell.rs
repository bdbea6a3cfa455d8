use serde::{Deserialize, Serialize};

/// State of a single grid cell as the player sees it.
///
/// `Revealed` carries the adjacent-mine count computed when the cell was
/// opened and is terminal: no operation moves a revealed cell anywhere else
/// until the whole board is replaced.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    Questioned,
    Revealed(u8),
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_))
    }

    /// Whether the cell still accepts a reveal or a mark change.
    pub const fn is_unrevealed(self) -> bool {
        !self.is_revealed()
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
