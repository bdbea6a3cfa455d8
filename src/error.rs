use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("mine position out of bounds")]
    InvalidCoords,
    #[error("mine count must stay below the cell count")]
    TooManyMines,
    #[error("board needs at least one row and one column")]
    EmptyBoard,
}

pub type Result<T> = core::result::Result<T, GameError>;
