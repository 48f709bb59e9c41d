use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Grid dimensions must be non-zero with an even cell count")]
    InvalidGridDimensions,
    #[error("Palette too small: {required} pairs required, {available} symbols available")]
    InsufficientPalette {
        required: u16,
        available: u16,
    },
    #[error("Palette contains a duplicate symbol")]
    DuplicateSymbol,
    #[error("Symbol does not appear in exactly two cells")]
    UnpairedSymbol,
    #[error("Session has not been started yet")]
    NotStarted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
