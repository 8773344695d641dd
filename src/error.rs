use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("cannot fit {mines} mines on a {width}x{height} board (at most width*height-9 mines, dimensions must be positive)")]
    InvalidConfiguration { width: usize, height: usize, mines: usize },
    #[error("cell ({x}, {y}) is outside the board")]
    OutOfBounds { x: usize, y: usize },
    #[error("invalid move: {0}")]
    InvalidTransition(&'static str),
}

pub type Result<T> = std::result::Result<T, GameError>;
