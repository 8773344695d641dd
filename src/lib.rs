pub mod clock;
pub mod engine;
pub mod error;
pub mod grid;
pub mod random;
pub mod scores;
pub mod session;
pub mod tui;
pub mod view;

pub use engine::{GameConfig, GameEvent, Minefield, RevealResult};
pub use error::{GameError, Result};
pub use grid::{Cell, CellState, Grid};
pub use random::{MineSource, RngSource, SequenceSource};
pub use session::Session;
