use tracing::info;

use crate::clock::Clock;
use crate::engine::{GameConfig, GameEvent, Minefield, RevealResult};
use crate::error::Result;
use crate::grid::CellState;
use crate::random::MineSource;
use crate::scores::{Score, ScoreBoard};

/// A minefield wired to its clock and score board. Every move forwards the engine's signals.
pub struct Session {
    field: Minefield,
    config: GameConfig,
    clock: Clock,
    scores: ScoreBoard,
}

impl Session {
    pub fn new(config: GameConfig, source: impl MineSource + 'static) -> Result<Self> {
        let field = Minefield::new(config, source)?;
        Ok(Self::from_field(field))
    }

    pub fn from_field(field: Minefield) -> Self {
        let config = GameConfig::new(field.width(), field.height(), field.mine_count());
        Self { field, config, clock: Clock::new(), scores: ScoreBoard::new() }
    }

    pub fn field(&self) -> &Minefield { &self.field }
    pub fn config(&self) -> GameConfig { self.config }
    pub fn clock(&self) -> &Clock { &self.clock }
    pub fn scores(&self) -> &ScoreBoard { &self.scores }

    pub fn open(&mut self, x: usize, y: usize) -> Result<RevealResult> {
        let res = self.field.open(x, y);
        self.sync();
        res
    }

    pub fn cycle_flag(&mut self, x: usize, y: usize) -> Result<CellState> { self.field.cycle_flag(x, y) }

    pub fn set_flag(&mut self, x: usize, y: usize, kind: CellState) -> Result<()> { self.field.set_flag(x, y, kind) }

    /// Puts `mark` on the cell, or clears it when the cell already carries it.
    pub fn toggle_mark(&mut self, x: usize, y: usize, mark: CellState) -> Result<()> {
        let current = self.field.cell_state(x, y)?;
        self.field.set_flag(x, y, if current == mark { CellState::Hidden } else { mark })
    }

    /// Same board size and mine count as the current game.
    pub fn restart(&mut self) -> Result<()> { self.restart_with(self.config) }

    pub fn restart_with(&mut self, config: GameConfig) -> Result<()> {
        self.field.new_game(config)?;
        self.config = config;
        self.clock.reset();
        Ok(())
    }

    fn sync(&mut self) {
        for event in self.field.take_events() {
            match event {
                GameEvent::Started => self.clock.start(),
                GameEvent::Ended { won } => {
                    self.clock.stop();
                    if won {
                        let score = Score { width: self.config.width, height: self.config.height, mines: self.config.mines, elapsed: self.clock.elapsed() };
                        info!(%score, "recorded score");
                        self.scores.record(score);
                    }
                }
            }
        }
    }
}
