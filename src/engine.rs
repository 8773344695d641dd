use std::collections::{BTreeSet, VecDeque};

use tracing::{debug, info, trace};

use crate::error::{GameError, Result};
use crate::grid::{Cell, CellState, Grid};
use crate::random::MineSource;

/// Cells around the first opened cell that are kept free of mines.
pub const OPENING_SIZE: usize = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealResult {
    NoOp,
    RevealedSafe,
    HitMine,
    Won,
}

/// Signals for collaborators such as the clock and the score board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Ended { won: bool },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub mines: usize,
}

impl GameConfig {
    pub const fn new(width: usize, height: usize, mines: usize) -> Self { Self { width, height, mines } }

    pub fn validate(&self) -> Result<()> {
        let needed = self.mines.checked_add(OPENING_SIZE);
        let fits = self.width > 0 && self.height > 0
            && matches!((self.width.checked_mul(self.height), needed), (Some(total), Some(n)) if n <= total);
        if fits {
            Ok(())
        } else {
            Err(GameError::InvalidConfiguration { width: self.width, height: self.height, mines: self.mines })
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self { Self::new(8, 8, 8) }
}

pub struct Minefield {
    grid: Grid,
    mines: usize,
    revealed: usize,
    is_over: bool,
    won: bool,
    has_started: bool,
    exploded: Option<(usize, usize)>,
    events: Vec<GameEvent>,
    source: Box<dyn MineSource>,
}

impl Minefield {
    pub fn new(config: GameConfig, source: impl MineSource + 'static) -> Result<Self> {
        let mut source: Box<dyn MineSource> = Box::new(source);
        let grid = Self::placed_grid(config, source.as_mut())?;
        Ok(Self::with_grid(grid, config.mines, source))
    }

    /// Board with mines at exactly `mines`. Duplicate coordinates count once. First-click
    /// relocation still applies and draws from `source`.
    pub fn from_mine_coords(width: usize, height: usize, mines: &[(usize, usize)], source: impl MineSource + 'static) -> Result<Self> {
        let distinct: BTreeSet<_> = mines.iter().copied().collect();
        GameConfig::new(width, height, distinct.len()).validate()?;
        let mut grid = Grid::new(width, height);
        for &(x, y) in &distinct {
            if !grid.contains(x, y) { return Err(GameError::OutOfBounds { x, y }); }
            grid.set_mine(x, y);
        }
        Ok(Self::with_grid(grid, distinct.len(), Box::new(source)))
    }

    /// Discards the current game and starts a fresh one. On error nothing changes.
    pub fn new_game(&mut self, config: GameConfig) -> Result<()> {
        self.grid = Self::placed_grid(config, self.source.as_mut())?;
        self.mines = config.mines;
        self.revealed = 0;
        self.is_over = false;
        self.won = false;
        self.has_started = false;
        self.exploded = None;
        self.events.clear();
        Ok(())
    }

    fn placed_grid(config: GameConfig, source: &mut dyn MineSource) -> Result<Grid> {
        config.validate()?;
        let mut grid = Grid::new(config.width, config.height);
        grid.place_mines(config.mines, source);
        debug!(width = config.width, height = config.height, mines = config.mines, "placed mines");
        Ok(grid)
    }

    fn with_grid(grid: Grid, mines: usize, source: Box<dyn MineSource>) -> Self {
        Self { grid, mines, revealed: 0, is_over: false, won: false, has_started: false, exploded: None, events: Vec::new(), source }
    }

    pub fn open(&mut self, x: usize, y: usize) -> Result<RevealResult> {
        self.check_bounds(x, y)?;
        if self.is_over { return Err(GameError::InvalidTransition("the game is over")); }
        let state = self.grid.state(x, y);
        if state.is_marked() { return Ok(RevealResult::NoOp); }

        if !self.has_started {
            let moved = self.grid.clear_opening(x, y, self.source.as_mut());
            debug!(x, y, moved, "cleared first opening");
            self.has_started = true;
            self.events.push(GameEvent::Started);
            info!(x, y, "game started");
        }

        self.reveal(x, y);
        if self.is_over { return Ok(self.result()); }

        let mut opened = 0usize;
        if self.grid.flags_around(x, y) == self.grid.mines_around(x, y) {
            let mut queue: VecDeque<_> = self.hidden_neighbors(x, y).collect();
            while let Some((cx, cy)) = queue.pop_front() {
                if self.grid.state(cx, cy) != CellState::Hidden { continue; }
                self.reveal(cx, cy);
                opened += 1;
                if self.is_over { break; }
                if self.grid.mines_around(cx, cy) == 0 {
                    queue.extend(self.hidden_neighbors(cx, cy));
                }
            }
            trace!(x, y, opened, "opened around");
        }

        if self.is_over { return Ok(self.result()); }
        Ok(if state.is_revealed() && opened == 0 { RevealResult::NoOp } else { RevealResult::RevealedSafe })
    }

    fn hidden_neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.grid.neighbors(x, y).filter(move |&(nx, ny)| self.grid.state(nx, ny) == CellState::Hidden)
    }

    fn reveal(&mut self, x: usize, y: usize) {
        if !self.grid.state(x, y).is_revealed() {
            self.grid.set_state(x, y, CellState::Revealed);
            self.revealed += 1;
        }
        if self.grid.is_mine(x, y) {
            self.exploded = Some((x, y));
            self.finish(false);
        } else {
            self.check_win();
        }
    }

    /// Declares the win once only mines are left unrevealed. Returns whether the game is won.
    pub fn check_win(&mut self) -> bool {
        if !self.is_over && self.unrevealed() == self.mines { self.finish(true); }
        self.is_over && self.won
    }

    fn finish(&mut self, won: bool) {
        self.is_over = true;
        self.won = won;
        self.events.push(GameEvent::Ended { won });
        info!(won, revealed = self.revealed, "game ended");
    }

    fn result(&self) -> RevealResult {
        if self.won { RevealResult::Won } else { RevealResult::HitMine }
    }

    pub fn cycle_flag(&mut self, x: usize, y: usize) -> Result<CellState> {
        self.check_markable(x, y)?;
        let next = self.grid.state(x, y).next_mark().ok_or(GameError::InvalidTransition("cell is already revealed"))?;
        self.grid.set_state(x, y, next);
        Ok(next)
    }

    pub fn set_flag(&mut self, x: usize, y: usize, kind: CellState) -> Result<()> {
        self.check_markable(x, y)?;
        if kind.is_revealed() { return Err(GameError::InvalidTransition("cells are revealed by opening them")); }
        self.grid.set_state(x, y, kind);
        Ok(())
    }

    fn check_markable(&self, x: usize, y: usize) -> Result<()> {
        self.check_bounds(x, y)?;
        if self.is_over { return Err(GameError::InvalidTransition("the game is over")); }
        if self.grid.state(x, y).is_revealed() { return Err(GameError::InvalidTransition("cell is already revealed")); }
        Ok(())
    }

    fn check_bounds(&self, x: usize, y: usize) -> Result<()> {
        if self.grid.contains(x, y) { Ok(()) } else { Err(GameError::OutOfBounds { x, y }) }
    }

    /// Drains the signals emitted since the last call, oldest first.
    pub fn take_events(&mut self) -> Vec<GameEvent> { std::mem::take(&mut self.events) }
}

impl Minefield {
    pub fn width(&self) -> usize { self.grid.width() }
    pub fn height(&self) -> usize { self.grid.height() }
    pub fn mine_count(&self) -> usize { self.mines }
    pub fn is_over(&self) -> bool { self.is_over }
    pub fn won(&self) -> bool { self.won }
    pub fn has_started(&self) -> bool { self.has_started }
    pub fn exploded(&self) -> Option<(usize, usize)> { self.exploded }
    pub fn grid(&self) -> &Grid { &self.grid }
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> { self.grid.cell(x, y) }

    pub fn unrevealed(&self) -> usize { self.grid.width() * self.grid.height() - self.revealed }

    /// Mines minus confirmed flags. Negative when over-flagged.
    pub fn remaining_mines(&self) -> isize {
        self.mines as isize - self.grid.count_state(CellState::Flagged) as isize
    }

    pub fn cell_state(&self, x: usize, y: usize) -> Result<CellState> {
        self.check_bounds(x, y)?;
        Ok(self.grid.state(x, y))
    }

    pub fn cell_is_mine(&self, x: usize, y: usize) -> Result<bool> {
        self.check_bounds(x, y)?;
        Ok(self.grid.is_mine(x, y))
    }

    pub fn mines_around(&self, x: usize, y: usize) -> Result<u8> {
        self.check_bounds(x, y)?;
        Ok(self.grid.mines_around(x, y))
    }

    pub fn flags_around(&self, x: usize, y: usize) -> Result<u8> {
        self.check_bounds(x, y)?;
        Ok(self.grid.flags_around(x, y))
    }

    pub fn hidden_around(&self, x: usize, y: usize) -> Result<u8> {
        self.check_bounds(x, y)?;
        Ok(self.grid.hidden_around(x, y))
    }
}
