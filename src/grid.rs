use crate::random::MineSource;

/// Player-visible state of a single cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    #[default]
    Hidden,
    Revealed,
    Flagged,
    FlaggedUnsure,
}

impl CellState {
    /// Next state of the flag cycle `Hidden -> Flagged -> FlaggedUnsure -> Hidden`.
    /// `Revealed` is terminal and has no successor.
    pub const fn next_mark(self) -> Option<Self> {
        match self {
            Self::Hidden => Some(Self::Flagged),
            Self::Flagged => Some(Self::FlaggedUnsure),
            Self::FlaggedUnsure => Some(Self::Hidden),
            Self::Revealed => None,
        }
    }

    pub const fn is_marked(self) -> bool { matches!(self, Self::Flagged | Self::FlaggedUnsure) }

    pub const fn is_revealed(self) -> bool { matches!(self, Self::Revealed) }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    is_mine: bool,
    state: CellState,
}

impl Cell {
    pub fn is_mine(&self) -> bool { self.is_mine }
    pub fn state(&self) -> CellState { self.state }
}

/// Rectangular board of cells, stored row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub(crate) fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![Cell::default(); width * height] }
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.height }

    pub fn contains(&self, x: usize, y: usize) -> bool { x < self.width && y < self.height }

    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if self.contains(x, y) { Some(&self.cells[idx(self.width, x, y)]) } else { None }
    }

    pub(crate) fn state(&self, x: usize, y: usize) -> CellState { self.cells[idx(self.width, x, y)].state }

    pub(crate) fn set_state(&mut self, x: usize, y: usize, state: CellState) {
        self.cells[idx(self.width, x, y)].state = state;
    }

    pub(crate) fn is_mine(&self, x: usize, y: usize) -> bool { self.cells[idx(self.width, x, y)].is_mine }

    pub(crate) fn set_mine(&mut self, x: usize, y: usize) { self.cells[idx(self.width, x, y)].is_mine = true; }

    /// Clipped Moore neighborhood of `(x, y)`, the cell itself excluded.
    pub fn neighbors(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
        block(self.width, self.height, x, y).filter(move |&p| p != (x, y))
    }

    pub fn mines_around(&self, x: usize, y: usize) -> u8 {
        self.count_neighbors(x, y, |c| c.is_mine)
    }

    pub fn flags_around(&self, x: usize, y: usize) -> u8 {
        self.count_neighbors(x, y, |c| c.state == CellState::Flagged)
    }

    /// Neighbors not yet revealed, marked ones included.
    pub fn hidden_around(&self, x: usize, y: usize) -> u8 {
        self.count_neighbors(x, y, |c| !c.state.is_revealed())
    }

    fn count_neighbors(&self, x: usize, y: usize, pred: impl Fn(&Cell) -> bool) -> u8 {
        let mut n = 0u8;
        for (nx, ny) in self.neighbors(x, y) {
            if pred(&self.cells[idx(self.width, nx, ny)]) { n += 1; }
        }
        n
    }

    pub fn mine_total(&self) -> usize { self.cells.iter().filter(|c| c.is_mine).count() }

    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state == state).count()
    }

    /// Rejection sampling: draw x then y, retry when the cell already holds a mine.
    pub(crate) fn place_mines(&mut self, count: usize, source: &mut dyn MineSource) {
        let mut placed = 0;
        while placed < count {
            let (x, y) = (source.pick(self.width), source.pick(self.height));
            let cell = &mut self.cells[idx(self.width, x, y)];
            if cell.is_mine { continue; }
            cell.is_mine = true;
            placed += 1;
        }
    }

    /// Empties the 3x3 block around `(x, y)` and puts every removed mine back somewhere outside
    /// it. Returns how many mines moved.
    pub(crate) fn clear_opening(&mut self, x: usize, y: usize, source: &mut dyn MineSource) -> usize {
        let mut removed = 0;
        for (bx, by) in block(self.width, self.height, x, y) {
            let cell = &mut self.cells[idx(self.width, bx, by)];
            if cell.is_mine {
                cell.is_mine = false;
                removed += 1;
            }
        }
        for _ in 0..removed {
            loop {
                let (cx, cy) = (source.pick(self.width), source.pick(self.height));
                if cx.abs_diff(x) <= 1 && cy.abs_diff(y) <= 1 { continue; }
                let cell = &mut self.cells[idx(self.width, cx, cy)];
                if cell.is_mine { continue; }
                cell.is_mine = true;
                break;
            }
        }
        removed
    }
}

fn idx(w: usize, x: usize, y: usize) -> usize { y * w + x }

/// The 3x3 block centered on `(x, y)`, clipped to the board.
fn block(w: usize, h: usize, x: usize, y: usize) -> impl Iterator<Item = (usize, usize)> {
    let xs = x.saturating_sub(1)..=(x + 1).min(w - 1);
    let ys = y.saturating_sub(1)..=(y + 1).min(h - 1);
    ys.flat_map(move |ny| xs.clone().map(move |nx| (nx, ny)))
}
