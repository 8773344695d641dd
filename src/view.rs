use std::fmt::Write as _;

use crate::engine::Minefield;
use crate::grid::CellState;

/// Character shown for the cell at `(x, y)`. Once the game is over hidden mines are uncovered,
/// the exploded one is `X` and flags on safe cells become `x`.
pub fn glyph(field: &Minefield, x: usize, y: usize) -> char {
    let Some(c) = field.cell(x, y) else { return ' ' };
    let over = field.is_over();
    match c.state() {
        CellState::Revealed if c.is_mine() => if field.exploded() == Some((x, y)) { 'X' } else { '*' },
        CellState::Revealed => match field.grid().mines_around(x, y) {
            0 => ' ',
            n => char::from_digit(n as u32, 10).unwrap_or('?'),
        },
        CellState::Flagged | CellState::FlaggedUnsure if over && !c.is_mine() => 'x',
        CellState::Flagged => 'F',
        CellState::FlaggedUnsure => '?',
        CellState::Hidden if over && c.is_mine() => '*',
        CellState::Hidden => '.',
    }
}

/// Text board with a column header and row labels.
pub fn render(field: &Minefield, one_based: bool) -> String {
    let mut s = String::new();
    s.push_str("    ");
    for x in 0..field.width() {
        let label = if one_based { x + 1 } else { x };
        let _ = write!(s, "{:>2} ", label);
    }
    s.push('\n');
    s.push_str("   ");
    s.push_str(&"-".repeat(field.width() * 3 + 1));
    s.push('\n');

    for y in 0..field.height() {
        let row_label = if one_based { y + 1 } else { y };
        let _ = write!(s, "{:>2} | ", row_label);
        for x in 0..field.width() {
            let _ = write!(s, "{}  ", glyph(field, x, y));
        }
        s.push('\n');
    }
    s
}
