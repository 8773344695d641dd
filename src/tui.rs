use std::io;
use std::time::Duration;

use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Terminal;

use crate::grid::CellState;
use crate::session::Session;
use crate::view::glyph;

pub fn run_tui(mut session: Session) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableMouseCapture)?;
    let _guard = TermGuard;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut cursor = (0usize, 0usize);
    // redraw at least this often so the clock keeps ticking
    let tick_rate = Duration::from_millis(250);

    let mut last_inner_board = Rect::default();
    let res = loop {
        terminal.draw(|f| { last_inner_board = ui(f, &session, cursor); })?;

        if !event::poll(tick_rate)? { continue; }
        let (width, height) = (session.field().width(), session.field().height());
        // engine errors here are moves on a finished game or a revealed cell: ignored
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break Ok(()),
                KeyCode::Char('h') | KeyCode::Left => {
                    if cursor.0 > 0 { cursor.0 -= 1; }
                }
                KeyCode::Char('l') | KeyCode::Right => {
                    if cursor.0 + 1 < width { cursor.0 += 1; }
                }
                KeyCode::Char('k') | KeyCode::Up => {
                    if cursor.1 > 0 { cursor.1 -= 1; }
                }
                KeyCode::Char('j') | KeyCode::Down => {
                    if cursor.1 + 1 < height { cursor.1 += 1; }
                }
                KeyCode::Char('f') => { let _ = session.cycle_flag(cursor.0, cursor.1); }
                KeyCode::Char('u') => { let _ = session.toggle_mark(cursor.0, cursor.1, CellState::FlaggedUnsure); }
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Char('r') => {
                    let _ = session.open(cursor.0, cursor.1);
                }
                KeyCode::Char('n') => {
                    if session.restart().is_ok() { cursor = (0, 0); }
                }
                _ => {}
            },
            Event::Mouse(m) => {
                if let MouseEventKind::Down(btn) = m.kind {
                    if let Some((cx, cy)) = pos_to_cell(m.column, m.row, last_inner_board, width as u16, height as u16) {
                        let (cx, cy) = (cx as usize, cy as usize);
                        cursor = (cx, cy);
                        match btn {
                            // opening a revealed cell chords
                            MouseButton::Left | MouseButton::Middle => { let _ = session.open(cx, cy); }
                            MouseButton::Right => { let _ = session.cycle_flag(cx, cy); }
                        }
                    }
                }
            }
            _ => {}
        }
    };

    terminal.show_cursor()?;
    res
}

fn ui(f: &mut ratatui::Frame, session: &Session, cursor: (usize, usize)) -> Rect {
    let field = session.field();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
        ])
        .split(f.size());

    let status = if field.is_over() && !field.won() {
        "Boom! You hit a mine. q to quit, n to restart".to_string()
    } else if field.won() {
        format!("Cleared in {}! q to quit, n to restart", session.clock())
    } else {
        format!("Mines left: {}  Time: {}  |  Enter open/chord, f flag, u unsure, n new, q quit", field.remaining_mines(), session.clock())
    };
    let header = Paragraph::new(status)
        .style(Style::default().fg(Color::Cyan))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Demineur"));
    f.render_widget(header, root[0]);

    let area = centered_grid_area(root[1], field.width() as u16, field.height() as u16);
    let inner = inner_area(area);
    draw_board(f, session, area, cursor);

    let best = match session.scores().latest() {
        Some(score) => format!("  Last win: {}", score),
        None => String::new(),
    };
    let footer = Paragraph::new(format!("Size: {}x{}  Mines: {}{}", field.width(), field.height(), field.mine_count(), best))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(footer, root[2]);
    inner
}

fn centered_grid_area(parent: Rect, cols: u16, rows: u16) -> Rect {
    // one char + one space per cell, plus the border
    let grid_w = cols * 2 + 2;
    let grid_h = rows + 2;
    let x = parent.x.saturating_add((parent.width.saturating_sub(grid_w)) / 2);
    let y = parent.y.saturating_add((parent.height.saturating_sub(grid_h)) / 2);
    Rect { x, y, width: grid_w.min(parent.width), height: grid_h.min(parent.height) }
}

fn draw_board(f: &mut ratatui::Frame, session: &Session, area: Rect, cursor: (usize, usize)) {
    let field = session.field();
    let mut lines: Vec<Line> = Vec::with_capacity(field.height());
    for y in 0..field.height() {
        let mut spans: Vec<Span> = Vec::with_capacity(field.width());
        for x in 0..field.width() {
            let mut ch = glyph(field, x, y);
            let mut style = match ch {
                '*' | 'X' | 'x' => Style::default().fg(Color::Red),
                'F' | '?' => Style::default().fg(Color::Yellow),
                '.' => Style::default().fg(Color::DarkGray),
                _ => number_style(field.grid().mines_around(x, y)),
            };
            if ch == '.' { ch = '·'; }

            if cursor == (x, y) {
                style = style.add_modifier(Modifier::REVERSED);
                if ch == ' ' { ch = '·'; }
            }

            spans.push(Span::styled(format!("{} ", ch), style));
        }
        lines.push(Line::from(spans));
    }

    let board_block = Block::default().borders(Borders::ALL).title("Board");
    let para = Paragraph::new(lines).block(board_block);
    f.render_widget(para, area);
}

fn number_style(n: u8) -> Style {
    match n {
        0 => Style::default().fg(Color::Gray),
        1 => Style::default().fg(Color::Blue),
        2 => Style::default().fg(Color::Green),
        3 => Style::default().fg(Color::Red),
        4 => Style::default().fg(Color::Magenta),
        5 => Style::default().fg(Color::Yellow),
        6 => Style::default().fg(Color::Cyan),
        _ => Style::default().fg(Color::White),
    }
}

fn inner_area(area: Rect) -> Rect {
    Rect { x: area.x.saturating_add(1), y: area.y.saturating_add(1), width: area.width.saturating_sub(2), height: area.height.saturating_sub(2) }
}

fn pos_to_cell(mx: u16, my: u16, inner: Rect, cols: u16, rows: u16) -> Option<(u16, u16)> {
    if mx < inner.x || my < inner.y { return None; }
    let cx = (mx - inner.x) / 2;
    let cy = my - inner.y;
    if cx < cols && cy < rows { Some((cx, cy)) } else { None }
}

struct TermGuard;
impl Drop for TermGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
    }
}
