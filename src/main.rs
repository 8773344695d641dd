use std::io::{self, Write};
use std::process::ExitCode;

use clap::{ArgAction, Parser};
use demineur::view::render;
use demineur::{tui, CellState, GameConfig, RevealResult, RngSource, Session};
use tracing::Level;

#[derive(Parser, Debug)]
#[command(name = "demineur", about = "Terminal mine-clearing puzzle", version)]
struct Args {
    /// Launch TUI mode
    #[arg(long)]
    tui: bool,
    /// Board width
    #[arg(long, default_value_t = 8)]
    width: usize,
    /// Board height
    #[arg(long, default_value_t = 8)]
    height: usize,
    /// Number of mines
    #[arg(long, default_value_t = 8)]
    mines: usize,
    /// Seed (0 = random)
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Log more (-v info, -vv debug, -vvv trace); line mode only
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn config(&self) -> GameConfig { GameConfig::new(self.width, self.height, self.mines) }

    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            2 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}

fn print_help() {
    println!("Commands:");
    println!("  r x y   - open cell at column x, row y (1-based); on an open cell, open around it");
    println!("  f x y   - flag / unflag x, y");
    println!("  u x y   - mark / unmark x, y as unsure");
    println!("  c x y   - cycle hidden -> flag -> unsure -> hidden");
    println!("  n       - new game");
    println!("  s       - show scores");
    println!("  q       - quit");
    println!("  h/help  - show this help");
}

fn parse_cell(parts: &[&str]) -> Result<(usize, usize), &'static str> {
    if parts.len() < 3 { return Err("Usage: <cmd> x y"); }
    let x = parts[1].parse::<usize>().map_err(|_| "Invalid x")?;
    let y = parts[2].parse::<usize>().map_err(|_| "Invalid y")?;
    if x == 0 || y == 0 { return Err("Use 1-based coordinates"); }
    Ok((x - 1, y - 1))
}

fn main() -> ExitCode {
    let args = Args::parse();
    if !args.tui {
        tracing_subscriber::fmt().with_writer(io::stderr).with_max_level(args.log_level()).init();
    }

    let mut session = match Session::new(args.config(), RngSource::from_seed(args.seed)) {
        Ok(s) => s,
        Err(e) => { eprintln!("{}", e); return ExitCode::FAILURE; }
    };

    if args.tui {
        if let Err(e) = tui::run_tui(session) {
            eprintln!("TUI error: {}", e);
            return ExitCode::FAILURE;
        }
        return ExitCode::SUCCESS;
    }

    println!("Demineur {}x{} with {} mines{}", args.width, args.height, args.mines, if args.seed != 0 { format!(" (seed {})", args.seed) } else { String::new() });
    println!("Coordinates are 1-based. Type 'h' for help.");
    print_help();

    let mut input = String::new();
    let mut announced = false;
    loop {
        let field = session.field();
        println!("\n{}", render(field, true));
        if field.is_over() && !announced {
            announced = true;
            if field.won() {
                println!("Congratulations! You cleared the board in {}.", session.clock());
            } else {
                println!("Boom! You hit a mine. Game over.");
            }
            println!("Type 'n' for a new game or 'q' to quit.");
        } else if !field.is_over() {
            println!("Mines left: {}  Time: {}", field.remaining_mines(), session.clock());
        }

        print!("> ");
        let _ = io::stdout().flush();
        input.clear();
        match io::stdin().read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let line = input.trim();
        if line.is_empty() { continue; }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let outcome = match parts[0].to_lowercase().as_str() {
            "q" | "quit" | "exit" => break,
            "h" | "help" => { print_help(); continue; }
            "n" | "new" => {
                announced = false;
                session.restart()
            }
            "s" | "scores" => {
                if session.scores().is_empty() { println!("No wins yet."); }
                for (i, score) in session.scores().scores().iter().enumerate() {
                    println!("{:>3}. {}", i + 1, score);
                }
                continue;
            }
            cmd @ ("r" | "reveal" | "f" | "flag" | "u" | "unsure" | "c" | "cycle") => {
                let cell = match parse_cell(&parts) {
                    Ok(c) => c,
                    Err(msg) => { println!("{}", msg); continue; }
                };
                match cmd {
                    "r" | "reveal" => session.open(cell.0, cell.1).map(|res| {
                        if res == RevealResult::NoOp { println!("Nothing to open there."); }
                    }),
                    "f" | "flag" => session.toggle_mark(cell.0, cell.1, CellState::Flagged),
                    "u" | "unsure" => session.toggle_mark(cell.0, cell.1, CellState::FlaggedUnsure),
                    _ => session.cycle_flag(cell.0, cell.1).map(|_| ()),
                }
            }
            other => {
                println!("Unknown command '{}'. Type 'h' for help.", other);
                continue;
            }
        };
        if let Err(e) = outcome { println!("{}", e); }
    }
    ExitCode::SUCCESS
}
