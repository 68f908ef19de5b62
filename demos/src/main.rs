//! Batch runner: builds a preset grid, runs one or all searches on it to
//! completion, and prints the stats and final grid of each.
//!
//! Run: cargo run --bin gridwalk -- --preset maze --algorithm all

use std::io::{self, Write};

use clap::Parser;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use flexi_logger::Logger;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use gridwalk_session::{
    Algorithm, CellType, CellView, Overlay, Preset, SearchConfig, Session, Snapshot, StepResult,
};

#[derive(Parser, Debug)]
#[command(name = "gridwalk", version, about = "Step-driven grid search runner")]
struct Args {
    /// Algorithm to run (BFS, DFS, UCS, DLS, IDDFS, Bidirectional) or "all".
    #[arg(short, long, default_value = "all")]
    algorithm: String,

    /// Obstacle layout (simple, maze, spiral, random).
    #[arg(short, long, default_value = "maze")]
    preset: Preset,

    #[arg(long)]
    rows: Option<i32>,

    #[arg(long)]
    cols: Option<i32>,

    /// Depth limit for DLS.
    #[arg(short, long)]
    depth_limit: Option<usize>,

    /// Seed for the random preset. Drawn at random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Give up on a search after this many steps.
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: usize,

    /// Print stats only.
    #[arg(long)]
    no_grid: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let _logger = Logger::try_with_env_or_str("info")?
        .log_to_stderr()
        .start()?;

    let algorithms: Vec<Algorithm> = if args.algorithm.eq_ignore_ascii_case("all") {
        Algorithm::ALL.to_vec()
    } else {
        vec![args.algorithm.parse()?]
    };

    let defaults = SearchConfig::default();
    let config = SearchConfig {
        rows: args.rows.unwrap_or(defaults.rows),
        cols: args.cols.unwrap_or(defaults.cols),
        depth_limit: args.depth_limit.unwrap_or(defaults.depth_limit),
        ..defaults
    };

    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = StdRng::seed_from_u64(seed);
    log::debug!("preset seed {seed}");

    let mut base = Session::new(config)?;
    base.load_preset(args.preset, &mut rng)?;
    println!(
        "{} preset, {}x{} grid, seed {seed}",
        args.preset, config.rows, config.cols
    );

    for algorithm in algorithms {
        let mut session = base.clone();
        session.select_algorithm(algorithm)?;
        session.start_search()?;
        if session.run(args.max_ticks)? == StepResult::Continue {
            log::warn!("{algorithm} stopped after {} ticks", args.max_ticks);
        }

        println!("{}", session.stats());
        if !args.no_grid {
            print_snapshot(&session.snapshot())?;
            println!();
        }
    }

    Ok(())
}

fn color_of(view: &CellView) -> Color {
    match view.kind {
        CellType::Wall => Color::DarkGrey,
        CellType::Start => Color::Green,
        CellType::Target => Color::Red,
        CellType::Empty => match view.overlay {
            Overlay::None => Color::Reset,
            Overlay::Path => Color::Yellow,
            Overlay::Explored => Color::Blue,
            Overlay::Explored2 => Color::Magenta,
            Overlay::Frontier => Color::Cyan,
            Overlay::Frontier2 => Color::DarkMagenta,
        },
    }
}

fn print_snapshot(snapshot: &Snapshot) -> io::Result<()> {
    let mut out = io::stdout().lock();
    let width = snapshot.cols.max(1) as usize;
    for row in snapshot.cells.chunks(width) {
        for view in row {
            queue!(out, SetForegroundColor(color_of(view)), Print(view.glyph()))?;
        }
        queue!(out, ResetColor, Print('\n'))?;
    }
    out.flush()
}
