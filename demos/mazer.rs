//! Terminal maze generator and solver.
//!
//! Run: cargo run --bin mazer -- --strategy all --animate

use std::error::Error;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use crossterm::{cursor, execute, queue, terminal};
use log::{info, warn};
use mazer_core::Grid;
use mazer_demos::{HiddenCursor, Playback, outcome_line, paint, tally_line};
use mazer_gen::{GenConfig, InitialFill, MazeGen};
use mazer_paths::{SearchResult, StopFlag, Strategy, connected, solve_with};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StrategyArg {
    Bfs,
    Dfs,
    Astar,
    All,
}

impl StrategyArg {
    fn strategies(self) -> Vec<Strategy> {
        match self {
            StrategyArg::Bfs => vec![Strategy::Bfs],
            StrategyArg::Dfs => vec![Strategy::Dfs],
            StrategyArg::Astar => vec![Strategy::AStar],
            StrategyArg::All => Strategy::ALL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "mazer")]
#[command(about = "Generate a random grid maze and solve it with BFS, DFS or A*")]
#[command(version)]
struct Args {
    /// Number of rows
    #[arg(long, default_value_t = 20)]
    rows: i32,

    /// Number of columns
    #[arg(long, default_value_t = 20)]
    cols: i32,

    /// Chance for each cell to become a wall after carving
    #[arg(long, default_value_t = 0.3)]
    density: f64,

    /// Random seed for maze generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// Search strategy
    #[arg(long, value_enum, default_value_t = StrategyArg::Bfs)]
    strategy: StrategyArg,

    /// Start from a fully walled grid so carving lays out corridors
    #[arg(long)]
    walled: bool,

    /// Regenerate up to this many times until the maze is solvable
    #[arg(long, default_value_t = 0)]
    retries: u32,

    /// Replay the search cell by cell
    #[arg(long)]
    animate: bool,

    /// Delay between animation ticks
    #[arg(long, default_value_t = 30)]
    delay_ms: u64,

    /// Abandon a search that runs longer than this
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print plain text without colours
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::Builder::from_env(
        env_logger::Env::new()
            .filter_or("MAZER_LOG", "warn")
            .write_style("MAZER_LOG_STYLE"),
    )
    .init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let seed = args.seed.unwrap_or_else(rand::random);
    let fill = if args.walled {
        InitialFill::Walls
    } else {
        InitialFill::Open
    };
    let config = GenConfig::new(args.rows, args.cols)
        .with_density(args.density)
        .with_fill(fill);

    let grid = generate(&config, seed, args.retries)?;
    println!("seed {seed}");

    let strategies = args.strategy.strategies();
    let color = !args.no_color;
    let mut found = 0;
    for &strategy in &strategies {
        let result = search(&grid, strategy, args.timeout_ms)?;
        if args.animate {
            let delay = Duration::from_millis(args.delay_ms);
            animate(&grid, &result, strategy, delay, color)?;
        } else {
            show(&grid, &result, strategy, color)?;
        }
        println!("{}", outcome_line(strategy, &result));
        if result.is_found() {
            found += 1;
        }
    }
    if strategies.len() > 1 {
        println!("{}", tally_line(found, strategies.len()));
    }
    Ok(())
}

/// Generate a maze, retrying with the following seeds while it has no route
/// from start to end.
fn generate(config: &GenConfig, seed: u64, retries: u32) -> Result<Grid, Box<dyn Error>> {
    let mut attempt = 0;
    loop {
        let s = seed.wrapping_add(u64::from(attempt));
        let grid = MazeGen::generate(config, StdRng::seed_from_u64(s))?;
        if connected(&grid, grid.start(), grid.end()) {
            info!("attempt {attempt}: solvable maze from seed {s}");
            return Ok(grid);
        }
        if attempt >= retries {
            if retries > 0 {
                warn!("no solvable maze after {} attempts", attempt + 1);
            }
            return Ok(grid);
        }
        attempt += 1;
    }
}

fn search(grid: &Grid, strategy: Strategy, timeout_ms: Option<u64>) -> Result<SearchResult, Box<dyn Error>> {
    let stop = StopFlag::new();
    if let Some(ms) = timeout_ms {
        let stop = stop.clone();
        thread::spawn(move || {
            thread::sleep(Duration::from_millis(ms));
            stop.stop();
        });
    }
    let result = solve_with(grid, grid.start(), grid.end(), strategy, &stop)?;
    Ok(result)
}

fn show(grid: &Grid, result: &SearchResult, strategy: Strategy, color: bool) -> io::Result<()> {
    let frame = Playback::new(grid.bounds(), result).finish().clone();
    let mut out = io::stdout();
    paint(&mut out, grid, &frame, strategy, color)?;
    out.flush()
}

fn animate(
    grid: &Grid,
    result: &SearchResult,
    strategy: Strategy,
    delay: Duration,
    color: bool,
) -> io::Result<()> {
    let mut hidden = HiddenCursor::new(io::stdout())?;
    let out = hidden.out();
    execute!(out, terminal::Clear(terminal::ClearType::All))?;

    let mut playback = Playback::new(grid.bounds(), result);
    while let Some(frame) = playback.step() {
        queue!(out, cursor::MoveTo(0, 0))?;
        paint(out, grid, frame, strategy, color)?;
        out.flush()?;
        thread::sleep(delay);
    }
    Ok(())
}
