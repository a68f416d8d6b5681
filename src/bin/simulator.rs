//! Flappy Headless Simulator
//!
//! Plays runs without any UI, driven by a pilot, and reports scores and how
//! each run ended. Uses the exact same `tick()` function as the real game.
//!
//! Usage:
//!   cargo run --bin simulator -- [OPTIONS]
//!
//! Options:
//!   --runs N        Number of runs with incrementing seeds (default: 10)
//!   --seed N        RNG seed of the first run (default: 42)
//!   --max-ticks N   Tick limit per run (default: 18000 = 10 minutes)
//!   --pilot NAME    none | heuristic (default: heuristic)
//!   --quiet         Only the final summary

use flappy::constants::FPS;
use flappy::flappy::{run_until_over, Autopilot};
use flappy::{AssetBundle, GameOverCause, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ── CLI Configuration ────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PilotKind {
    /// Never flaps; the bird hovers at its start height.
    None,
    Heuristic,
}

struct SimConfig {
    runs: u32,
    seed: u64,
    max_ticks: u64,
    pilot: PilotKind,
    quiet: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            runs: 10,
            seed: 42,
            max_ticks: 18_000,
            pilot: PilotKind::Heuristic,
            quiet: false,
        }
    }
}

fn parse_args() -> SimConfig {
    let args: Vec<String> = std::env::args().collect();
    let mut config = SimConfig::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--runs" => {
                i += 1;
                config.runs = number_arg(&args, i, "--runs");
            }
            "--seed" => {
                i += 1;
                config.seed = number_arg(&args, i, "--seed");
            }
            "--max-ticks" => {
                i += 1;
                config.max_ticks = number_arg(&args, i, "--max-ticks");
            }
            "--pilot" => {
                i += 1;
                config.pilot = match args.get(i).map(String::as_str) {
                    Some("none") => PilotKind::None,
                    Some("heuristic") => PilotKind::Heuristic,
                    _ => usage_error("--pilot must be 'none' or 'heuristic'"),
                };
            }
            "--quiet" => config.quiet = true,
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => usage_error(&format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    config
}

fn number_arg<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    match args.get(i).and_then(|v| v.parse().ok()) {
        Some(value) => value,
        None => usage_error(&format!("{flag} requires a number")),
    }
}

fn usage_error(message: &str) -> ! {
    eprintln!("{message}");
    print_usage();
    std::process::exit(1);
}

fn print_usage() {
    eprintln!(
        "Flappy Headless Simulator\n\
         \n\
         Usage: simulator [OPTIONS]\n\
         \n\
         Options:\n\
         \x20 --runs N        Number of runs with incrementing seeds (default: 10)\n\
         \x20 --seed N        RNG seed of the first run (default: 42)\n\
         \x20 --max-ticks N   Tick limit per run (default: 18000 = 10 minutes)\n\
         \x20 --pilot NAME    none | heuristic (default: heuristic)\n\
         \x20 --quiet         Only the final summary\n\
         \x20 --help, -h      Show this help"
    );
}

// ── Simulation ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
struct RunStats {
    seed: u64,
    score: u32,
    ticks: u64,
    /// `None` when the tick limit ended the run.
    cause: Option<GameOverCause>,
}

fn run_once(assets: &AssetBundle, config: &SimConfig, seed: u64) -> RunStats {
    let mut world = World::new(assets.clone(), ChaCha8Rng::seed_from_u64(seed));
    let autopilot = Autopilot::default();
    let ticks = match config.pilot {
        PilotKind::None => run_until_over(&mut world, config.max_ticks, |_| None),
        PilotKind::Heuristic => {
            run_until_over(&mut world, config.max_ticks, |w| autopilot.decide(w))
        }
    };
    RunStats {
        seed,
        score: world.score,
        ticks,
        cause: world.game_over_cause(),
    }
}

fn ticks_to_time(ticks: u64) -> String {
    let seconds = ticks / FPS;
    format!("{}m{:02}s", seconds / 60, seconds % 60)
}

fn cause_label(cause: Option<GameOverCause>) -> &'static str {
    match cause {
        Some(GameOverCause::Collision) => "pipe",
        Some(GameOverCause::OutOfBounds) => "bounds",
        None => "time limit",
    }
}

fn print_summary(all: &[RunStats]) {
    if all.is_empty() {
        return;
    }
    let total: u64 = all.iter().map(|r| r.score as u64).sum();
    let mean = total as f64 / all.len() as f64;
    let best = all.iter().max_by_key(|r| r.score).map_or(0, |r| r.score);
    let worst = all.iter().min_by_key(|r| r.score).map_or(0, |r| r.score);
    let count = |cause: Option<GameOverCause>| all.iter().filter(|r| r.cause == cause).count();

    println!("============================================================");
    println!("  Flappy Simulation Report  ({} runs)", all.len());
    println!("============================================================");
    println!();
    println!("{:<20} {:>10} {:>10} {:>10}", "Metric", "Min", "Avg", "Max");
    println!("{}", "-".repeat(52));
    println!("{:<20} {:>10} {:>10.1} {:>10}", "Score", worst, mean, best);
    let ticks_min = all.iter().map(|r| r.ticks).min().unwrap_or(0);
    let ticks_max = all.iter().map(|r| r.ticks).max().unwrap_or(0);
    let ticks_avg = all.iter().map(|r| r.ticks).sum::<u64>() as f64 / all.len() as f64;
    println!(
        "{:<20} {:>10} {:>10.0} {:>10}",
        "Ticks", ticks_min, ticks_avg, ticks_max
    );
    println!();
    println!("Run endings:");
    println!("  Hit a pipe:      {}", count(Some(GameOverCause::Collision)));
    println!("  Left the screen: {}", count(Some(GameOverCause::OutOfBounds)));
    println!("  Time limit:      {}", count(None));
}

// ── Main ─────────────────────────────────────────────────────────────

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let config = parse_args();

    let assets = match AssetBundle::builtin() {
        Ok(assets) => assets,
        Err(e) => {
            eprintln!("Error: could not load sprites: {e}");
            std::process::exit(1);
        }
    };

    if !config.quiet {
        eprintln!(
            "Flappy Simulator: {} run(s), seed={}, max {} ticks ({}), pilot={:?}",
            config.runs,
            config.seed,
            config.max_ticks,
            ticks_to_time(config.max_ticks),
            config.pilot,
        );
    }

    let mut all_stats = Vec::with_capacity(config.runs as usize);
    for run in 0..config.runs {
        let stats = run_once(&assets, &config, config.seed + run as u64);
        if !config.quiet {
            println!(
                "  Run {}: seed={} score={} ticks={} ({}) ended by {}",
                run + 1,
                stats.seed,
                stats.score,
                stats.ticks,
                ticks_to_time(stats.ticks),
                cause_label(stats.cause),
            );
        }
        all_stats.push(stats);
    }

    if !config.quiet {
        println!();
    }
    print_summary(&all_stats);
}
