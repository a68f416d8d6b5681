mod input;
mod ui;

use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use flappy::build_info;
use flappy::constants::FRAME_INTERVAL_MS;
use flappy::flappy::tick;
use flappy::{AssetBundle, World};
use input::{handle_game_input, InputResult};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
struct Config {
    seed: Option<u64>,
    assets_dir: Option<PathBuf>,
    log_path: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Config, String> {
    let mut config = Config::default();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let value = args.get(i).ok_or("--seed requires a number")?;
                config.seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("--seed requires a number, got '{value}'"))?,
                );
            }
            "--assets" => {
                i += 1;
                let dir = args.get(i).ok_or("--assets requires a directory")?;
                config.assets_dir = Some(PathBuf::from(dir));
            }
            "--log" => {
                i += 1;
                let path = args.get(i).ok_or("--log requires a file path")?;
                config.log_path = Some(PathBuf::from(path));
            }
            "--version" | "-v" => {
                println!("{}", build_info::version_line());
                std::process::exit(0);
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            other => return Err(format!("Unknown argument: {other}")),
        }
        i += 1;
    }
    Ok(config)
}

fn print_usage() {
    println!("Flappy - Flappy Bird in the terminal\n");
    println!("Usage: flappy [options]\n");
    println!("Options:");
    println!("  --seed N       Fixed seed for the pipe layout");
    println!("  --assets DIR   Load sprite art from DIR instead of the built-in set");
    println!("  --log FILE     Write log output to FILE (level from RUST_LOG, default info)");
    println!("  --version      Show version information");
    println!("  --help         Show this help message");
    println!("\nControls: Space/Up/Enter to flap, Esc or q to quit.");
}

/// Logs go to a file only: stderr is the game screen.
fn init_logging(config: &Config) -> io::Result<()> {
    let Some(path) = &config.log_path else {
        return Ok(());
    };
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let config = match parse_args(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Run 'flappy --help' for usage.");
            std::process::exit(1);
        }
    };

    init_logging(&config)?;

    // Asset problems are reported before the terminal is taken over.
    let assets = match &config.assets_dir {
        Some(dir) => AssetBundle::load_dir(dir),
        None => AssetBundle::builtin(),
    };
    let assets = match assets {
        Ok(assets) => assets,
        Err(e) => {
            eprintln!("Error: could not load sprites: {e}");
            std::process::exit(1);
        }
    };

    let rng = match config.seed {
        Some(seed) => {
            log::info!("using seed {seed}");
            ChaCha8Rng::seed_from_u64(seed)
        }
        None => ChaCha8Rng::from_entropy(),
    };
    let mut world = World::new(assets, rng);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_game(&mut terminal, &mut world);

    // Cleanup terminal
    disable_raw_mode()?;
    terminal.backend_mut().execute(LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    println!(
        "Best score: {} over {} run(s)",
        world.best_score.max(world.score),
        world.runs
    );
    Ok(())
}

/// One tick per frame at a fixed rate. Keys read while waiting for the next
/// frame are applied before that frame's tick.
fn run_game<B: Backend>(
    terminal: &mut Terminal<B>,
    world: &mut World<ChaCha8Rng>,
) -> io::Result<()> {
    let frame_interval = Duration::from_millis(FRAME_INTERVAL_MS);
    let mut next_frame = Instant::now() + frame_interval;

    loop {
        terminal.draw(|frame| ui::draw_ui(frame, &*world))?;

        // Poll for input until the frame is due
        loop {
            let timeout = next_frame.saturating_duration_since(Instant::now());
            if !event::poll(timeout)? {
                break;
            }
            if let Event::Key(key_event) = event::read()? {
                if handle_game_input(key_event, world) == InputResult::Quit {
                    log::info!("quit at score {}", world.score);
                    return Ok(());
                }
            }
        }

        tick(world);

        next_frame += frame_interval;
        // Don't try to catch up after a stall (e.g. a suspended terminal).
        let now = Instant::now();
        if next_frame < now {
            next_frame = now + frame_interval;
        }
    }
}
