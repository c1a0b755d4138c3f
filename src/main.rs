mod ai;
mod config;
mod game;
mod game_modes;
mod logging;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::{backend::CrosstermBackend, Terminal};

use config::Config;
use game::{FrameDriver, KeyTracker, MatchSession, Matchup, SystemClock};
use ui::{Palette, TerminalRenderer};

/// Command line options
#[derive(Debug, Default, PartialEq)]
struct Args {
    debug: bool,
    config_path: Option<PathBuf>,
    help: bool,
}

fn parse_args<I: IntoIterator<Item = String>>(args: I) -> anyhow::Result<Args> {
    let mut parsed = Args::default();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--debug" | "-d" => parsed.debug = true,
            "--config" | "-c" => {
                let path = iter.next().context("--config requires a path")?;
                parsed.config_path = Some(PathBuf::from(path));
            }
            "--help" | "-h" => parsed.help = true,
            other => anyhow::bail!("Unknown argument: {}", other),
        }
    }

    Ok(parsed)
}

fn print_usage(program: &str) {
    println!("Penguinfut - penguin soccer in your terminal");
    println!();
    println!("Usage:");
    println!("  {} [--debug] [--config <path>]", program);
    println!();
    println!("Options:");
    println!("  -d, --debug           Write a debug log to {}", logging::log_file_path().display());
    println!("  -c, --config <path>   Use this config file instead of the default");
    println!("  -h, --help            Show this help");
    println!();
    println!(
        "Default config: {}",
        config::loader::get_config_path().display()
    );
}

fn main() -> anyhow::Result<()> {
    let mut argv = std::env::args();
    let program = argv.next().unwrap_or_else(|| "penguinfut".to_string());

    let args = match parse_args(argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage(&program);
            std::process::exit(2);
        }
    };
    if args.help {
        print_usage(&program);
        return Ok(());
    }

    logging::init(args.debug)?;

    let config = config::load_config(args.config_path.as_deref())?;
    let matchup = Matchup::pick(
        config.teams.player_team,
        config.teams.opponent_team,
        &mut rand::thread_rng(),
    );
    tracing::info!("{} vs {}", matchup.player.name, matchup.opponent.name);

    let enhanced = match setup_terminal() {
        Ok(enhanced) => enhanced,
        Err(e) => {
            restore_terminal(false);
            return Err(e);
        }
    };

    let result = Terminal::new(CrosstermBackend::new(io::stdout()))
        .context("creating terminal")
        .and_then(|mut terminal| {
            let outcome = run(&mut terminal, &config, matchup);
            let _ = terminal.show_cursor();
            outcome
        });

    restore_terminal(enhanced);

    if let Err(ref e) = result {
        tracing::error!("Exiting with error: {:#}", e);
    }
    result
}

/// Raw mode, alternate screen and, where the terminal supports it, key
/// release reporting. Returns whether release reporting was turned on.
fn setup_terminal() -> anyhow::Result<bool> {
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;

    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
        )
        .context("enabling key release events")?;
    }
    tracing::debug!("Keyboard enhancement: {}", enhanced);
    Ok(enhanced)
}

/// Best effort: every step runs even if an earlier one fails
fn restore_terminal(enhanced: bool) {
    let mut stdout = io::stdout();
    if enhanced {
        let _ = execute!(stdout, PopKeyboardEnhancementFlags);
    }
    let _ = execute!(stdout, LeaveAlternateScreen);
    let _ = disable_raw_mode();
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    matchup: Matchup,
) -> anyhow::Result<()> {
    let session = MatchSession::new(&config.physics, matchup);
    let mut driver = FrameDriver::new(SystemClock::new(), session, config.display.max_frame_dt);

    let mut keys = KeyTracker::new(
        &config.keybindings,
        Duration::from_millis(config.input.hold_timeout_ms),
    );
    let mut renderer = TerminalRenderer::new(
        terminal,
        Palette::from_config(&config.display),
        &config.keybindings.start,
        &config.keybindings.quit,
    );

    game_modes::run_match(
        &mut driver,
        &mut renderer,
        &mut keys,
        game_modes::frame_duration(config.display.target_fps),
    )
}
