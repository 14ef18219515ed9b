mod adapters;
mod input;
mod runner;
mod ui;

use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use chartwalk_core::config::Config;
use chartwalk_core::reducer::{Effect, Msg, initial_fetch, reduce};
use chartwalk_core::state::Session;

use adapters::HelmCli;
use runner::FetchRunner;
use ui::Theme;

#[derive(Parser)]
#[command(name = "chartwalk", version)]
#[command(
    about = "Browse helm repositories, charts and versions, and save a chart's default values",
    long_about = None
)]
struct Cli {}

#[tokio::main]
async fn main() {
    let _cli = Cli::parse();

    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let (config_path, config) = Config::discover(&cwd)?;
    init_logging(&config.log_level)?;
    if let Some(path) = &config_path {
        info!(path = %path.display(), "loaded config");
    }

    // Checked before the terminal is touched so the message stays readable.
    let program = find_tool(&config.binary)?;
    info!(program = %program.display(), "using external tool");

    let (msg_tx, msg_rx) = mpsc::unbounded_channel::<Msg>();
    let runner = FetchRunner::new(Arc::new(HelmCli::new(program)), msg_tx);
    let theme = Theme::from_name(config.theme);
    let tick = Duration::from_millis(config.tick_ms);

    let mut terminal = setup_terminal().context("failed to initialise terminal")?;
    let res = event_loop(&mut terminal, &runner, msg_rx, &theme, tick).await;
    restore_terminal(terminal).context("failed to restore terminal")?;
    res
}

fn find_tool(binary: &str) -> Result<PathBuf> {
    which::which(binary).map_err(|_| {
        anyhow!(
            "{} command not found. Please install Helm first.",
            binary
        )
    })
}

fn init_logging(default_level: &str) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // The TUI owns stdout and stderr, so logs only go to an explicit file.
    match std::env::var_os("CHARTWALK_LOG_FILE") {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("cannot open log file {}", PathBuf::from(&path).display()))?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::sink)
                .try_init();
        }
    }
    Ok(())
}

// --- Terminal setup/teardown ---
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Leave the alternate screen on panic so the message is visible.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Applies one message; returns true when the session asked to quit.
fn apply(session: &mut Session, runner: &FetchRunner, msg: Msg) -> bool {
    match reduce(session, msg) {
        Effect::None => false,
        Effect::Fetch(request) => {
            runner.dispatch(request);
            false
        }
        Effect::Quit => true,
    }
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    runner: &FetchRunner,
    mut msg_rx: mpsc::UnboundedReceiver<Msg>,
    theme: &Theme,
    tick: Duration,
) -> Result<()> {
    let mut session = Session::new();
    let mut frame_tick = 0usize;
    runner.dispatch(initial_fetch());

    loop {
        // Fetch results are applied one at a time, in arrival order.
        while let Ok(msg) = msg_rx.try_recv() {
            if apply(&mut session, runner, msg) {
                return Ok(());
            }
        }

        terminal.draw(|f| ui::render::draw(f, &session, frame_tick, theme))?;
        frame_tick = frame_tick.wrapping_add(1);

        if !event::poll(tick)? {
            continue;
        }

        let CEvent::Key(key_event) = event::read()? else {
            continue;
        };
        if let Some(key) = input::key_from_event(key_event) {
            if apply(&mut session, runner, Msg::KeyPressed(key)) {
                info!("quit requested");
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_tool_is_reported() {
        let err = find_tool("chartwalk-no-such-tool").unwrap_err();
        assert_eq!(
            err.to_string(),
            "chartwalk-no-such-tool command not found. Please install Helm first."
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_tool_path_is_found() {
        assert!(find_tool("/bin/sh").is_ok());
    }
}
