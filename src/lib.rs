pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod logging;
pub mod report;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::io::{self, Stdout};

use anyhow::{Result, bail};
use app::events::{AppEvent, spawn_input_task};
use app::state::{AppMode, AppState, location_zone};
use chrono::{Local, Utc};
use cli::Cli;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use data::{OpenWeatherClient, fetch_bundle};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;
use tracing::info;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(cli: Cli) -> Result<()> {
    if cli.one_shot {
        return run_one_shot(&cli).await;
    }

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &cli).await;
    restore_terminal(&mut terminal)?;
    result
}

/// Drives the viewer until the user quits or both event sources close.
async fn event_loop(terminal: &mut Tui, cli: &Cli) -> Result<()> {
    let (tx, mut rx) = mpsc::channel::<AppEvent>(256);
    let input = spawn_input_task();
    tokio::pin!(input);
    let mut app = AppState::new(cli);

    tx.send(AppEvent::Bootstrap).await?;

    loop {
        let event = tokio::select! {
            Some(key) = input.next() => AppEvent::Input(key),
            Some(event) = rx.recv() => event,
            else => break,
        };
        app.handle_event(event, &tx, cli).await?;
        terminal.draw(|frame| ui::render(frame, &app))?;
        if app.mode == AppMode::Quit {
            break;
        }
    }

    info!("exiting");
    Ok(())
}

/// Fetches once and prints a text report to stdout.
async fn run_one_shot(cli: &Cli) -> Result<()> {
    cli.validate()?;
    let client = OpenWeatherClient::new(cli.api_config()?)?;
    let target = cli.initial_target();
    let bundle = fetch_bundle(&client, target.clone()).await;
    if bundle.is_empty() {
        bail!("no weather data for {target}");
    }

    let units = cli.units.into();
    let icons = cli.icon_mode();
    let now = Utc::now();
    let report = if cli.location_time {
        report::render_report(&bundle, &location_zone(&bundle), units, icons, now)
    } else {
        report::render_report(&bundle, &Local, units, icons, now)
    };
    println!("{report}");
    Ok(())
}

fn setup_terminal() -> Result<Tui> {
    install_panic_hook();
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn install_panic_hook() {
    let existing = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        existing(panic);
    }));
}
