use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use markdown_liveview_config::Config;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
    time::Duration,
};

mod app;
mod layout;
mod pane;
mod ui;

use app::App;

/// Log file path; overrides `log_file` from the config file.
const LOG_ENV: &str = "LIVEVIEW_LOG";
const POLL_INTERVAL: Duration = Duration::from_millis(16);
const WHEEL_ROWS: i64 = 3;

fn init_logging(config: &Config) -> Result<()> {
    let Some(path) = env::var_os(LOG_ENV)
        .map(PathBuf::from)
        .or_else(|| config.log_file.clone())
    else {
        // The alternate screen owns stdout and stderr.
        return Ok(());
    };

    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() != 2 {
        eprintln!("Usage: {} <markdown-file>", args[0]);
        process::exit(1);
    }
    let path = PathBuf::from(&args[1]);

    let mut config = match Config::load_or_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Fix or remove {}", Config::config_path().display());
            process::exit(1);
        }
    };

    init_logging(&config)?;
    log::info!("markdown-liveview starting up");

    // Open before touching the terminal so errors print normally
    let mut app = App::open(path, &config.sync)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app, &mut config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("{err:?}");
        println!("{err:?}");
    }

    Ok(())
}

/// Writes the session's sync toggle and line offset back to the config file.
fn save_settings(app: &mut App, config: &mut Config) {
    config.sync = app.sync_settings(&config.sync);
    match config.save() {
        Ok(()) => app.set_status(format!("saved {}", Config::config_path().display())),
        Err(e) => {
            log::warn!("saving config failed: {e:#}");
            app.set_status(format!("save failed: {e}"));
        }
    }
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    config: &mut Config,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;
        app.tick();

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Tab => app.toggle_focus(),
                KeyCode::Down | KeyCode::Char('j') => app.scroll_focused(1),
                KeyCode::Up | KeyCode::Char('k') => app.scroll_focused(-1),
                KeyCode::PageDown | KeyCode::Char(' ') => app.page_focused(1),
                KeyCode::PageUp => app.page_focused(-1),
                KeyCode::Home => app.jump_focused(false),
                KeyCode::End => app.jump_focused(true),
                KeyCode::Char('s') => app.toggle_sync(),
                KeyCode::Char('+') | KeyCode::Char('=') => app.adjust_line_offset(1),
                KeyCode::Char('-') => app.adjust_line_offset(-1),
                KeyCode::Char('w') => save_settings(app, config),
                KeyCode::Char('r') => {
                    if let Err(e) = app.reload() {
                        log::warn!("reload failed: {e:#}");
                        app.set_status(format!("reload failed: {e}"));
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                let role = app.role_at(mouse.column);
                match mouse.kind {
                    MouseEventKind::ScrollDown => app.scroll(role, WHEEL_ROWS),
                    MouseEventKind::ScrollUp => app.scroll(role, -WHEEL_ROWS),
                    _ => {}
                }
            }
            _ => {}
        }
    }
}
