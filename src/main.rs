mod api;
mod app;
mod controller;
mod data;
mod error;
mod session;
mod settings;
mod ui;

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "alum-board",
    about = "Browse and apply to alumni projects from the terminal"
)]
struct Cli {
    /// Project id to open
    project_id: u64,

    /// Base URL of the platform API
    #[arg(long)]
    api_url: Option<String>,

    /// Session file with token and user (defaults to ~/.config/alum-board/session.json)
    #[arg(short, long)]
    session: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Where to write logs
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = settings::Settings::load();

    // Merge: CLI args override config, config overrides defaults.
    let api_url = cli
        .api_url
        .or(cfg.api_url)
        .unwrap_or_else(|| settings::DEFAULT_API_URL.to_string());
    let timeout = cli
        .timeout
        .or(cfg.timeout_secs)
        .unwrap_or(settings::DEFAULT_TIMEOUT_SECS);
    let session_path = cli
        .session
        .or_else(|| cfg.session_file.map(PathBuf::from))
        .or_else(settings::default_session_path);
    let log_path = cli
        .log_file
        .or_else(|| cfg.log_file.map(PathBuf::from))
        .unwrap_or_else(settings::default_log_path);

    init_logging(&log_path)?;

    let client = api::HttpClient::builder()
        .base_url(api_url)
        .timeout_secs(timeout)
        .build()?;
    tracing::info!(base_url = client.base_url(), project_id = cli.project_id, "starting");
    let viewer = session::Viewer::load(session_path.as_deref());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let _guard = runtime.enter();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let controller = controller::DetailController::new(Arc::new(client), viewer);
    let mut app = App::new(controller, cli.project_id);

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("alum_board=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.tick();
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Poll for events with short timeout so network results show up promptly
        let timeout = Duration::from_millis(100);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if app.controller.alert().is_some() {
                    // Blocking alert: any key dismisses
                    app.controller.dismiss_alert();
                } else if app.show_help {
                    app.show_help = false;
                } else if app.apply_popup.is_some() {
                    app.apply_popup_handle_key(key);
                } else if app.profile_popup.is_some() {
                    app.close_profile_popup();
                } else {
                    match (key.modifiers, key.code) {
                        // Quit
                        (_, KeyCode::Char('q')) | (_, KeyCode::F(10)) => app.should_quit = true,
                        (KeyModifiers::CONTROL, KeyCode::Char('c')) => app.should_quit = true,

                        (_, KeyCode::F(1)) | (_, KeyCode::Char('?')) => app.show_help = true,

                        // Refresh
                        (_, KeyCode::F(5)) | (_, KeyCode::Char('r')) => app.reload(),

                        // Back to the previous project
                        (_, KeyCode::Backspace) | (_, KeyCode::Esc) => app.go_back(),

                        // Item navigation
                        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => app.prev_item(),
                        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => app.next_item(),
                        (_, KeyCode::Tab) => app.toggle_focus(),
                        (_, KeyCode::Enter) => app.activate(),

                        // Gallery
                        (_, KeyCode::Left) => app.carousel_prev(),
                        (_, KeyCode::Right) => app.carousel_next(),
                        (_, KeyCode::Char(c @ '1'..='9')) => {
                            let index = c as usize - '1' as usize;
                            app.carousel_select(index);
                        }

                        (_, KeyCode::Char('a')) => app.open_apply_popup(),
                        (_, KeyCode::Char('f')) => app.toggle_show_filled(),
                        (_, KeyCode::Char('c')) => app.open_creator_profile(),
                        (_, KeyCode::Char('p')) => app.open_candidate_profile(),

                        // Detail scroll
                        (_, KeyCode::PageDown) => app.scroll_detail_down(),
                        (_, KeyCode::PageUp) => app.scroll_detail_up(),

                        _ => {}
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
