use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    io,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::mpsc;
use tracing_subscriber::prelude::*;

use notefinder::config::{self, Config};
use notefinder::logic::keymap::KeyDispatcher;
use notefinder::model::{self, TabId, TrackAnimator};
use notefinder::repo::Repository;
use notefinder::services::{self, RepoRequest, RepoResponse};
use notefinder::session::{ListState, SessionDb};
use notefinder::store::{self, NoteStore};
use notefinder::utils;

mod app;
mod handlers;
mod ui;

/// Multi-tab column browser for notes and folders
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Enable debug logging to the temp dir (notefinder-debug.log)
    #[arg(short, long)]
    debug: bool,

    /// Path to config file (default: platform-specific, see docs)
    #[arg(short, long)]
    config: Option<String>,

    /// Path to the note database (overrides the config file)
    #[arg(long)]
    db: Option<PathBuf>,

    /// Populate an empty database with a demo tree
    #[arg(long)]
    seed: bool,

    /// Snap the column track instead of sliding it
    #[arg(long)]
    reduce_motion: bool,
}

/// Install the file logger. Without `--debug` nothing is installed and the
/// `tracing` macros are no-ops.
fn init_tracing(debug: bool) -> Result<()> {
    if !debug {
        return Ok(());
    }

    let log_path = utils::get_debug_log_path();
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("notefinder=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false), // No ANSI colors in file
        )
        .init();

    tracing::info!("Logging initialized to: {:?}", log_path);
    Ok(())
}

pub struct App {
    pub model: model::Model,

    repo_tx: mpsc::UnboundedSender<RepoRequest>,
    repo_rx: mpsc::UnboundedReceiver<RepoResponse>,
    slide_tx: mpsc::UnboundedSender<u64>,
    slide_rx: mpsc::UnboundedReceiver<u64>,
    keys: KeyDispatcher,

    session: Option<SessionDb>,
    app_name: String,
    open_command: Option<String>,
    preview_width_percent: u16,
    min_column_width: u16,

    /// Last preview request, so a settled focus is fetched once
    preview_requested: Option<(TabId, String)>,
    /// Last list state written to the session store
    last_saved: Option<ListState>,
    /// Column list scroll positions, held still while the track slides
    list_offsets: ui::columns::ListOffsets,
}

impl App {
    fn new(config: Config, db_path: PathBuf, seed: bool) -> Result<Self> {
        let store = NoteStore::open(&db_path)
            .with_context(|| format!("Failed to open note database {}", db_path.display()))?;
        if seed {
            if store.is_empty()? {
                let count = store::seed_demo_tree(&store)?;
                tracing::info!("Seeded {} demo items into {}", count, db_path.display());
            } else {
                tracing::info!("Database not empty, skipping seed");
            }
        }
        let repo: Arc<dyn Repository> = Arc::new(store);

        // Session storage is optional: the browser still works without it
        let session = match SessionDb::new() {
            Ok(db) => Some(db),
            Err(e) => {
                tracing::warn!("Session store unavailable: {:#}", e);
                None
            }
        };

        let (repo_tx, repo_rx) = services::spawn_repo_service(
            Arc::clone(&repo),
            Duration::from_millis(config.repo_timeout_ms),
        );
        let (slide_tx, slide_rx) = mpsc::unbounded_channel();

        let track = TrackAnimator::new(
            config.min_column_width,
            config.max_visible_columns,
            Duration::from_millis(config.animation_ms),
            config.reduce_motion,
        );

        let mut app = App {
            model: model::Model::new(track),
            repo_tx,
            repo_rx,
            slide_tx,
            slide_rx,
            keys: KeyDispatcher::new(),
            session,
            app_name: config.app_name,
            open_command: config.open_command,
            preview_width_percent: config.preview_width_percent,
            min_column_width: config.min_column_width,
            preview_requested: None,
            last_saved: None,
            list_offsets: Default::default(),
        };

        app.restore_session(repo.as_ref());
        Ok(app)
    }

    /// Queue a repository request. The service only goes away on shutdown.
    fn send(&self, request: RepoRequest) {
        if self.repo_tx.send(request).is_err() {
            tracing::error!("repository service is gone, request dropped");
        }
    }

    /// Handle repository responses from background worker
    /// Delegated to handlers::repo module
    fn handle_repo_response(&mut self, response: RepoResponse) {
        handlers::handle_repo_response(self, response);
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) -> Result<()> {
        handlers::keyboard::handle_key(self, key)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse();

    init_tracing(args.debug)?;

    // Determine config file path; no file means defaults
    let mut config = match config::find_config_path(args.config.as_deref())? {
        Some(path) => {
            tracing::info!("Loading config from: {:?}", path);
            Config::load(&path).with_context(|| format!("Failed to load config {}", path.display()))?
        }
        None => Config::default(),
    };

    // Override config with CLI flags
    if args.reduce_motion {
        config.reduce_motion = true;
    }
    let db_path = args
        .db
        .clone()
        .or_else(|| config.database_path.clone())
        .unwrap_or_else(utils::get_default_db_path);

    // Initialize app
    let mut app = App::new(config, db_path, args.seed)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app with error handler
    let result = run_app(&mut terminal, &mut app).await;

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Return result after cleanup
    result
}

async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Geometry and slide bookkeeping happen before the frame is drawn
        let size = terminal.size()?;
        app.prepare_frame(ratatui::layout::Rect::new(0, 0, size.width, size.height), Instant::now());

        // Always render (Elm Architecture approach)
        terminal.draw(|f| {
            ui::render(f, app);
        })?;

        // Auto-dismiss toast after 1.5 seconds
        if app.model.ui.should_dismiss_toast() {
            app.model.dismiss_toast();
        }

        if app.model.ui.should_quit {
            app.persist_session(true);
            break;
        }

        // Process repository responses (non-blocking)
        while let Ok(response) = app.repo_rx.try_recv() {
            app.handle_repo_response(response);
        }

        // Slide completions; stale generations are ignored by the animator
        while let Ok(generation) = app.slide_rx.try_recv() {
            if app.model.track.finish(generation) {
                tracing::trace!("slide {} finished", generation);
            }
        }

        app.request_preview();
        app.persist_session(false);

        // Redraw at frame rate while sliding, otherwise idle at 250ms
        let poll = if app.model.track.is_sliding() {
            Duration::from_millis(16)
        } else {
            Duration::from_millis(250)
        };

        if event::poll(poll)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key)?;
                }
            }
        }
    }

    Ok(())
}
