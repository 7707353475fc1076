use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use mymusic::controller::AppController;
use mymusic::logging;
use mymusic::model::AppModel;
use mymusic::storage::{Store, DEFAULT_STORE_FILE};
use mymusic::view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    tracing::info!("=== MyMusic Starting ===");

    let store = Store::open(DEFAULT_STORE_FILE)?;
    let model = Arc::new(AppModel::load(store).await?);

    tracing::info!("Starting TUI...");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let controller = AppController::new(model.clone());

    let res = run_app(&mut terminal, model, controller).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "Application error");
    }

    tracing::info!("MyMusic shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<AppModel>,
    controller: AppController,
) -> io::Result<()> {
    loop {
        // Advance the simulated transport (auto-advance at end of song)
        controller.handle_playback_tick().await;

        // Auto-clear old errors (after 5 seconds)
        model.auto_clear_old_errors().await;

        // Get current state
        let playback = model.get_playback_info().await;
        let ui_state = model.get_ui_state().await;
        let content = model.get_content_data().await;
        let playlist_names: Vec<String> = model
            .playlists_snapshot()
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();
        let should_quit = model.should_quit().await;

        // Draw UI
        terminal.draw(|f| {
            AppView::render(f, &playback, &ui_state, &content, &playlist_names);
        })?;

        // Handle input with shorter poll time for smoother UI updates
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key) = event::read()?
        {
            let _ = controller.handle_key_event(key).await;
        }

        if should_quit {
            break;
        }
    }

    Ok(())
}
