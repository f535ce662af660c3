//! Timetable - weekly class schedule
//!
//! Loads the saved schedule and prints the timetable, the course list and
//! the weekly summary.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod state;
mod viewmodel;

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tracing::info!("Starting Timetable");

    let app_state = match state::AppState::new() {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    tracing::debug!("Data directory: {}", app_state.data_dir().display());

    match app_state.last_saved() {
        Some(at) => tracing::info!(
            "Schedule last saved {}",
            at.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M")
        ),
        None => tracing::info!("No saved schedule yet"),
    }

    let view = app_state.editor.view();
    let screen = viewmodel::ScreenModel::build(&view, &app_state.config.display);
    print!("{}", screen.render_text());
}
