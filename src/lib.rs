pub mod app;
pub mod config;
pub mod error;
pub mod guard;
pub mod logging;
pub mod server;
pub mod setup;
pub mod shell;
pub mod state;
pub mod store;
pub use error::{AppError, AppResult};

/// Entrypoint used by the binary.
pub fn run() -> AppResult<()> {
    logging::init();
    tracing::info!("starting Stoat desktop shell");

    let mut app = app::App::new();
    app.start()?;

    tracing::info!("shell exited with state={:?}", app.final_state());
    Ok(())
}
