use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::action::ActionRegistry;
use crate::app::App;
use crate::handler::HandlerRegistry;
use crate::route::Route;

mod action;
mod app;
mod cli;
mod clipboard;
mod config;
mod handler;
mod page;
mod route;
mod search;
mod site;
mod theme;
pub mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting folio");

    let args = cli::Args::parse();

    let config_path = args.config.clone().or_else(config::config_path);
    let config = match &config_path {
        Some(path) => config::load_from(path)?,
        None => config::AppConfig::default(),
    };

    let handlers = HandlerRegistry::builtin();
    let registry = ActionRegistry::with_actions(config.actions.clone());
    registry.validate(&handlers)?;

    if args.list_actions {
        println!("{}", serde_json::to_string_pretty(&registry)?);
        return Ok(());
    }

    info!("Loaded {} palette actions", registry.len());

    let mut app = App::new(config, Arc::new(registry), Arc::new(handlers))
        .with_start_page(Route::from(args.page));
    if let Some(path) = config_path {
        app = app.with_config_path(path);
    }
    if let Some(mode) = args.theme {
        app = app.with_theme(mode);
    }
    app.run().await?;

    Ok(())
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("folio").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "folio.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
