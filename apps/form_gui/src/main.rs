use std::path::PathBuf;

use clap::Parser;
use eframe::egui;
use tracing_subscriber::EnvFilter;

mod config;
mod controller;
mod ui;

use config::{load_startup_config, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH};
use ui::{theme::PersistedDisplaySettings, theme::SETTINGS_STORAGE_KEY, DynamicFormApp};

const APP_NAME: &str = "Dynamic Form";

#[derive(Parser, Debug)]
#[command(about = "Schema-driven form entry with an in-memory submission table")]
struct Args {
    /// Startup config file (defaults to ./form_gui.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    /// Form type selected at startup, e.g. `userInformation`.
    #[arg(long)]
    initial_form: Option<String>,
    /// Log filter used when RUST_LOG is unset.
    #[arg(long)]
    log_filter: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut startup = load_startup_config(args.config.as_deref())?;
    if let Some(key) = &args.initial_form {
        startup.set_initial_form(key)?;
    }
    if let Some(filter) = args.log_filter {
        startup.log_filter = filter;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&startup.log_filter)),
        )
        .init();
    tracing::info!(initial_form = ?startup.initial_form, "starting form gui");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_NAME)
            .with_inner_size([startup.window_width, startup.window_height])
            .with_min_inner_size([MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT]),
        ..Default::default()
    };
    eframe::run_native(
        APP_NAME,
        options,
        Box::new(move |cc| {
            let persisted = cc.storage.and_then(|storage| {
                storage
                    .get_string(SETTINGS_STORAGE_KEY)
                    .and_then(|text| PersistedDisplaySettings::from_storage_text(&text))
            });
            Ok(Box::new(DynamicFormApp::new(&startup, persisted)))
        }),
    )
    .map_err(|err| anyhow::anyhow!("form gui exited with error: {err}"))
}
