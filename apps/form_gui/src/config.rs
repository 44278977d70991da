use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use shared::FormType;

pub const DEFAULT_CONFIG_FILE: &str = "form_gui.toml";
pub const MIN_WINDOW_WIDTH: f32 = 480.0;
pub const MIN_WINDOW_HEIGHT: f32 = 360.0;

#[derive(Debug, Clone, PartialEq)]
pub struct StartupConfig {
    pub initial_form: Option<FormType>,
    pub log_filter: String,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            initial_form: None,
            log_filter: "info".into(),
            window_width: 900.0,
            window_height: 720.0,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    initial_form: Option<String>,
    log_filter: Option<String>,
    window_width: Option<f32>,
    window_height: Option<f32>,
}

/// Defaults, then the TOML file, then `APP__*` environment variables.
/// A missing default file is fine; an explicitly named one must exist.
pub fn load_startup_config(explicit_path: Option<&Path>) -> anyhow::Result<StartupConfig> {
    let raw = match explicit_path {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("failed to read config file '{}'", path.display()))?,
        ),
        None => fs::read_to_string(DEFAULT_CONFIG_FILE).ok(),
    };

    let mut config = StartupConfig::default();
    if let Some(raw) = raw {
        config.apply_file(&raw)?;
    }
    config.apply_env(|name| std::env::var(name).ok())?;
    Ok(config)
}

impl StartupConfig {
    fn apply_file(&mut self, raw: &str) -> anyhow::Result<()> {
        let file_cfg: FileConfig = toml::from_str(raw).context("malformed startup config")?;

        if let Some(v) = file_cfg.initial_form {
            self.set_initial_form(&v)?;
        }
        if let Some(v) = file_cfg.log_filter {
            self.log_filter = v;
        }
        if let Some(v) = file_cfg.window_width {
            self.window_width = v.max(MIN_WINDOW_WIDTH);
        }
        if let Some(v) = file_cfg.window_height {
            self.window_height = v.max(MIN_WINDOW_HEIGHT);
        }
        Ok(())
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(v) = var("APP__INITIAL_FORM") {
            self.set_initial_form(&v)?;
        }
        if let Some(v) = var("APP__LOG_FILTER") {
            self.log_filter = v;
        }
        Ok(())
    }

    /// Empty value means "start with nothing selected".
    pub fn set_initial_form(&mut self, key: &str) -> anyhow::Result<()> {
        let key = key.trim();
        self.initial_form = if key.is_empty() {
            None
        } else {
            Some(
                key.parse::<FormType>()
                    .context("invalid initial form in startup config")?,
            )
        };
        Ok(())
    }
}
