use std::collections::BTreeMap;

use eframe::egui;
use serde::{Deserialize, Serialize};

pub const SETTINGS_STORAGE_KEY: &str = "form_gui.settings";
pub const MIN_TEXT_SCALE: f32 = 0.8;
pub const MAX_TEXT_SCALE: f32 = 1.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreset {
    Dark,
    Light,
}

impl ThemePreset {
    pub const ALL: [ThemePreset; 2] = [ThemePreset::Dark, ThemePreset::Light];

    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::Dark => "Dark",
            ThemePreset::Light => "Light",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DisplaySettings {
    pub preset: ThemePreset,
    pub text_scale: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            preset: ThemePreset::Dark,
            text_scale: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedDisplaySettings {
    theme_preset: ThemePreset,
    text_scale: f32,
}

impl Default for PersistedDisplaySettings {
    fn default() -> Self {
        Self::from_runtime(DisplaySettings::default())
    }
}

impl PersistedDisplaySettings {
    pub fn from_runtime(settings: DisplaySettings) -> Self {
        Self {
            theme_preset: settings.preset,
            text_scale: settings.text_scale.clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE),
        }
    }

    pub fn into_runtime(self) -> DisplaySettings {
        DisplaySettings {
            preset: self.theme_preset,
            text_scale: self.text_scale.clamp(MIN_TEXT_SCALE, MAX_TEXT_SCALE),
        }
    }

    pub fn from_storage_text(text: &str) -> Option<Self> {
        match serde_json::from_str(text) {
            Ok(settings) => Some(settings),
            Err(err) => {
                tracing::warn!("ignoring unreadable display settings: {err}");
                None
            }
        }
    }
}

pub fn style_for_settings(base: &egui::Style, settings: DisplaySettings) -> egui::Style {
    let mut style = base.clone();
    style.visuals = match settings.preset {
        ThemePreset::Dark => egui::Visuals::dark(),
        ThemePreset::Light => egui::Visuals::light(),
    };
    style.text_styles = scaled_text_styles(settings.text_scale);
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style
}

fn scaled_text_styles(text_scale: f32) -> BTreeMap<egui::TextStyle, egui::FontId> {
    let mut styles = egui::Style::default().text_styles;
    for font in styles.values_mut() {
        font.size *= text_scale;
    }
    styles
}

pub fn error_text_color(preset: ThemePreset) -> egui::Color32 {
    match preset {
        ThemePreset::Dark => egui::Color32::from_rgb(240, 113, 113),
        ThemePreset::Light => egui::Color32::from_rgb(180, 32, 32),
    }
}
