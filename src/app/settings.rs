use crate::model;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use super::hit_test::HandleMetrics;

#[derive(Debug, Error)]
pub(super) enum SettingsError {
    #[error("read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parse {path}: {source}")]
    Toml {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub(super) struct TextDefaults {
    pub text: String,
    pub font_size: f32,
    pub font_family: String,
    pub color: model::Rgba,
    pub width: f32,
    pub height: f32,
}

impl Default for TextDefaults {
    fn default() -> Self {
        Self {
            text: "New text".to_string(),
            font_size: 24.0,
            font_family: "Arial".to_string(),
            color: model::Rgba::BLACK,
            width: 200.0,
            height: 50.0,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub(super) struct EditorSettings {
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub handle_radius: f32,
    pub rotate_handle_offset: f32,
    /// Largest share of the canvas a freshly added image may cover per axis.
    pub image_fit_ratio: f32,
    pub selection_outset: f32,
    pub selection_stroke_width: f32,
    pub selection_color: model::Rgba,
    pub text: TextDefaults,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            canvas_width: 800.0,
            canvas_height: 600.0,
            handle_radius: 8.0,
            rotate_handle_offset: 30.0,
            image_fit_ratio: 0.8,
            selection_outset: 2.0,
            selection_stroke_width: 2.0,
            selection_color: model::Rgba {
                r: 0,
                g: 149,
                b: 255,
                a: 255,
            },
            text: TextDefaults::default(),
        }
    }
}

impl EditorSettings {
    pub fn handle_metrics(&self) -> HandleMetrics {
        HandleMetrics {
            radius: self.handle_radius,
            rotate_offset: self.rotate_handle_offset,
        }
    }
}

pub(super) fn load_settings(path: &str) -> Result<EditorSettings, SettingsError> {
    let s = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_string(),
        source,
    })?;
    parse_settings(path, &s)
}

fn parse_settings(path: &str, s: &str) -> Result<EditorSettings, SettingsError> {
    let is_toml = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));
    if is_toml {
        toml::from_str::<EditorSettings>(s).map_err(|source| SettingsError::Toml {
            path: path.to_string(),
            source,
        })
    } else {
        serde_json::from_str::<EditorSettings>(s).map_err(|source| SettingsError::Json {
            path: path.to_string(),
            source,
        })
    }
}

pub(super) fn config_path() -> Option<String> {
    if let Some(home) = std::env::var_os("HOME") {
        let path = std::path::PathBuf::from(home)
            .join(".config")
            .join("sceneboard.toml");
        if path.exists() {
            return Some(path.display().to_string());
        }
    }
    ["settings.toml", "settings.json"]
        .into_iter()
        .find(|p| Path::new(p).exists())
        .map(str::to_string)
}
