//! Viewer configuration
//!
//! Loaded from `viewer.toml` next to the working directory when present;
//! every field falls back to the scene's tuned defaults.

use scene_engine::camera::CameraTuning;
use scene_engine::config::Config;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level viewer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Window settings (consumed by the windowing collaborator)
    pub window: WindowConfig,
    /// Camera speed tuning
    pub camera: CameraTuning,
    /// Asset locations
    pub assets: AssetConfig,
    /// Headless demo settings
    pub demo: DemoConfig,
}

impl Config for ViewerConfig {}

/// Window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Framebuffer width in pixels
    pub width: u32,
    /// Framebuffer height in pixels
    pub height: u32,
    /// Window title
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
            title: "Space Scene Viewer".to_string(),
        }
    }
}

impl WindowConfig {
    /// Aspect ratio used for projection matrices
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

/// Asset locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory holding the scene's OBJ models
    pub model_dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            model_dir: "resources/models".to_string(),
        }
    }
}

impl AssetConfig {
    /// Resolve the model directory against common launch locations.
    ///
    /// The binary may be started from the workspace root or from the crate
    /// directory; the first candidate that exists wins, and the configured
    /// path is returned unchanged when none do (so the load error names it).
    pub fn resolve_model_dir(&self) -> String {
        let candidates = [
            self.model_dir.clone(),
            format!("viewer_app/{}", self.model_dir),
            format!("../{}", self.model_dir),
        ];

        for candidate in &candidates {
            if Path::new(candidate).is_dir() {
                return candidate.clone();
            }
        }
        self.model_dir.clone()
    }
}

/// Headless demo settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Demo duration in seconds
    pub duration_secs: f32,
    /// Target frame rate in frames per second
    pub frame_rate: f32,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            duration_secs: 12.0,
            frame_rate: 60.0,
        }
    }
}
