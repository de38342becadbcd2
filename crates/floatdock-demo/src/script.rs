//! Scripted input for the demo host.

use std::path::{Path, PathBuf};

use floatdock_core::{ConfigError, DragEvent, EdgeAlignment, OverlayConfig, TapTarget, WidgetState};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Demo errors.
#[derive(Debug, Error)]
pub enum DemoError {
    #[error("Failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Script(#[from] serde_json::Error),
    #[error("Invalid overlay configuration: {0}")]
    Config(#[from] ConfigError),
}

/// One host event to replay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Drag(DragEvent),
    Tap(TapTarget),
    /// Tap on an action item by integer view tag.
    TapTag(i64),
    Align(EdgeAlignment),
    /// The container's safe area changed.
    Resize(Rect),
}

/// A complete replay: where to attach and what the user does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub container: Rect,
    #[serde(default = "default_edge")]
    pub initial_edge: EdgeAlignment,
    #[serde(default)]
    pub initial_state: WidgetState,
    #[serde(default)]
    pub config: OverlayConfig,
    pub steps: Vec<Step>,
}

fn default_edge() -> EdgeAlignment {
    EdgeAlignment::Left
}

impl Script {
    pub fn load(path: &Path) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path).map_err(|source| DemoError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(json: &str) -> Result<Self, DemoError> {
        let script: Self = serde_json::from_str(json)?;
        script.config.validate()?;
        Ok(script)
    }

    /// Drag across a phone-sized screen, open the overlay and start, then
    /// stop and collapse.
    pub fn builtin() -> Self {
        let grab = Point::new(10.0, 220.0);
        Self {
            container: Rect::new(0.0, 0.0, 400.0, 800.0),
            initial_edge: EdgeAlignment::Left,
            initial_state: WidgetState::Collapsed,
            config: OverlayConfig::default(),
            steps: vec![
                Step::Drag(DragEvent::began(grab)),
                Step::Drag(DragEvent::changed(Point::new(200.0, 400.0))),
                Step::Drag(DragEvent::changed(Point::new(390.0, 10.0))),
                Step::Drag(DragEvent::ended(Point::new(390.0, 10.0))),
                Step::Tap(TapTarget::Toggle),
                Step::TapTag(0),
                Step::Tap(TapTarget::Action(floatdock_core::ActionType::Stop)),
                Step::Tap(TapTarget::Toggle),
                Step::Resize(Rect::new(0.0, 0.0, 800.0, 400.0)),
            ],
        }
    }
}
