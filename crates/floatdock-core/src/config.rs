//! Overlay configuration.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};

use crate::edge::{DEFAULT_ATTRACTION_RADIUS, EdgeAlignment};
use crate::error::ConfigError;
use crate::state::WidgetState;

/// Default attach origin.
pub const DEFAULT_ORIGIN: Point = Point::new(0.0, 200.0);
/// Default attach size, used until the first state transition.
pub const DEFAULT_SIZE: Size = Size::new(80.0, 160.0);
pub const COLLAPSED_SIZE: Size = Size::new(40.0, 80.0);
pub const EXPANDED_SIZE: Size = Size::new(100.0, 80.0);
pub const EXPANDED_LARGE_SIZE: Size = Size::new(140.0, 160.0);

/// Configuration for a [`FloatingOverlay`](crate::FloatingOverlay).
///
/// Missing fields in a JSON document fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Edges the overlay may dock to. The first entry is the fallback for
    /// forbidden requests.
    pub permitted_edges: Vec<EdgeAlignment>,
    /// Distance within which a released overlay snaps to an edge.
    pub attraction_radius: f64,
    pub default_origin: Point,
    pub default_size: Size,
    pub collapsed_size: Size,
    pub expanded_size: Size,
    pub expanded_large_size: Size,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            permitted_edges: EdgeAlignment::ALL.to_vec(),
            attraction_radius: DEFAULT_ATTRACTION_RADIUS,
            default_origin: DEFAULT_ORIGIN,
            default_size: DEFAULT_SIZE,
            collapsed_size: COLLAPSED_SIZE,
            expanded_size: EXPANDED_SIZE,
            expanded_large_size: EXPANDED_LARGE_SIZE,
        }
    }
}

impl OverlayConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_permitted_edges(mut self, edges: impl Into<Vec<EdgeAlignment>>) -> Self {
        self.permitted_edges = edges.into();
        self
    }

    pub fn with_attraction_radius(mut self, radius: f64) -> Self {
        self.attraction_radius = radius;
        self
    }

    pub fn with_default_frame(mut self, origin: Point, size: Size) -> Self {
        self.default_origin = origin;
        self.default_size = size;
        self
    }

    pub fn with_state_size(mut self, state: WidgetState, size: Size) -> Self {
        match state {
            WidgetState::Collapsed => self.collapsed_size = size,
            WidgetState::Expanded => self.expanded_size = size,
            WidgetState::ExpandedLarge => self.expanded_large_size = size,
        }
        self
    }

    /// Fixed size of the overlay in `state`.
    pub fn size_for(&self, state: WidgetState) -> Size {
        match state {
            WidgetState::Collapsed => self.collapsed_size,
            WidgetState::Expanded => self.expanded_size,
            WidgetState::ExpandedLarge => self.expanded_large_size,
        }
    }

    /// Check the configuration contract.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.permitted_edges.is_empty() {
            return Err(ConfigError::EmptyPermittedEdges);
        }
        if !self.attraction_radius.is_finite() || self.attraction_radius < 0.0 {
            return Err(ConfigError::InvalidAttractionRadius(self.attraction_radius));
        }
        let sizes = [
            ("default_size", self.default_size),
            ("collapsed_size", self.collapsed_size),
            ("expanded_size", self.expanded_size),
            ("expanded_large_size", self.expanded_large_size),
        ];
        for (name, size) in sizes {
            let valid = size.width.is_finite()
                && size.height.is_finite()
                && size.width > 0.0
                && size.height > 0.0;
            if !valid {
                return Err(ConfigError::InvalidSize { name, size });
            }
        }
        Ok(())
    }
}
