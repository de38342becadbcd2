//! Input events delivered by the host: pan gesture phases, raw pointer
//! events and taps.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::state::ActionType;

/// Phase of a pan gesture as reported by a platform gesture recognizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    /// Recognizer has not decided yet.
    Possible,
    /// Drag started.
    Began,
    /// Drag moved.
    Changed,
    /// Drag finished normally.
    Ended,
    /// Drag was interrupted by the system.
    Cancelled,
    /// Recognizer gave up.
    Failed,
}

/// A drag gesture event in container-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragEvent {
    pub phase: GesturePhase,
    pub location: Point,
}

impl DragEvent {
    pub fn new(phase: GesturePhase, location: Point) -> Self {
        Self { phase, location }
    }

    pub fn began(location: Point) -> Self {
        Self::new(GesturePhase::Began, location)
    }

    pub fn changed(location: Point) -> Self {
        Self::new(GesturePhase::Changed, location)
    }

    pub fn ended(location: Point) -> Self {
        Self::new(GesturePhase::Ended, location)
    }

    pub fn cancelled(location: Point) -> Self {
        Self::new(GesturePhase::Cancelled, location)
    }
}

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Pointer event type for hosts that deliver raw mouse/touch input instead
/// of recognized gestures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down {
        position: Point,
        button: MouseButton,
    },
    Up {
        position: Point,
        button: MouseButton,
    },
    Move {
        position: Point,
    },
    Scroll {
        position: Point,
        delta: Vec2,
    },
}

/// Something the user tapped on the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TapTarget {
    /// The expand/collapse affordance.
    Toggle,
    /// One of the action items.
    Action(ActionType),
}
