//! floatdock Core Library
//!
//! Geometry and state engine for a floating overlay control that stays
//! docked to one edge of its container, snaps magnetically to the nearest
//! edge when released, and switches between collapsed and expanded states.
//! Rendering, gesture recognition and action handling belong to the host.

pub mod config;
pub mod drag;
pub mod edge;
pub mod error;
pub mod geometry;
pub mod input;
pub mod observer;
pub mod overlay;
pub mod state;

pub use config::OverlayConfig;
pub use drag::{DragOutcome, DragSession, DragTracker};
pub use edge::{
    AccessoryPosition, AlignmentResult, DEFAULT_ATTRACTION_RADIUS, EdgeAlignment, LayoutAxis,
    align, select_edge,
};
pub use error::{ConfigError, ParseTagError};
pub use geometry::{EdgeDistances, clamp, edge_distances};
pub use input::{DragEvent, GesturePhase, MouseButton, PointerEvent, TapTarget};
pub use observer::{
    OverlayCommand, OverlayEvent, OverlayObserver, SubscriptionId, observer_fn,
};
pub use overlay::{FloatingOverlay, OverlayLayout};
pub use state::{ActionType, ChevronDirection, StateMachine, WidgetState};
