//! Bounds clamping and edge distance helpers.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Clamp one axis of an origin so that `[origin, origin + extent]` stays
/// inside `[min, min + span]`.
fn clamp_axis(origin: f64, extent: f64, min: f64, span: f64) -> f64 {
    if origin <= min {
        min
    } else if origin + extent > min + span {
        min + span - extent
    } else {
        origin
    }
}

/// Clamp the origin of a rectangle of `size` so it lies inside `bounds`.
///
/// Each axis is handled independently. When `size` is larger than `bounds`
/// on an axis the origin is pinned to the bounds origin on that axis.
pub fn clamp(origin: Point, size: Size, bounds: Rect) -> Point {
    Point::new(
        clamp_axis(origin.x, size.width, bounds.x0, bounds.width()),
        clamp_axis(origin.y, size.height, bounds.y0, bounds.height()),
    )
}

/// Clamp a frame into `bounds`, keeping its size.
pub fn clamp_rect_origin(frame: Rect, bounds: Rect) -> Rect {
    frame.with_origin(clamp(frame.origin(), frame.size(), bounds))
}

/// Check whether a rectangle of `size` can fit inside `bounds` at all.
pub fn fits_within(size: Size, bounds: Rect) -> bool {
    size.width <= bounds.width() && size.height <= bounds.height()
}

/// Distance from each side of a frame to the matching side of its bounds.
///
/// Values are non-negative while the frame is inside the bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EdgeDistances {
    pub top: f64,
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
}

/// Compute the distances from `frame` to each edge of `bounds`.
pub fn edge_distances(frame: Rect, bounds: Rect) -> EdgeDistances {
    EdgeDistances {
        top: frame.y0 - bounds.y0,
        left: frame.x0 - bounds.x0,
        right: bounds.x1 - frame.x1,
        bottom: bounds.y1 - frame.y1,
    }
}

impl EdgeDistances {
    /// Smallest of the four distances.
    pub fn min(&self) -> f64 {
        self.top.min(self.left).min(self.right).min(self.bottom)
    }
}
