//! Edge alignment: snapping the overlay flush against a container edge and
//! choosing which edge a released overlay is attracted to.

use std::fmt;
use std::str::FromStr;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::error::ParseTagError;

/// Default distance within which a released overlay is pulled to an edge.
pub const DEFAULT_ATTRACTION_RADIUS: f64 = 150.0;

/// The container edge the overlay rests against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeAlignment {
    Top,
    Left,
    Right,
    Bottom,
}

/// Axis along which the toggle affordance and the content body are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutAxis {
    Horizontal,
    Vertical,
}

/// Whether the toggle affordance goes before or after the content body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessoryPosition {
    Leading,
    Trailing,
}

impl EdgeAlignment {
    /// Every edge, in the default permitted order.
    pub const ALL: [EdgeAlignment; 4] = [
        EdgeAlignment::Left,
        EdgeAlignment::Right,
        EdgeAlignment::Top,
        EdgeAlignment::Bottom,
    ];

    /// Layout axis used while docked to this edge.
    pub fn layout_axis(self) -> LayoutAxis {
        match self {
            EdgeAlignment::Left | EdgeAlignment::Right => LayoutAxis::Horizontal,
            EdgeAlignment::Top | EdgeAlignment::Bottom => LayoutAxis::Vertical,
        }
    }

    /// Where the toggle affordance is inserted while docked to this edge.
    pub fn accessory_position(self) -> AccessoryPosition {
        match self {
            EdgeAlignment::Top | EdgeAlignment::Left => AccessoryPosition::Leading,
            EdgeAlignment::Bottom | EdgeAlignment::Right => AccessoryPosition::Trailing,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EdgeAlignment::Top => "top",
            EdgeAlignment::Left => "left",
            EdgeAlignment::Right => "right",
            EdgeAlignment::Bottom => "bottom",
        }
    }
}

impl fmt::Display for EdgeAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeAlignment {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(EdgeAlignment::Top),
            "left" => Ok(EdgeAlignment::Left),
            "right" => Ok(EdgeAlignment::Right),
            "bottom" => Ok(EdgeAlignment::Bottom),
            _ => Err(ParseTagError::new("edge", s)),
        }
    }
}

/// Result of aligning the overlay to an edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AlignmentResult {
    /// The edge actually used (after permitted-set substitution).
    pub edge: EdgeAlignment,
    /// Snapped origin of the overlay.
    pub origin: Point,
    pub layout_axis: LayoutAxis,
    pub accessory_position: AccessoryPosition,
    /// Whether the requested edge was replaced by the first permitted edge.
    pub substituted: bool,
}

/// Map a requested edge onto the permitted set.
///
/// A forbidden edge is replaced by the first permitted one. An empty set is
/// rejected by configuration validation; if one reaches here anyway the
/// request is honoured as-is.
pub fn resolve_edge(requested: EdgeAlignment, permitted: &[EdgeAlignment]) -> EdgeAlignment {
    if permitted.is_empty() || permitted.contains(&requested) {
        return requested;
    }
    let fallback = permitted[0];
    log::warn!(
        "Edge '{}' is not permitted, aligning to '{}' instead",
        requested,
        fallback
    );
    fallback
}

/// Snap an overlay of `size` at `origin` flush against an edge of `bounds`.
///
/// Top and left pin the matching coordinate to the bounds origin; bottom and
/// right pin it to the far side minus the overlay extent. The other
/// coordinate is left untouched.
pub fn align(
    to: EdgeAlignment,
    origin: Point,
    size: Size,
    bounds: Rect,
    permitted: &[EdgeAlignment],
) -> AlignmentResult {
    let edge = resolve_edge(to, permitted);
    let origin = match edge {
        EdgeAlignment::Top => Point::new(origin.x, bounds.y0),
        EdgeAlignment::Left => Point::new(bounds.x0, origin.y),
        EdgeAlignment::Bottom => Point::new(origin.x, bounds.y0 + bounds.height() - size.height),
        EdgeAlignment::Right => Point::new(bounds.x0 + bounds.width() - size.width, origin.y),
    };

    AlignmentResult {
        edge,
        origin,
        layout_axis: edge.layout_axis(),
        accessory_position: edge.accessory_position(),
        substituted: edge != to,
    }
}

/// Choose the edge a released overlay is attracted to.
///
/// `origin` is relative to the container. Horizontal edges are checked
/// before vertical ones and the first match wins; when the overlay is out of
/// range of every edge it goes left.
pub fn select_edge(
    origin: Point,
    size: Size,
    container: Size,
    attraction_radius: f64,
) -> EdgeAlignment {
    let half_width = container.width / 2.0;
    let half_height = container.height / 2.0;

    if origin.x < half_width && origin.x <= attraction_radius {
        EdgeAlignment::Left
    } else if origin.x >= half_width
        && container.width - origin.x - size.width <= attraction_radius
    {
        EdgeAlignment::Right
    } else if origin.y < half_height && origin.y <= attraction_radius {
        EdgeAlignment::Top
    } else if origin.y >= half_height
        && container.height - origin.y - size.height <= attraction_radius
    {
        EdgeAlignment::Bottom
    } else {
        EdgeAlignment::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Size = Size::new(400.0, 800.0);
    const WIDGET: Size = Size::new(80.0, 160.0);

    fn bounds() -> Rect {
        Rect::from_origin_size(Point::ZERO, CONTAINER)
    }

    #[test]
    fn test_layout_directives() {
        assert_eq!(EdgeAlignment::Left.layout_axis(), LayoutAxis::Horizontal);
        assert_eq!(EdgeAlignment::Right.layout_axis(), LayoutAxis::Horizontal);
        assert_eq!(EdgeAlignment::Top.layout_axis(), LayoutAxis::Vertical);
        assert_eq!(EdgeAlignment::Bottom.layout_axis(), LayoutAxis::Vertical);

        assert_eq!(EdgeAlignment::Top.accessory_position(), AccessoryPosition::Leading);
        assert_eq!(EdgeAlignment::Left.accessory_position(), AccessoryPosition::Leading);
        assert_eq!(EdgeAlignment::Right.accessory_position(), AccessoryPosition::Trailing);
        assert_eq!(EdgeAlignment::Bottom.accessory_position(), AccessoryPosition::Trailing);
    }

    #[test]
    fn test_parse_edge() {
        assert_eq!("Right".parse::<EdgeAlignment>(), Ok(EdgeAlignment::Right));
        assert_eq!(" bottom ".parse::<EdgeAlignment>(), Ok(EdgeAlignment::Bottom));
        assert!("middle".parse::<EdgeAlignment>().is_err());
    }

    #[test]
    fn test_align_each_edge() {
        let origin = Point::new(120.0, 300.0);
        let all = EdgeAlignment::ALL;

        let top = align(EdgeAlignment::Top, origin, WIDGET, bounds(), &all);
        assert_eq!(top.origin, Point::new(120.0, 0.0));

        let left = align(EdgeAlignment::Left, origin, WIDGET, bounds(), &all);
        assert_eq!(left.origin, Point::new(0.0, 300.0));

        let right = align(EdgeAlignment::Right, origin, WIDGET, bounds(), &all);
        assert_eq!(right.origin, Point::new(320.0, 300.0));
        assert_eq!(right.layout_axis, LayoutAxis::Horizontal);
        assert_eq!(right.accessory_position, AccessoryPosition::Trailing);

        let bottom = align(EdgeAlignment::Bottom, origin, WIDGET, bounds(), &all);
        assert_eq!(bottom.origin, Point::new(120.0, 640.0));
        assert!(!bottom.substituted);
    }

    #[test]
    fn test_align_with_offset_bounds() {
        let safe = Rect::new(0.0, 44.0, 400.0, 766.0);
        let all = EdgeAlignment::ALL;
        let top = align(EdgeAlignment::Top, Point::new(0.0, 300.0), WIDGET, safe, &all);
        assert_eq!(top.origin.y, 44.0);
        let bottom = align(EdgeAlignment::Bottom, Point::new(0.0, 300.0), WIDGET, safe, &all);
        assert_eq!(bottom.origin.y, 606.0);
    }

    #[test]
    fn test_align_is_idempotent() {
        let all = EdgeAlignment::ALL;
        for edge in all {
            let first = align(edge, Point::new(57.0, 431.0), WIDGET, bounds(), &all);
            let second = align(edge, first.origin, WIDGET, bounds(), &all);
            assert_eq!(first, second);
        }
    }

    #[test]
    fn test_forbidden_edge_falls_back_to_first_permitted() {
        let permitted = [EdgeAlignment::Bottom, EdgeAlignment::Right];
        for origin in [Point::ZERO, Point::new(300.0, 10.0), Point::new(10.0, 600.0)] {
            let result = align(EdgeAlignment::Left, origin, WIDGET, bounds(), &permitted);
            assert_eq!(result.edge, EdgeAlignment::Bottom);
            assert!(result.substituted);
            assert_eq!(result.origin.y, 640.0);
            assert_eq!(result.origin.x, origin.x);
        }
    }

    #[test]
    fn test_resolve_edge_permitted_is_unchanged() {
        let permitted = [EdgeAlignment::Top, EdgeAlignment::Right];
        assert_eq!(resolve_edge(EdgeAlignment::Right, &permitted), EdgeAlignment::Right);
        assert_eq!(resolve_edge(EdgeAlignment::Left, &permitted), EdgeAlignment::Top);
    }

    #[test]
    fn test_select_edge_left() {
        let edge = select_edge(Point::new(120.0, 400.0), WIDGET, CONTAINER, DEFAULT_ATTRACTION_RADIUS);
        assert_eq!(edge, EdgeAlignment::Left);
    }

    #[test]
    fn test_select_edge_right() {
        // 400 - 320 - 80 = 0
        let edge = select_edge(Point::new(320.0, 0.0), WIDGET, CONTAINER, DEFAULT_ATTRACTION_RADIUS);
        assert_eq!(edge, EdgeAlignment::Right);
    }

    #[test]
    fn test_select_edge_top_and_bottom() {
        // Wide container so neither horizontal edge is in range.
        let container = Size::new(1000.0, 800.0);
        let top = select_edge(Point::new(400.0, 100.0), WIDGET, container, DEFAULT_ATTRACTION_RADIUS);
        assert_eq!(top, EdgeAlignment::Top);

        let bottom = select_edge(Point::new(400.0, 600.0), WIDGET, container, DEFAULT_ATTRACTION_RADIUS);
        assert_eq!(bottom, EdgeAlignment::Bottom);
    }

    #[test]
    fn test_select_edge_defaults_to_left() {
        let container = Size::new(1000.0, 1000.0);
        let edge = select_edge(Point::new(450.0, 420.0), WIDGET, container, DEFAULT_ATTRACTION_RADIUS);
        assert_eq!(edge, EdgeAlignment::Left);
    }

    #[test]
    fn test_select_edge_horizontal_wins_ties() {
        // In range of both left and top.
        let edge = select_edge(Point::new(10.0, 10.0), WIDGET, CONTAINER, DEFAULT_ATTRACTION_RADIUS);
        assert_eq!(edge, EdgeAlignment::Left);
        // In range of both right and bottom.
        let edge = select_edge(Point::new(320.0, 640.0), WIDGET, CONTAINER, DEFAULT_ATTRACTION_RADIUS);
        assert_eq!(edge, EdgeAlignment::Right);
    }

    #[test]
    fn test_select_edge_left_half_out_of_range_checks_vertical() {
        // Left half but beyond the radius, near the top.
        let edge = select_edge(Point::new(160.0, 20.0), Size::new(40.0, 80.0), Size::new(400.0, 800.0), 150.0);
        assert_eq!(edge, EdgeAlignment::Top);
    }

    #[test]
    fn test_select_edge_is_deterministic() {
        let inputs = [
            (Point::new(0.0, 0.0), 150.0),
            (Point::new(199.9, 399.9), 150.0),
            (Point::new(200.0, 400.0), 0.0),
            (Point::new(250.0, 700.0), 10.0),
        ];
        for (origin, radius) in inputs {
            let a = select_edge(origin, WIDGET, CONTAINER, radius);
            let b = select_edge(origin, WIDGET, CONTAINER, radius);
            assert_eq!(a, b);
        }
    }
}
