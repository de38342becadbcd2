//! Drag tracking: keeps the touch point stationary relative to the overlay
//! while it moves, clamped to the container.

use kurbo::{Point, Rect, Size, Vec2};

use crate::geometry;
use crate::input::{DragEvent, GesturePhase, MouseButton, PointerEvent};

/// An active drag, from the start phase until the end phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Where the drag began, relative to the overlay origin.
    pub touch_offset: Vec2,
}

/// What a drag event did to the tracker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragOutcome {
    /// A new session was opened.
    Started,
    /// A session was already open; the offset was kept.
    AlreadyDragging,
    /// The overlay should move to this origin.
    Moved(Point),
    /// The drag finished; the overlay should snap to an edge.
    Released,
    /// Nothing to do.
    Ignored,
}

/// Tracks a single-touch drag of the overlay.
#[derive(Debug, Clone, Default)]
pub struct DragTracker {
    session: Option<DragSession>,
    /// Whether the primary pointer is held (raw pointer input only).
    pointer_down: bool,
}

impl DragTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<DragSession> {
        self.session
    }

    /// Open a session for a drag starting at `location`. A second start
    /// before the session ends keeps the original offset.
    pub fn begin(&mut self, location: Point, frame: Rect) -> DragOutcome {
        if self.session.is_some() {
            return DragOutcome::AlreadyDragging;
        }
        self.session = Some(DragSession {
            touch_offset: location - frame.origin(),
        });
        DragOutcome::Started
    }

    /// Origin for the overlay when the drag is at `location`.
    pub fn track(&self, location: Point, size: Size, bounds: Rect) -> Point {
        let candidate = match self.session {
            Some(session) => location - session.touch_offset,
            None => {
                log::warn!("Drag moved without an active session, using drag point as origin");
                location
            }
        };
        geometry::clamp(candidate, size, bounds)
    }

    /// Close the session, returning it if there was one.
    pub fn finish(&mut self) -> Option<DragSession> {
        self.session.take()
    }

    /// Drop all drag state.
    pub fn reset(&mut self) {
        self.session = None;
        self.pointer_down = false;
    }

    /// Feed one drag event through the tracker.
    ///
    /// `bounds` is the container's safe area, or `None` when the overlay has
    /// no container, in which case moves are ignored.
    pub fn handle(&mut self, event: DragEvent, frame: Rect, bounds: Option<Rect>) -> DragOutcome {
        let located = matches!(event.phase, GesturePhase::Began | GesturePhase::Changed);
        if located && !(event.location.x.is_finite() && event.location.y.is_finite()) {
            log::warn!("Ignoring drag {:?} at non-finite location {:?}", event.phase, event.location);
            return DragOutcome::Ignored;
        }
        match event.phase {
            GesturePhase::Began => self.begin(event.location, frame),
            GesturePhase::Changed => match bounds {
                Some(bounds) => DragOutcome::Moved(self.track(event.location, frame.size(), bounds)),
                None => {
                    log::warn!("Drag moved but container geometry is missing");
                    DragOutcome::Ignored
                }
            },
            GesturePhase::Ended | GesturePhase::Cancelled => {
                if self.finish().is_none() {
                    log::debug!("Drag {:?} without an active session", event.phase);
                }
                DragOutcome::Released
            }
            GesturePhase::Possible | GesturePhase::Failed => {
                log::warn!("Drag phase {:?} is not handled", event.phase);
                DragOutcome::Ignored
            }
        }
    }

    /// Translate a raw pointer event into a drag event.
    ///
    /// Only the left button drives drags. Moves without the button held and
    /// scrolls produce nothing.
    pub fn translate_pointer(&mut self, event: &PointerEvent) -> Option<DragEvent> {
        match *event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => {
                self.pointer_down = true;
                Some(DragEvent::began(position))
            }
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            } => {
                if !self.pointer_down {
                    return None;
                }
                self.pointer_down = false;
                Some(DragEvent::ended(position))
            }
            PointerEvent::Move { position } if self.pointer_down => Some(DragEvent::changed(position)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 800.0)
    }

    fn frame() -> Rect {
        Rect::from_origin_size(Point::new(0.0, 200.0), Size::new(80.0, 160.0))
    }

    #[test]
    fn test_begin_captures_offset() {
        let mut tracker = DragTracker::new();
        assert_eq!(tracker.begin(Point::new(10.0, 220.0), frame()), DragOutcome::Started);
        assert_eq!(tracker.session().unwrap().touch_offset, Vec2::new(10.0, 20.0));
        assert!(tracker.is_dragging());
    }

    #[test]
    fn test_begin_is_idempotent() {
        let mut tracker = DragTracker::new();
        tracker.begin(Point::new(10.0, 220.0), frame());
        assert_eq!(
            tracker.begin(Point::new(70.0, 300.0), frame()),
            DragOutcome::AlreadyDragging
        );
        assert_eq!(tracker.session().unwrap().touch_offset, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_track_keeps_touch_point_stationary() {
        let mut tracker = DragTracker::new();
        tracker.begin(Point::new(10.0, 220.0), frame());
        let origin = tracker.track(Point::new(110.0, 420.0), frame().size(), bounds());
        assert_eq!(origin, Point::new(100.0, 400.0));
    }

    #[test]
    fn test_track_clamps_to_bounds() {
        let mut tracker = DragTracker::new();
        tracker.begin(Point::new(10.0, 220.0), frame());
        let origin = tracker.track(Point::new(390.0, 10.0), frame().size(), bounds());
        assert_eq!(origin, Point::new(320.0, 0.0));
    }

    #[test]
    fn test_track_without_session_uses_drag_point() {
        let tracker = DragTracker::new();
        let origin = tracker.track(Point::new(50.0, 60.0), frame().size(), bounds());
        assert_eq!(origin, Point::new(50.0, 60.0));
        let origin = tracker.track(Point::new(1000.0, 60.0), frame().size(), bounds());
        assert_eq!(origin, Point::new(320.0, 60.0));
    }

    #[test]
    fn test_handle_phases() {
        let mut tracker = DragTracker::new();
        let p = Point::new(20.0, 230.0);
        assert_eq!(tracker.handle(DragEvent::began(p), frame(), Some(bounds())), DragOutcome::Started);
        assert!(matches!(
            tracker.handle(DragEvent::changed(p), frame(), Some(bounds())),
            DragOutcome::Moved(_)
        ));
        assert_eq!(tracker.handle(DragEvent::ended(p), frame(), Some(bounds())), DragOutcome::Released);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn test_handle_ignores_other_phases() {
        let mut tracker = DragTracker::new();
        let p = Point::new(20.0, 230.0);
        tracker.begin(p, frame());
        for phase in [GesturePhase::Possible, GesturePhase::Failed] {
            let outcome = tracker.handle(DragEvent::new(phase, p), frame(), Some(bounds()));
            assert_eq!(outcome, DragOutcome::Ignored);
        }
        assert!(tracker.is_dragging());
    }

    #[test]
    fn test_cancel_closes_session() {
        let mut tracker = DragTracker::new();
        let p = Point::new(20.0, 230.0);
        tracker.begin(p, frame());
        assert_eq!(tracker.handle(DragEvent::cancelled(p), frame(), Some(bounds())), DragOutcome::Released);
        assert!(!tracker.is_dragging());
        // A fresh start after cancellation captures a new offset.
        tracker.begin(Point::new(40.0, 260.0), frame());
        assert_eq!(tracker.session().unwrap().touch_offset, Vec2::new(40.0, 60.0));
    }

    #[test]
    fn test_non_finite_locations_are_ignored() {
        let mut tracker = DragTracker::new();
        let bad = Point::new(30.0, f64::NAN);
        assert_eq!(tracker.handle(DragEvent::began(bad), frame(), Some(bounds())), DragOutcome::Ignored);
        assert!(!tracker.is_dragging());

        tracker.begin(Point::new(10.0, 210.0), frame());
        for location in [bad, Point::new(f64::INFINITY, 10.0)] {
            let outcome = tracker.handle(DragEvent::changed(location), frame(), Some(bounds()));
            assert_eq!(outcome, DragOutcome::Ignored);
        }
        assert_eq!(tracker.session().unwrap().touch_offset, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_move_without_container_is_ignored() {
        let mut tracker = DragTracker::new();
        let p = Point::new(20.0, 230.0);
        tracker.begin(p, frame());
        assert_eq!(tracker.handle(DragEvent::changed(p), frame(), None), DragOutcome::Ignored);
    }

    #[test]
    fn test_translate_pointer() {
        let mut tracker = DragTracker::new();
        let p = Point::new(5.0, 5.0);

        assert_eq!(tracker.translate_pointer(&PointerEvent::Move { position: p }), None);
        assert_eq!(
            tracker.translate_pointer(&PointerEvent::Down { position: p, button: MouseButton::Right }),
            None
        );
        assert_eq!(
            tracker.translate_pointer(&PointerEvent::Down { position: p, button: MouseButton::Left }),
            Some(DragEvent::began(p))
        );
        assert_eq!(
            tracker.translate_pointer(&PointerEvent::Move { position: p }),
            Some(DragEvent::changed(p))
        );
        assert_eq!(
            tracker.translate_pointer(&PointerEvent::Scroll { position: p, delta: Vec2::new(0.0, 3.0) }),
            None
        );
        assert_eq!(
            tracker.translate_pointer(&PointerEvent::Up { position: p, button: MouseButton::Left }),
            Some(DragEvent::ended(p))
        );
        assert_eq!(
            tracker.translate_pointer(&PointerEvent::Up { position: p, button: MouseButton::Left }),
            None
        );
    }
}
