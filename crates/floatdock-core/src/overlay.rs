//! The floating overlay component.
//!
//! `FloatingOverlay` owns the overlay's frame, docked edge, visual state and
//! drag session. Hosts feed it gesture and tap events and read back a
//! [`OverlayLayout`] to render. All mutation for a transition completes
//! before its notification is queued; notifications are delivered to
//! observers only at the end of the public call that produced them, and
//! commands returned by observers are applied in FIFO order afterwards.

use std::collections::VecDeque;

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

use crate::config::OverlayConfig;
use crate::drag::{DragOutcome, DragTracker};
use crate::edge::{self, AccessoryPosition, EdgeAlignment, LayoutAxis};
use crate::error::ConfigError;
use crate::geometry::{self, EdgeDistances};
use crate::input::{DragEvent, PointerEvent, TapTarget};
use crate::observer::{
    ObserverRegistry, OverlayCommand, OverlayEvent, OverlayObserver, SubscriptionId,
};
use crate::state::{ActionType, ChevronDirection, StateMachine, WidgetState};

/// Upper bound on events handled in one dispatch, so observers that keep
/// answering each other's notifications cannot loop forever.
pub const MAX_DISPATCH_ROUNDS: usize = 64;

/// Events kept for [`FloatingOverlay::poll_events`] before the oldest are
/// dropped.
pub const MAX_PENDING_EVENTS: usize = 256;

/// Everything a renderer needs to draw the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlayLayout {
    pub frame: Rect,
    pub edge: EdgeAlignment,
    pub state: WidgetState,
    pub preferred_expanded_state: WidgetState,
    pub layout_axis: LayoutAxis,
    pub accessory_position: AccessoryPosition,
    pub chevron: ChevronDirection,
    pub action_items: Vec<ActionType>,
    pub dragging: bool,
}

/// An always-on-top control docked to one edge of its container.
#[derive(Debug)]
pub struct FloatingOverlay {
    config: OverlayConfig,
    /// Safe bounds of the container, `None` while detached.
    container: Option<Rect>,
    frame: Rect,
    edge: EdgeAlignment,
    state: StateMachine,
    /// Action items currently attached.
    action_items: Vec<ActionType>,
    drag: DragTracker,
    observers: ObserverRegistry,
    /// Events waiting to be delivered to observers.
    outbox: VecDeque<OverlayEvent>,
    /// Events waiting to be polled by the host.
    pending: VecDeque<OverlayEvent>,
}

impl Default for FloatingOverlay {
    fn default() -> Self {
        Self::with_valid_config(OverlayConfig::default())
    }
}

impl FloatingOverlay {
    /// Create a detached overlay after validating `config`.
    pub fn new(config: OverlayConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: OverlayConfig) -> Self {
        let edge = config.permitted_edges[0];
        let frame = Rect::from_origin_size(config.default_origin, config.default_size);
        Self {
            config,
            container: None,
            frame,
            edge,
            state: StateMachine::default(),
            action_items: Vec::new(),
            drag: DragTracker::new(),
            observers: ObserverRegistry::new(),
            outbox: VecDeque::new(),
            pending: VecDeque::new(),
        }
    }

    // --- Queries ---

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn is_displayed(&self) -> bool {
        self.container.is_some()
    }

    pub fn container_bounds(&self) -> Option<Rect> {
        self.container
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn origin(&self) -> Point {
        self.frame.origin()
    }

    pub fn size(&self) -> Size {
        self.frame.size()
    }

    pub fn edge(&self) -> EdgeAlignment {
        self.edge
    }

    pub fn state(&self) -> WidgetState {
        self.state.current()
    }

    pub fn preferred_expanded_state(&self) -> WidgetState {
        self.state.preferred_expanded()
    }

    pub fn layout_axis(&self) -> LayoutAxis {
        self.edge.layout_axis()
    }

    pub fn accessory_position(&self) -> AccessoryPosition {
        self.edge.accessory_position()
    }

    pub fn chevron(&self) -> ChevronDirection {
        ChevronDirection::for_state(self.state.current(), self.edge)
    }

    pub fn action_items(&self) -> &[ActionType] {
        &self.action_items
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Distances from the frame to each side of the container.
    pub fn edge_distances(&self) -> Option<EdgeDistances> {
        self.container
            .map(|bounds| geometry::edge_distances(self.frame, bounds))
    }

    /// Snapshot of the current layout.
    pub fn layout(&self) -> OverlayLayout {
        OverlayLayout {
            frame: self.frame,
            edge: self.edge,
            state: self.state.current(),
            preferred_expanded_state: self.state.preferred_expanded(),
            layout_axis: self.layout_axis(),
            accessory_position: self.accessory_position(),
            chevron: self.chevron(),
            action_items: self.action_items.clone(),
            dragging: self.drag.is_dragging(),
        }
    }

    // --- Observers ---

    pub fn subscribe(&mut self, observer: impl OverlayObserver + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Drain every event emitted since the last poll.
    pub fn poll_events(&mut self) -> Vec<OverlayEvent> {
        self.pending.drain(..).collect()
    }

    // --- Lifecycle ---

    /// Attach to a container and reset to the given edge and state.
    ///
    /// The overlay starts at the configured default frame; the state's own
    /// size is applied on the first transition or release.
    pub fn display(&mut self, bounds: Rect, edge: EdgeAlignment, state: WidgetState) {
        log::debug!("Displaying overlay in {:?} at {} ({})", bounds, edge, state);
        self.container = Some(bounds);
        self.drag.reset();
        self.frame = Rect::from_origin_size(self.config.default_origin, self.config.default_size);
        self.state = StateMachine::new(state);
        self.action_items = state.action_items().to_vec();
        self.align_inner(edge, true);
        self.flush();
    }

    /// Attach docked left and collapsed.
    pub fn display_with_defaults(&mut self, bounds: Rect) {
        self.display(bounds, EdgeAlignment::Left, WidgetState::Collapsed);
    }

    /// Detach from the container, dropping any drag in progress.
    pub fn dismiss(&mut self) {
        log::debug!("Dismissing overlay");
        self.container = None;
        self.drag.reset();
    }

    /// Update the container's safe bounds, e.g. after a rotation.
    ///
    /// The overlay stays on its edge and is pulled back inside the new
    /// bounds. `None` means the geometry is no longer known.
    pub fn set_container_bounds(&mut self, bounds: Option<Rect>) {
        match bounds {
            Some(bounds) => {
                self.container = Some(bounds);
                self.relayout();
            }
            None => {
                log::warn!("Container geometry removed, overlay will not move");
                self.container = None;
            }
        }
    }

    // --- Input ---

    /// Handle one phase of a drag gesture.
    pub fn handle_drag(&mut self, event: DragEvent) {
        match self.drag.handle(event, self.frame, self.container) {
            DragOutcome::Moved(origin) => self.frame = self.frame.with_origin(origin),
            DragOutcome::Released => self.snap_to_nearest_edge(),
            DragOutcome::Started => {
                log::debug!("Drag started at {:?}", event.location);
            }
            DragOutcome::AlreadyDragging | DragOutcome::Ignored => {}
        }
        self.flush();
    }

    /// Handle a raw pointer event, for hosts without a gesture recognizer.
    pub fn handle_pointer(&mut self, event: &PointerEvent) {
        if let Some(drag_event) = self.drag.translate_pointer(event) {
            self.handle_drag(drag_event);
        }
    }

    pub fn tap(&mut self, target: TapTarget) {
        match target {
            TapTarget::Toggle => self.toggle(),
            TapTarget::Action(action) => self.select_action(action),
        }
    }

    /// Tap on the expand/collapse affordance.
    pub fn toggle(&mut self) {
        self.toggle_inner();
        self.flush();
    }

    /// Tap on an action item.
    ///
    /// The selection is forwarded to observers and decides which expanded
    /// variant the toggle opens into next. It does not change the state.
    pub fn select_action(&mut self, action: ActionType) {
        self.select_action_inner(action);
        self.flush();
    }

    /// Tap on an action item identified by its integer view tag.
    pub fn tap_action_tag(&mut self, tag: i64) {
        match ActionType::from_tag(tag) {
            Some(action) => self.select_action(action),
            None => log::warn!("Ignoring tap on unknown action tag {}", tag),
        }
    }

    // --- Host requests ---

    /// Enter `state`: swap the action items, resize and re-dock.
    pub fn update_state(&mut self, state: WidgetState) {
        self.enter_state(state, true);
        self.flush();
    }

    /// Choose which expanded variant the toggle opens into.
    pub fn set_preferred_expanded_state(&mut self, state: WidgetState) -> bool {
        self.state.set_preferred_expanded(state)
    }

    /// Snap to `edge`, or to the first permitted edge if it is forbidden.
    pub fn align_to(&mut self, edge: EdgeAlignment) {
        self.align_inner(edge, true);
        self.flush();
    }

    /// Snap to the current edge again.
    pub fn realign(&mut self) {
        self.align_to(self.edge);
    }

    // --- Internals ---

    fn bounds_or_warn(&self, operation: &str) -> Option<Rect> {
        if self.container.is_none() {
            log::warn!("Cannot {}: container geometry is missing", operation);
        }
        self.container
    }

    fn align_inner(&mut self, to: EdgeAlignment, notify: bool) {
        let Some(bounds) = self.bounds_or_warn("align") else {
            return;
        };
        let result = edge::align(
            to,
            self.frame.origin(),
            self.frame.size(),
            bounds,
            &self.config.permitted_edges,
        );
        if !geometry::fits_within(self.frame.size(), bounds) {
            log::warn!(
                "Overlay {:?} is larger than its container {:?}",
                self.frame.size(),
                bounds.size()
            );
        }
        self.frame = geometry::clamp_rect_origin(self.frame.with_origin(result.origin), bounds);
        self.edge = result.edge;
        log::debug!("Aligned to {} at {:?}", result.edge, self.frame.origin());
        if notify {
            self.emit(OverlayEvent::EdgeChanged(result.edge));
        }
    }

    /// Re-dock to the current edge without notifying.
    fn relayout(&mut self) {
        self.align_inner(self.edge, false);
    }

    fn snap_to_nearest_edge(&mut self) {
        let Some(bounds) = self.bounds_or_warn("snap") else {
            return;
        };
        let relative = self.frame.origin() - bounds.origin().to_vec2();
        let edge = edge::select_edge(
            relative,
            self.frame.size(),
            bounds.size(),
            self.config.attraction_radius,
        );
        log::debug!("Released at {:?}, snapping to {}", self.frame.origin(), edge);
        self.align_inner(edge, true);
        // The edge decides the layout axis, so the state is re-applied too.
        self.enter_state(self.state.current(), false);
    }

    fn enter_state(&mut self, state: WidgetState, notify: bool) {
        let transition = self.state.enter(state);
        self.action_items.retain(|item| !transition.detached.contains(item));
        self.action_items.extend_from_slice(transition.attached);

        let size = self.config.size_for(state);
        self.frame = Rect::from_origin_size(self.frame.origin(), size);
        self.relayout();

        log::debug!(
            "State {} -> {} ({:?})",
            transition.from,
            transition.to,
            self.chevron()
        );
        if notify {
            self.emit(OverlayEvent::StateChanged(state));
        }
    }

    fn toggle_inner(&mut self) {
        let target = self.state.toggle_target();
        self.enter_state(target, true);
    }

    fn select_action_inner(&mut self, action: ActionType) {
        if !self.action_items.contains(&action) {
            log::warn!(
                "Ignoring action '{}': not shown while {}",
                action,
                self.state.current()
            );
            return;
        }
        self.state.record_action(action);
        self.emit(OverlayEvent::ActionSelected(action));
    }

    fn emit(&mut self, event: OverlayEvent) {
        self.outbox.push_back(event);
    }

    fn apply(&mut self, command: OverlayCommand) {
        match command {
            OverlayCommand::SetState(state) => self.enter_state(state, true),
            OverlayCommand::SetPreferredExpandedState(state) => {
                self.state.set_preferred_expanded(state);
            }
            OverlayCommand::Align(edge) => self.align_inner(edge, true),
            OverlayCommand::RealignToCurrentEdge => self.align_inner(self.edge, true),
            OverlayCommand::Toggle => self.toggle_inner(),
        }
    }

    /// Deliver queued events, then run the commands observers returned.
    ///
    /// After `MAX_DISPATCH_ROUNDS` events the remaining queued events are
    /// still delivered, but further commands are dropped, so every applied
    /// transition is notified.
    fn flush(&mut self) {
        let mut rounds = 0;
        while let Some(event) = self.outbox.pop_front() {
            rounds += 1;

            if self.pending.len() == MAX_PENDING_EVENTS {
                self.pending.pop_front();
            }
            self.pending.push_back(event);

            let commands = self.observers.dispatch(&event);
            if rounds >= MAX_DISPATCH_ROUNDS {
                if !commands.is_empty() {
                    log::error!(
                        "Observer feedback loop: dropping {} commands after {:?}",
                        commands.len(),
                        event
                    );
                }
                continue;
            }
            for command in commands {
                self.apply(command);
            }
        }
    }
}
