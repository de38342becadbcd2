//! Typed notifications for the host application.
//!
//! Observers are registered with [`ObserverRegistry::subscribe`] and removed
//! with [`ObserverRegistry::unsubscribe`]. They never mutate the overlay
//! directly; instead they answer a notification with commands, which the
//! overlay applies once every observer has seen the event.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::edge::EdgeAlignment;
use crate::state::{ActionType, WidgetState};

/// Notification fired by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OverlayEvent {
    StateChanged(WidgetState),
    EdgeChanged(EdgeAlignment),
    ActionSelected(ActionType),
}

/// Follow-up request an observer hands back to the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum OverlayCommand {
    /// Enter a state.
    SetState(WidgetState),
    /// Choose which expanded variant the toggle opens into.
    SetPreferredExpandedState(WidgetState),
    /// Snap to an edge.
    Align(EdgeAlignment),
    /// Snap to the current edge again.
    RealignToCurrentEdge,
    /// Behave as if the toggle affordance was tapped.
    Toggle,
}

/// Receiver of overlay notifications.
pub trait OverlayObserver {
    /// Handle an event, returning any commands to run afterwards.
    fn notify(&mut self, event: &OverlayEvent) -> Vec<OverlayCommand>;
}

/// Adapter turning a closure into an [`OverlayObserver`].
pub struct FnObserver<F>(F);

impl<F> OverlayObserver for FnObserver<F>
where
    F: FnMut(&OverlayEvent) -> Vec<OverlayCommand>,
{
    fn notify(&mut self, event: &OverlayEvent) -> Vec<OverlayCommand> {
        (self.0)(event)
    }
}

/// Wrap a closure as an observer.
pub fn observer_fn<F>(f: F) -> FnObserver<F>
where
    F: FnMut(&OverlayEvent) -> Vec<OverlayCommand>,
{
    FnObserver(f)
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(Uuid);

impl SubscriptionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Registered observers, notified in subscription order.
#[derive(Default)]
pub struct ObserverRegistry {
    observers: Vec<(SubscriptionId, Box<dyn OverlayObserver>)>,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn OverlayObserver>) -> SubscriptionId {
        let id = SubscriptionId::new();
        self.observers.push((id, observer));
        log::debug!("Observer {} subscribed", id);
        id
    }

    /// Remove an observer. Returns `false` if the id was unknown.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(existing, _)| *existing != id);
        let removed = self.observers.len() != before;
        if removed {
            log::debug!("Observer {} unsubscribed", id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Deliver an event to every observer and collect their commands.
    pub fn dispatch(&mut self, event: &OverlayEvent) -> Vec<OverlayCommand> {
        let mut commands = Vec::new();
        for (_, observer) in &mut self.observers {
            commands.extend(observer.notify(event));
        }
        commands
    }
}

impl fmt::Debug for ObserverRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverRegistry")
            .field("observers", &self.observers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_subscribe_and_dispatch_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ObserverRegistry::new();

        for name in ["first", "second"] {
            let seen = Rc::clone(&seen);
            registry.subscribe(Box::new(observer_fn(move |event| {
                seen.borrow_mut().push((name, *event));
                Vec::new()
            })));
        }

        registry.dispatch(&OverlayEvent::EdgeChanged(EdgeAlignment::Top));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "first");
        assert_eq!(seen[1].1, OverlayEvent::EdgeChanged(EdgeAlignment::Top));
    }

    #[test]
    fn test_unsubscribe() {
        let mut registry = ObserverRegistry::new();
        let id = registry.subscribe(Box::new(observer_fn(|_| Vec::new())));
        assert_eq!(registry.len(), 1);
        assert!(registry.unsubscribe(id));
        assert!(registry.is_empty());
        assert!(!registry.unsubscribe(id));
    }

    #[test]
    fn test_subscription_id_display() {
        let mut registry = ObserverRegistry::new();
        let a = registry.subscribe(Box::new(observer_fn(|_| Vec::new())));
        let b = registry.subscribe(Box::new(observer_fn(|_| Vec::new())));
        let text = a.to_string();
        assert_eq!(text.len(), 36);
        assert_eq!(text.matches('-').count(), 4);
        assert_ne!(text, b.to_string());
    }

    #[test]
    fn test_dispatch_collects_commands() {
        let mut registry = ObserverRegistry::new();
        registry.subscribe(Box::new(observer_fn(|event| match event {
            OverlayEvent::ActionSelected(_) => vec![OverlayCommand::RealignToCurrentEdge],
            _ => Vec::new(),
        })));
        registry.subscribe(Box::new(observer_fn(|_| vec![OverlayCommand::Toggle])));

        let commands = registry.dispatch(&OverlayEvent::ActionSelected(ActionType::Start));
        assert_eq!(
            commands,
            vec![OverlayCommand::RealignToCurrentEdge, OverlayCommand::Toggle]
        );
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&OverlayEvent::StateChanged(WidgetState::ExpandedLarge)).unwrap();
        assert_eq!(json, r#"{"type":"state_changed","value":"expanded_large"}"#);
    }
}
