//! A host application's reaction to overlay notifications.

use floatdock_core::{
    ActionType, OverlayCommand, OverlayEvent, OverlayObserver, WidgetState,
};

/// Logs every notification and reacts to action selections: starting or
/// interrupting opens the large panel, stopping returns to the small one.
#[derive(Debug, Default)]
pub struct HostController {
    pub received: Vec<OverlayEvent>,
}

impl HostController {
    pub fn new() -> Self {
        Self::default()
    }

    fn state_for(action: ActionType) -> WidgetState {
        match action {
            ActionType::Start | ActionType::Interrupt => WidgetState::ExpandedLarge,
            ActionType::Stop => WidgetState::Expanded,
        }
    }
}

impl OverlayObserver for HostController {
    fn notify(&mut self, event: &OverlayEvent) -> Vec<OverlayCommand> {
        self.received.push(*event);
        match *event {
            OverlayEvent::StateChanged(state) => {
                log::info!("Overlay state changed to {}", state);
                Vec::new()
            }
            OverlayEvent::EdgeChanged(edge) => {
                log::info!("Overlay docked to {}", edge);
                Vec::new()
            }
            OverlayEvent::ActionSelected(action) => {
                log::info!("Action selected: {}", action);
                let state = Self::state_for(action);
                vec![
                    OverlayCommand::SetPreferredExpandedState(state),
                    OverlayCommand::SetState(state),
                    OverlayCommand::RealignToCurrentEdge,
                ]
            }
        }
    }
}
