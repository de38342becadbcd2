//! Overlay visual states, action items and the toggle state machine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::edge::EdgeAlignment;
use crate::error::ParseTagError;

/// Visual/interaction state of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    #[default]
    Collapsed,
    Expanded,
    ExpandedLarge,
}

/// Operation offered by an expanded overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Start,
    Interrupt,
    Stop,
}

/// Logical facing of the toggle chevron.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChevronDirection {
    Forward,
    Backward,
}

const NO_ACTIONS: &[ActionType] = &[];
const EXPANDED_ACTIONS: &[ActionType] = &[ActionType::Start];
const EXPANDED_LARGE_ACTIONS: &[ActionType] = &[ActionType::Interrupt, ActionType::Stop];

impl WidgetState {
    pub fn is_expanded(self) -> bool {
        matches!(self, WidgetState::Expanded | WidgetState::ExpandedLarge)
    }

    /// Action items attached while in this state.
    pub fn action_items(self) -> &'static [ActionType] {
        match self {
            WidgetState::Collapsed => NO_ACTIONS,
            WidgetState::Expanded => EXPANDED_ACTIONS,
            WidgetState::ExpandedLarge => EXPANDED_LARGE_ACTIONS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WidgetState::Collapsed => "collapsed",
            WidgetState::Expanded => "expanded",
            WidgetState::ExpandedLarge => "expanded_large",
        }
    }
}

impl fmt::Display for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetState {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collapsed" => Ok(WidgetState::Collapsed),
            "expanded" => Ok(WidgetState::Expanded),
            "expanded_large" | "expandedlarge" => Ok(WidgetState::ExpandedLarge),
            _ => Err(ParseTagError::new("state", s)),
        }
    }
}

impl ActionType {
    pub const ALL: [ActionType; 3] = [ActionType::Start, ActionType::Interrupt, ActionType::Stop];

    /// Integer tag used by hosts that identify action items by view tag.
    pub fn tag(self) -> i64 {
        match self {
            ActionType::Start => 0,
            ActionType::Interrupt => 1,
            ActionType::Stop => 2,
        }
    }

    pub fn from_tag(tag: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.tag() == tag)
    }

    /// Expanded variant the toggle opens into after this action was selected.
    pub fn preferred_state(self) -> WidgetState {
        match self {
            ActionType::Start => WidgetState::ExpandedLarge,
            ActionType::Interrupt | ActionType::Stop => WidgetState::Expanded,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionType::Start => "start",
            ActionType::Interrupt => "interrupt",
            ActionType::Stop => "stop",
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ActionType {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "start" => Ok(ActionType::Start),
            "interrupt" => Ok(ActionType::Interrupt),
            "stop" => Ok(ActionType::Stop),
            _ => Err(ParseTagError::new("action", s)),
        }
    }
}

impl ChevronDirection {
    /// Chevron facing for a state while docked to `edge`.
    ///
    /// The chevron points away from the container centre: collapsed
    /// overlays point inward (forward) and expanded ones point back toward
    /// their edge. Docking on the right mirrors both.
    pub fn for_state(state: WidgetState, edge: EdgeAlignment) -> Self {
        let mirrored = edge == EdgeAlignment::Right;
        match (state.is_expanded(), mirrored) {
            (false, false) | (true, true) => ChevronDirection::Forward,
            (false, true) | (true, false) => ChevronDirection::Backward,
        }
    }
}

/// Outcome of entering a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: WidgetState,
    pub to: WidgetState,
    /// Action items removed from the previous state.
    pub detached: &'static [ActionType],
    /// Action items added for the new state.
    pub attached: &'static [ActionType],
}

/// Owns the current state and the preferred expanded variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateMachine {
    current: WidgetState,
    preferred_expanded: WidgetState,
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new(WidgetState::Collapsed)
    }
}

impl StateMachine {
    pub fn new(initial: WidgetState) -> Self {
        Self {
            current: initial,
            preferred_expanded: WidgetState::Expanded,
        }
    }

    pub fn current(&self) -> WidgetState {
        self.current
    }

    /// The expanded variant the toggle opens into from collapsed.
    pub fn preferred_expanded(&self) -> WidgetState {
        self.preferred_expanded
    }

    pub fn prefers_large(&self) -> bool {
        self.preferred_expanded == WidgetState::ExpandedLarge
    }

    /// Set the preferred expanded variant. Collapsed is not an expanded
    /// variant and is refused.
    pub fn set_preferred_expanded(&mut self, state: WidgetState) -> bool {
        if !state.is_expanded() {
            log::warn!("Ignoring preferred expanded state '{}'", state);
            return false;
        }
        self.preferred_expanded = state;
        true
    }

    /// Record an action selection; it decides which variant opens next.
    pub fn record_action(&mut self, action: ActionType) {
        self.preferred_expanded = action.preferred_state();
    }

    /// State a tap on the toggle affordance leads to.
    pub fn toggle_target(&self) -> WidgetState {
        if self.current.is_expanded() {
            WidgetState::Collapsed
        } else {
            self.preferred_expanded
        }
    }

    /// Enter `state`, reporting which action items change.
    pub fn enter(&mut self, state: WidgetState) -> Transition {
        let from = self.current;
        self.current = state;
        Transition {
            from,
            to: state,
            detached: from.action_items(),
            attached: state.action_items(),
        }
    }
}
