// Wizard state and step gating
use crate::domain::selection::DataSelection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WizardStep {
    DataSelection,
    Layout,
    Configure,
    Customize,
    Review,
}

impl WizardStep {
    fn index(self) -> usize {
        match self {
            Self::DataSelection => 0,
            Self::Layout => 1,
            Self::Configure => 2,
            Self::Customize => 3,
            Self::Review => 4,
        }
    }

    fn from_index(index: usize) -> Self {
        match index {
            0 => Self::DataSelection,
            1 => Self::Layout,
            2 => Self::Configure,
            3 => Self::Customize,
            _ => Self::Review,
        }
    }
}

/// One immutable snapshot of everything the wizard has collected. Services
/// replace the whole record on every change rather than mutating fields in
/// place.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub selection: Option<DataSelection>,
    #[serde(default)]
    pub dashboard_name: String,
    #[serde(default)]
    pub description: String,
    pub theme_id: Option<String>,
    pub layout_template_id: Option<String>,
    pub current_step: WizardStep,
    /// Latest step the user has ever reached; back-navigation to anything
    /// at or before it is always permitted.
    pub furthest_visited: WizardStep,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            selection: None,
            dashboard_name: String::new(),
            description: String::new(),
            theme_id: None,
            layout_template_id: None,
            current_step: WizardStep::DataSelection,
            furthest_visited: WizardStep::DataSelection,
        }
    }

    /// Gate for leaving `step` toward the next one.
    fn gate(&self, step: WizardStep) -> bool {
        match step {
            WizardStep::DataSelection => self
                .selection
                .as_ref()
                .is_some_and(DataSelection::is_complete),
            WizardStep::Layout => true,
            WizardStep::Configure | WizardStep::Customize => {
                !self.dashboard_name.trim().is_empty()
            }
            WizardStep::Review => false,
        }
    }

    /// Whether the user may move to `target`. Going back to any step already
    /// visited is always allowed, even with currently invalid state; going
    /// forward requires every intermediate gate to pass. Never errors - a
    /// blocked step simply renders disabled.
    pub fn can_advance(&self, target: WizardStep) -> bool {
        if target <= self.furthest_visited {
            return true;
        }
        if target <= self.current_step {
            return true;
        }
        (self.current_step.index()..target.index())
            .all(|step| self.gate(WizardStep::from_index(step)))
    }

    /// Move to `target` if the gate allows it, tracking the furthest step
    /// reached. Returns the unchanged state otherwise.
    pub fn advance(mut self, target: WizardStep) -> Self {
        if self.can_advance(target) {
            self.current_step = target;
            self.furthest_visited = self.furthest_visited.max(target);
        }
        self
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}
