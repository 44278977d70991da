//! Events raised by widgets and consumed once per frame by the app.

use form_core::{Acknowledgement, FormAction};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Form(FormAction),
    DismissAcknowledgement,
    ToggleSettings,
}

impl UiEvent {
    pub fn name(&self) -> &'static str {
        match self {
            UiEvent::Form(action) => action.name(),
            UiEvent::DismissAcknowledgement => "dismiss_acknowledgement",
            UiEvent::ToggleSettings => "toggle_settings",
        }
    }
}

/// Modal notice waiting for the user to dismiss it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingNotice {
    pub acknowledgement: Acknowledgement,
}

impl PendingNotice {
    pub fn message(&self) -> &'static str {
        self.acknowledgement.message()
    }
}
