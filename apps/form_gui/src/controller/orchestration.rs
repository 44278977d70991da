//! Queues widget events for the next frame's reduction pass.

use crossbeam_channel::{Sender, TrySendError};

use crate::controller::events::UiEvent;

pub fn dispatch_ui_event(event_tx: &Sender<UiEvent>, event: UiEvent, status: &mut String) {
    let event_name = event.name();
    match event_tx.try_send(event) {
        Ok(()) => tracing::debug!(event = event_name, "queued ui event"),
        Err(TrySendError::Full(_)) => {
            *status = "UI event queue is full; please retry".to_string();
            tracing::warn!(event = event_name, "ui event queue is full");
        }
        Err(TrySendError::Disconnected(_)) => {
            *status = "UI event queue disconnected; restart the application".to_string();
            tracing::error!(event = event_name, "ui event queue disconnected");
        }
    }
}
