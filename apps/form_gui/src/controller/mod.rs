//! Controller layer: UI events and their dispatch onto the per-frame event queue.

pub mod events;
pub mod orchestration;
