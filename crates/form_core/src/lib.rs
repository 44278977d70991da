//! Form session state, the action reducer, and the view-models the front ends draw from.

pub mod reducer;
pub mod render;
pub mod state;

pub use reducer::{reduce, Acknowledgement, FormAction, Outcome, Transition};
pub use render::{log_rows, render, render_state, FieldControl, LogRow, RenderedField};
pub use state::FormState;
