//! UI layer: app shell, display settings, and theme application.

pub mod app;
pub mod theme;

pub use app::DynamicFormApp;
