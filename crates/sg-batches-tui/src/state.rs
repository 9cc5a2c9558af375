//! Application state
//!
//! All mutable state is owned by the main thread and mutated either by key
//! handling or by applying completion events between frames.

pub mod app;
pub mod panel;
pub mod status_bar;

pub use app::AppState;
pub use panel::{BatchChangeRef, PanelState, Screen};
pub use status_bar::{StatusBarState, StatusKind, StatusMessage};
