//! Top-level application state
//!
//! Everything the render pass and the key handler need lives here, owned by
//! the main thread. Background work only ever reaches this state through
//! events applied between frames.

use crate::notifier::StatusBarNotifier;
use crate::state::panel::PanelState;

pub struct AppState {
    /// False once the user quit; the main loop exits on the next frame.
    pub running: bool,
    /// The list panel: screen, loaded rows, cursor and filter.
    pub panel: PanelState,
    /// Status bar plus the retained last error.
    pub notifier: StatusBarNotifier,
    /// Whether the full-text error overlay is open.
    pub error_overlay: bool,
    /// Base URL of the Sourcegraph instance, for resolving relative paths.
    pub instance_url: String,
}

impl AppState {
    pub fn new(instance_url: String) -> Self {
        Self {
            running: true,
            panel: PanelState::default(),
            notifier: StatusBarNotifier::default(),
            error_overlay: false,
            instance_url,
        }
    }
}
