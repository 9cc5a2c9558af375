//! User-facing notifications
//!
//! Fetch and publish completions never touch the UI directly; they report
//! through the `Notifier` capability so tests can substitute a recording
//! stub. The real implementation backs onto the status bar and keeps the
//! full text of the last error around for the details overlay.

use crate::fetch::FetchOutcome;
use crate::state::status_bar::{StatusBarState, StatusKind, StatusMessage};

/// Full text of the most recent error, kept for the details overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub title: String,
    pub message: String,
}

/// Capability to raise user-visible reports.
pub trait Notifier {
    /// A failure: short form in the status line, full text retained for
    /// the details view.
    fn report_error(&mut self, title: &str, message: &str);
    /// A completed operation.
    fn report_success(&mut self, title: &str);
    /// A neutral informational message.
    fn report_info(&mut self, message: &str);
    /// An operation has started.
    fn report_running(&mut self, message: &str);
}

/// Notifier backed by the status bar.
#[derive(Debug, Default)]
pub struct StatusBarNotifier {
    pub status_bar: StatusBarState,
    pub last_error: Option<ErrorReport>,
}

impl Notifier for StatusBarNotifier {
    fn report_error(&mut self, title: &str, message: &str) {
        log::error!("{}: {}", title, message);
        self.status_bar.push(StatusMessage::new(
            StatusKind::Error,
            format!("{title} (press e for details)"),
        ));
        self.last_error = Some(ErrorReport {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn report_success(&mut self, title: &str) {
        log::info!("{}", title);
        self.status_bar
            .push(StatusMessage::new(StatusKind::Success, title));
    }

    fn report_info(&mut self, message: &str) {
        log::info!("{}", message);
        self.status_bar
            .push(StatusMessage::new(StatusKind::Info, message));
    }

    fn report_running(&mut self, message: &str) {
        log::info!("{}", message);
        self.status_bar
            .push(StatusMessage::new(StatusKind::Running, message));
    }
}

/// Reports the outcome of a finished load. Only a failure of the current
/// load reaches the user; stale and cancelled responses stay invisible.
pub fn report_fetch_outcome(outcome: &FetchOutcome, error_title: &str, notifier: &mut dyn Notifier) {
    if let FetchOutcome::Failed(err) = outcome {
        notifier.report_error(error_title, &err.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sg_client::ClientError;

    /// Records reports instead of showing them.
    #[derive(Debug, Default)]
    pub struct RecordingNotifier {
        pub errors: Vec<(String, String)>,
        pub successes: Vec<String>,
    }

    impl Notifier for RecordingNotifier {
        fn report_error(&mut self, title: &str, message: &str) {
            self.errors.push((title.to_string(), message.to_string()));
        }

        fn report_success(&mut self, title: &str) {
            self.successes.push(title.to_string());
        }

        fn report_info(&mut self, _message: &str) {}

        fn report_running(&mut self, _message: &str) {}
    }

    #[test]
    fn test_only_failures_reach_the_notifier() {
        let mut notifier = RecordingNotifier::default();

        report_fetch_outcome(&FetchOutcome::Applied, "Failed to load", &mut notifier);
        report_fetch_outcome(&FetchOutcome::Stale, "Failed to load", &mut notifier);
        report_fetch_outcome(&FetchOutcome::Cancelled, "Failed to load", &mut notifier);
        assert!(notifier.errors.is_empty());

        report_fetch_outcome(
            &FetchOutcome::Failed(ClientError::Api("boom".to_string())),
            "Failed to load",
            &mut notifier,
        );
        assert_eq!(notifier.errors.len(), 1);
        assert_eq!(notifier.errors[0].0, "Failed to load");
        assert_eq!(notifier.errors[0].1, "graphql error: boom");
    }

    #[test]
    fn test_status_bar_notifier_keeps_full_error_text() {
        let mut notifier = StatusBarNotifier::default();
        notifier.report_error("Failed to load batch changes", "api returned status 502: bad gateway");

        let latest = notifier.status_bar.latest().unwrap();
        assert_eq!(latest.kind, StatusKind::Error);
        assert!(latest.message.starts_with("Failed to load batch changes"));

        let report = notifier.last_error.as_ref().unwrap();
        assert_eq!(report.message, "api returned status 502: bad gateway");
    }

    #[test]
    fn test_success_does_not_disturb_last_error() {
        let mut notifier = StatusBarNotifier::default();
        notifier.report_error("Failed to publish changeset", "rejected");
        notifier.report_success("Changeset submitted for retry");

        assert_eq!(
            notifier.status_bar.latest().unwrap().kind,
            StatusKind::Success
        );
        // The overlay can still show the previous failure.
        assert!(notifier.last_error.is_some());
    }
}
