//! Confirmation gate for destructive actions.

use serde::Serialize;

/// Colour of the confirm button.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Caution.
    #[default]
    Warning,
    /// Destructive.
    Error,
    /// Informational.
    Info,
}

/// What the dialog asks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    /// Heading.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Confirm button colour.
    pub severity: Severity,
    /// Confirm button text.
    pub confirm_text: String,
    /// Cancel button text.
    pub cancel_text: String,
}

impl ConfirmRequest {
    /// Warning prompt with the default button texts.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            severity: Severity::default(),
            confirm_text: "Confirm".to_owned(),
            cancel_text: "Cancel".to_owned(),
        }
    }

    /// Override the severity.
    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Override the button texts.
    #[must_use]
    pub fn buttons(mut self, confirm: impl Into<String>, cancel: impl Into<String>) -> Self {
        self.confirm_text = confirm.into();
        self.cancel_text = cancel.into();
        self
    }
}

/// How the dialog was dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome<P> {
    /// The user affirmed; the payload is handed back.
    Confirmed(P),
    /// Cancel button or backdrop.
    Cancelled,
}

/// Yes/no dialog carrying a payload until it is confirmed.
///
/// Confirming hands the payload back but leaves the dialog open so the
/// caller can keep it visible while the action runs.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<P> {
    pending: Option<(ConfirmRequest, P)>,
    open: bool,
}

impl<P> Default for ConfirmDialog<P> {
    fn default() -> Self {
        Self {
            pending: None,
            open: false,
        }
    }
}

impl<P: Clone> ConfirmDialog<P> {
    /// Closed dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `request`, replacing whatever was pending.
    pub fn open(&mut self, request: ConfirmRequest, payload: P) {
        self.pending = Some((request, payload));
        self.open = true;
    }

    /// Whether the dialog is shown.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Current prompt.
    pub fn request(&self) -> Option<&ConfirmRequest> {
        self.pending.as_ref().filter(|_| self.open).map(|(request, _)| request)
    }

    /// Affirm. Returns `None` when nothing is pending.
    pub fn confirm(&mut self) -> Option<ConfirmOutcome<P>> {
        if !self.open {
            return None;
        }
        self.pending
            .as_ref()
            .map(|(_, payload)| ConfirmOutcome::Confirmed(payload.clone()))
    }

    /// Dismiss without affirming.
    pub fn cancel(&mut self) -> Option<ConfirmOutcome<P>> {
        if !self.open {
            return None;
        }
        self.close();
        Some(ConfirmOutcome::Cancelled)
    }

    /// Hide the dialog and drop the payload.
    pub fn close(&mut self) {
        self.pending = None;
        self.open = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_warning_with_standard_buttons() {
        let request = ConfirmRequest::new("Delete customer", "Are you sure?");
        assert_eq!(request.severity, Severity::Warning);
        assert_eq!(request.confirm_text, "Confirm");
        assert_eq!(request.cancel_text, "Cancel");
    }

    #[test]
    fn confirm_returns_payload_and_stays_open() {
        let mut dialog = ConfirmDialog::new();
        dialog.open(ConfirmRequest::new("Delete", "Sure?"), "cust-1".to_owned());
        assert_eq!(dialog.confirm(), Some(ConfirmOutcome::Confirmed("cust-1".to_owned())));
        assert!(dialog.is_open());
        dialog.close();
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn cancel_closes_without_payload() {
        let mut dialog = ConfirmDialog::new();
        dialog.open(ConfirmRequest::new("Delete", "Sure?"), 7_u32);
        assert_eq!(dialog.cancel(), Some(ConfirmOutcome::Cancelled));
        assert!(!dialog.is_open());
        assert!(dialog.request().is_none());
    }

    #[test]
    fn reopening_replaces_request_and_payload() {
        let mut dialog = ConfirmDialog::new();
        dialog.open(ConfirmRequest::new("First", "one"), 1_u32);
        dialog.open(
            ConfirmRequest::new("Second", "two").severity(Severity::Error).buttons("Delete", "Keep"),
            2,
        );
        let request = dialog.request().expect("open");
        assert_eq!(request.title, "Second");
        assert_eq!(request.confirm_text, "Delete");
        assert_eq!(dialog.confirm(), Some(ConfirmOutcome::Confirmed(2)));
    }
}
