//! Persistent console notifications.
//!
//! Notifications change only through explicit mark-read and delete
//! operations. They never expire on their own.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::customer::UnknownVariant;
use super::query::QueryFilter;

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Informational.
    #[default]
    Info,
    /// Something completed.
    Success,
    /// Needs attention.
    Warning,
    /// Something failed.
    Error,
}

impl NotificationKind {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Self::Info),
            "success" => Ok(Self::Success),
            "warning" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            _ => Err(UnknownVariant::new("type", s)),
        }
    }
}

/// A notification shown in the notification centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Stable identifier.
    pub id: String,
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    /// Whether the operator has read it.
    pub read: bool,
    /// When it was raised.
    pub created_at: DateTime<Utc>,
}

/// Content of a new notification; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDraft {
    /// Short title.
    pub title: String,
    /// Body text.
    pub message: String,
    /// Severity.
    #[serde(rename = "type", default)]
    pub kind: NotificationKind,
}

/// Typed notification list filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NotificationFilter {
    /// Read state: `Some(false)` lists unread only.
    pub read: Option<bool>,
    /// Severity.
    pub kind: Option<NotificationKind>,
}

impl NotificationFilter {
    /// Whether `notification` passes every populated filter.
    pub fn matches(&self, notification: &Notification) -> bool {
        self.read.is_none_or(|read| notification.read == read)
            && self.kind.is_none_or(|kind| notification.kind == kind)
    }
}

impl QueryFilter for NotificationFilter {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(read) = self.read {
            pairs.push(("read", read.to_string()));
        }
        if let Some(kind) = self.kind {
            pairs.push(("type", kind.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for notification filters.
    use super::*;
    use rstest::rstest;

    fn notification(read: bool, kind: NotificationKind) -> Notification {
        Notification {
            id: "ntf-1".into(),
            title: "Payment received".into(),
            message: "SIP instalment credited".into(),
            kind,
            read,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
        }
    }

    #[rstest]
    #[case(NotificationFilter::default(), true)]
    #[case(NotificationFilter { read: Some(false), kind: None }, true)]
    #[case(NotificationFilter { read: Some(true), kind: None }, false)]
    #[case(NotificationFilter { read: None, kind: Some(NotificationKind::Error) }, false)]
    fn filter_matching(#[case] filter: NotificationFilter, #[case] expected: bool) {
        let unread_success = notification(false, NotificationKind::Success);
        assert_eq!(filter.matches(&unread_success), expected);
    }

    #[test]
    fn kind_serialises_under_type_key() {
        let value = serde_json::to_value(notification(true, NotificationKind::Warning))
            .expect("serialise");
        assert_eq!(value["type"], "warning");
        assert_eq!(value["createdAt"], "1970-01-01T00:00:00Z");
    }
}
