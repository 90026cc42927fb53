//! Transient feedback toasts and the notification centre.
//!
//! Toasts are short-lived: each one expires a fixed time after it was
//! raised. The notification centre is the persistent list behind the bell
//! icon, carrying the server's unread count.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use mockable::Clock;
use serde::Serialize;

use crate::domain::{Notification, NotificationKind};

/// How long a toast stays up, in milliseconds.
pub const DEFAULT_TOAST_LIFETIME_MS: i64 = 5_000;

/// Toast colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    /// Something completed.
    Success,
    /// Something failed.
    Error,
    /// Informational.
    Info,
    /// Needs attention.
    Warning,
}

/// One raised toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    /// Identifier, increasing in raise order.
    pub id: u64,
    /// Colour.
    pub kind: ToastKind,
    /// Text.
    pub message: String,
    /// When it disappears.
    pub expires_at: DateTime<Utc>,
}

/// Stack of visible toasts, oldest first.
#[derive(Clone)]
pub struct Toaster {
    clock: Arc<dyn Clock>,
    lifetime: TimeDelta,
    next_id: u64,
    toasts: VecDeque<Toast>,
}

impl std::fmt::Debug for Toaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toaster")
            .field("lifetime", &self.lifetime)
            .field("toasts", &self.toasts)
            .finish_non_exhaustive()
    }
}

impl Toaster {
    /// Empty stack using [`DEFAULT_TOAST_LIFETIME_MS`].
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self::with_lifetime(clock, TimeDelta::milliseconds(DEFAULT_TOAST_LIFETIME_MS))
    }

    /// Empty stack whose toasts live for `lifetime`.
    pub fn with_lifetime(clock: Arc<dyn Clock>, lifetime: TimeDelta) -> Self {
        Self {
            clock,
            lifetime,
            next_id: 1,
            toasts: VecDeque::new(),
        }
    }

    /// Raise a toast and return its id.
    pub fn push(&mut self, kind: ToastKind, message: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.toasts.push_back(Toast {
            id,
            kind,
            message: message.into(),
            expires_at: self.clock.utc() + self.lifetime,
        });
        id
    }

    /// Raise a success toast.
    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Success, message)
    }

    /// Raise an error toast.
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.push(ToastKind::Error, message)
    }

    /// Close a toast early.
    pub fn dismiss(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Toasts still visible now, dropping expired ones.
    pub fn visible(&mut self) -> Vec<Toast> {
        let now = self.clock.utc();
        self.toasts.retain(|toast| toast.expires_at > now);
        self.toasts.iter().cloned().collect()
    }

    /// Most recent toast, expired or not.
    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.back()
    }
}

/// Notification row in the centre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationItem {
    /// Identifier.
    pub id: String,
    /// Severity.
    pub kind: NotificationKind,
    /// Title.
    pub title: String,
    /// Body.
    pub message: String,
    /// Age such as `2 hours ago`.
    pub time: String,
    /// Whether it has been read.
    pub read: bool,
}

/// Notification centre render model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationCentreView {
    /// Whether the popover is shown.
    pub open: bool,
    /// Badge count.
    pub unread: u64,
    /// Whether "Mark all as read" is offered.
    pub can_mark_all: bool,
    /// Recent notifications, newest first.
    pub items: Vec<NotificationItem>,
    /// Text when there is nothing to list.
    pub empty_message: Option<&'static str>,
}

/// Bell-icon popover listing recent notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationCentre {
    open: bool,
    unread: u64,
    recent: Vec<Notification>,
}

impl NotificationCentre {
    /// Closed, empty centre.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the listed notifications.
    pub fn set_recent(&mut self, recent: Vec<Notification>) {
        self.recent = recent;
    }

    /// Replace the badge count.
    pub fn set_unread(&mut self, unread: u64) {
        self.unread = unread;
    }

    /// Badge count.
    pub fn unread(&self) -> u64 {
        self.unread
    }

    /// Reflect a successful mark-read without refetching.
    pub fn mark_read(&mut self, id: &str) {
        if let Some(item) = self.recent.iter_mut().find(|item| item.id == id && !item.read) {
            item.read = true;
            self.unread = self.unread.saturating_sub(1);
        }
    }

    /// Reflect a successful mark-all-read without refetching.
    pub fn mark_all_read(&mut self) {
        for item in &mut self.recent {
            item.read = true;
        }
        self.unread = 0;
    }

    /// Show or hide the popover.
    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    /// Render model with ages measured from `now`.
    pub fn view(&self, now: DateTime<Utc>) -> NotificationCentreView {
        NotificationCentreView {
            open: self.open,
            unread: self.unread,
            can_mark_all: self.unread > 0,
            items: self
                .recent
                .iter()
                .map(|item| NotificationItem {
                    id: item.id.clone(),
                    kind: item.kind,
                    title: item.title.clone(),
                    message: item.message.clone(),
                    time: time_ago(item.created_at, now),
                    read: item.read,
                })
                .collect(),
            empty_message: self.recent.is_empty().then_some("No notifications"),
        }
    }
}

/// Coarse age of `at` relative to `now`.
pub fn time_ago(at: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(at);
    let (count, unit) = if elapsed.num_days() > 0 {
        (elapsed.num_days(), "day")
    } else if elapsed.num_hours() > 0 {
        (elapsed.num_hours(), "hour")
    } else if elapsed.num_minutes() > 0 {
        (elapsed.num_minutes(), "minute")
    } else {
        return "just now".to_owned();
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use mockable::MockClock;
    use rstest::rstest;

    use super::*;

    fn at(hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, hour, minute, second)
            .single()
            .expect("timestamp")
    }

    fn clock_reading(times: Vec<DateTime<Utc>>) -> Arc<dyn Clock> {
        let mut clock = MockClock::new();
        let mut times = times.into_iter();
        clock
            .expect_utc()
            .returning(move || times.next().expect("clock reading"));
        Arc::new(clock)
    }

    #[test]
    fn toasts_expire_after_their_lifetime() {
        let clock = clock_reading(vec![at(9, 0, 0), at(9, 0, 2), at(9, 0, 4), at(9, 0, 6)]);
        let mut toaster = Toaster::new(clock);
        toaster.success("Customer deleted successfully");
        toaster.error("Failed to fetch customers");

        assert_eq!(toaster.visible().len(), 2);
        let remaining = toaster.visible();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].kind, ToastKind::Error);
    }

    #[test]
    fn dismiss_removes_one_toast() {
        let clock = clock_reading(vec![at(9, 0, 0), at(9, 0, 0), at(9, 0, 1)]);
        let mut toaster = Toaster::new(clock);
        let first = toaster.success("one");
        toaster.success("two");
        toaster.dismiss(first);
        let visible = toaster.visible();
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].message, "two");
    }

    fn notification(id: &str, read: bool) -> Notification {
        Notification {
            id: id.into(),
            title: "System update".into(),
            message: "Tonight at 2 AM".into(),
            kind: NotificationKind::Info,
            read,
            created_at: at(7, 0, 0),
        }
    }

    #[test]
    fn marking_read_updates_badge_once() {
        let mut centre = NotificationCentre::new();
        centre.set_recent(vec![notification("n1", false), notification("n2", true)]);
        centre.set_unread(1);

        centre.mark_read("n1");
        centre.mark_read("n1");
        centre.mark_read("n2");
        let view = centre.view(at(9, 0, 0));
        assert_eq!(view.unread, 0);
        assert!(!view.can_mark_all);
        assert_eq!(view.items[0].time, "2 hours ago");
    }

    #[test]
    fn empty_centre_says_so() {
        let view = NotificationCentre::new().view(at(9, 0, 0));
        assert_eq!(view.empty_message, Some("No notifications"));
    }

    #[rstest]
    #[case(at(8, 59, 30), "just now")]
    #[case(at(8, 59, 0), "1 minute ago")]
    #[case(at(6, 0, 0), "3 hours ago")]
    fn describes_age(#[case] raised: DateTime<Utc>, #[case] expected: &str) {
        assert_eq!(time_ago(raised, at(9, 0, 0)), expected);
    }
}
