//! Console user model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A console operator.
///
/// Serialised with the `_id` key used across the REST surface, and persisted
/// under the `user` key of session storage in this shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable identifier.
    #[serde(rename = "_id")]
    pub id: String,
    /// Login handle.
    pub username: String,
    /// Email address used to sign in.
    pub email: String,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Role label, for example `admin`.
    pub role: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Name to greet the user with, falling back to the username.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use wealthdesk::domain::User;
    ///
    /// let now = Utc::now();
    /// let user = User {
    ///     id: "admin-1".into(),
    ///     username: "admin".into(),
    ///     email: "admin@example.com".into(),
    ///     first_name: Some("Super".into()),
    ///     last_name: Some("Admin".into()),
    ///     role: "admin".into(),
    ///     created_at: now,
    ///     updated_at: now,
    /// };
    /// assert_eq!(user.display_name(), "Super Admin");
    /// ```
    pub fn display_name(&self) -> String {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => format!("{first} {last}"),
            (Some(name), None) | (None, Some(name)) => name.to_owned(),
            (None, None) => self.username.clone(),
        }
    }
}
