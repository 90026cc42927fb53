//! Uniform success/failure envelopes returned by every service call.
//!
//! `success` is the only reliable failure signal. Callers must not infer
//! failure from a missing `data` field, because deletes succeed without one.

use serde::{Deserialize, Deserializer, Serialize};

use crate::{Page, PageInfo};

/// Single-record (or no-record) service response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Envelope<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Human-readable outcome message, suitable for a toast.
    #[serde(default)]
    pub message: String,
    /// Payload on success, when the call returns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Successful response carrying `data`.
    #[must_use]
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful response with no payload.
    #[must_use]
    pub fn done(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    /// Failed response.
    ///
    /// # Examples
    /// ```
    /// use pagination::Envelope;
    ///
    /// let envelope: Envelope<u32> = Envelope::failure("Customer not found");
    /// assert!(!envelope.success);
    /// assert!(envelope.data.is_none());
    /// ```
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }

    /// Transform the payload while keeping the outcome and message.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Envelope<U> {
        Envelope {
            success: self.success,
            message: self.message,
            data: self.data.map(f),
        }
    }

    /// Collapse into a result, treating `success: false` as the error.
    ///
    /// # Errors
    /// Returns the envelope message when `success` is false.
    pub fn into_result(self) -> Result<Option<T>, String> {
        if self.success {
            Ok(self.data)
        } else {
            Err(self.message)
        }
    }
}

/// Paged list response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListEnvelope<T> {
    /// Whether the call succeeded.
    pub success: bool,
    /// Human-readable outcome message.
    #[serde(default)]
    pub message: String,
    /// Rows on the requested page. Empty on failure.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    /// Page descriptor, present on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<PageInfo>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl<T> ListEnvelope<T> {
    /// Successful response for a sliced page.
    #[must_use]
    pub fn from_page(message: impl Into<String>, page: Page<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: page.items,
            pagination: Some(page.info),
        }
    }

    /// Successful response for an unpaged list.
    #[must_use]
    pub fn unpaged(message: impl Into<String>, data: Vec<T>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            pagination: None,
        }
    }

    /// Failed response with no rows.
    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: Vec::new(),
            pagination: None,
        }
    }

    /// Total row count reported by the service, falling back to the page
    /// length for unpaged responses.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.pagination.map_or_else(
            || u64::try_from(self.data.len()).unwrap_or(u64::MAX),
            |info| info.total,
        )
    }
}
