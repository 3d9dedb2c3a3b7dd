//! # Contact Records
//!
//! Shapes shared between the intake endpoint and the form client.
//!
//! ## Lifecycle
//! - A [`ContactRequest`] arrives as JSON, every field optional on the wire
//! - [`ContactRequest::validate`] turns it into a [`NewContact`] or a [`MissingField`]
//! - The store assigns the id and timestamp, producing a [`ContactSubmission`]
//!
//! Submissions are write-once. Nothing in this workspace reads them back, updates or deletes them.
//! Two identical requests are two records.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod payloads;

pub use payloads::{
    ContactRequest, ContactResponse, Field, MALFORMED_PAYLOAD_MESSAGE, MISSING_FIELDS_MESSAGE,
    MissingField, SAVED_MESSAGE, SERVER_ERROR_MESSAGE,
};

/// A request whose three fields are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewContact {
    pub fn into_submission(self, id: String, created_at: DateTime<Utc>) -> ContactSubmission {
        ContactSubmission {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_into_submission_keeps_fields() {
        let contact = NewContact {
            name: "Jane Doe".to_string(),
            email: "jane@x.com".to_string(),
            phone: "+1 555-0100".to_string(),
        };
        let created_at = Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap();

        let submission = contact.into_submission("abc".to_string(), created_at);

        assert_eq!(submission.id, "abc");
        assert_eq!(submission.name, "Jane Doe");
        assert_eq!(submission.email, "jane@x.com");
        assert_eq!(submission.phone, "+1 555-0100");
        assert_eq!(submission.created_at, created_at);
    }
}
