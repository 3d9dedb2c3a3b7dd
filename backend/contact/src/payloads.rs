use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::NewContact;

pub const MISSING_FIELDS_MESSAGE: &str = "Please provide all fields";
pub const SAVED_MESSAGE: &str = "Contact information saved successfully";
pub const SERVER_ERROR_MESSAGE: &str = "Server error, please try again later";
pub const MALFORMED_PAYLOAD_MESSAGE: &str = "Request body must be a JSON object";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Phone,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Name, Field::Email, Field::Phone];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Phone => "phone",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that were absent or empty, in `name, email, phone` order.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing fields: {}", display_fields(.0))]
pub struct MissingField(pub Vec<Field>);

fn display_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ContactRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            email: Some(email.into()),
            phone: Some(phone.into()),
        }
    }

    pub fn validate(self) -> Result<NewContact, MissingField> {
        let mut missing = Vec::new();

        let name = present(self.name, Field::Name, &mut missing);
        let email = present(self.email, Field::Email, &mut missing);
        let phone = present(self.phone, Field::Phone, &mut missing);

        match (name, email, phone) {
            (Some(name), Some(email), Some(phone)) => Ok(NewContact { name, email, phone }),
            _ => Err(MissingField(missing)),
        }
    }
}

fn present(value: Option<String>, field: Field, missing: &mut Vec<Field>) -> Option<String> {
    match value {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            missing.push(field);
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ContactResponse {
    pub fn created(id: impl Into<String>) -> Self {
        Self {
            success: true,
            message: SAVED_MESSAGE.to_string(),
            id: Some(id.into()),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            id: None,
        }
    }
}
