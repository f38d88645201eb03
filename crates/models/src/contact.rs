use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::errors::ModelError;

pub const EMPTY_FIELDS_MESSAGE: &str = "All fields are required and cannot be empty";

/// Lifecycle state of a contact message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    New,
    Read,
    Resolved,
    Archived,
}

impl MessageStatus {
    pub const ALL: [MessageStatus; 4] = [Self::New, Self::Read, Self::Resolved, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Resolved => "resolved",
            Self::Archived => "archived",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ModelError> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str() == raw)
            .ok_or_else(|| ModelError::InvalidStatus(raw.to_string()))
    }

    /// `new, read, resolved, archived`
    pub fn allowed_list() -> String {
        Self::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>().join(", ")
    }
}

impl fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Contact form as submitted by the frontend.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContactFormData {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFormData {
    /// Email syntax is checked first, so a blank email is an `InvalidEmail`
    /// rather than an empty-field error.
    pub fn validate(&self) -> Result<(), ModelError> {
        if !is_valid_email(self.email.trim()) {
            return Err(ModelError::InvalidEmail(self.email.clone()));
        }
        let fields = [&self.name, &self.subject, &self.message];
        if fields.iter().any(|f| f.trim().is_empty()) {
            return Err(ModelError::Validation(EMPTY_FIELDS_MESSAGE.into()));
        }
        Ok(())
    }
}

/// Syntactic address check: one `@`, non-empty local part, dotted domain, no whitespace.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || !domain.contains('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_alphanumeric() || c == '-')
    })
}

/// Characters the Realtime Database forbids in keys.
const FORBIDDEN_KEY_CHARS: [char; 6] = ['.', '$', '#', '[', ']', '/'];

/// Message ids are single database keys: non-empty, no `. $ # [ ] /`, no control characters.
pub fn validate_message_id(id: &str) -> Result<(), ModelError> {
    let bad = id.is_empty()
        || id.chars().any(|c| FORBIDDEN_KEY_CHARS.contains(&c) || c.is_control());
    if bad {
        return Err(ModelError::InvalidKey(id.to_string()));
    }
    Ok(())
}

/// Stored contact message record.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub id: String,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub timestamp: String,
    #[serde(default)]
    pub status: MessageStatus,
}

impl ContactMessage {
    /// New record with a fresh UUID and the current UTC time.
    pub fn from_form(form: ContactFormData) -> Self {
        Self::from_form_at(form, Uuid::new_v4(), Utc::now())
    }

    pub fn from_form_at(form: ContactFormData, id: Uuid, at: DateTime<Utc>) -> Self {
        Self {
            id: id.to_string(),
            name: form.name,
            email: form.email,
            subject: form.subject,
            message: form.message,
            timestamp: format_timestamp(at),
            status: MessageStatus::New,
        }
    }
}

/// ISO-8601 with millisecond precision and a `Z` suffix.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Fields that may be patched on an existing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: MessageStatus,
}

pub const PATCHABLE_FIELDS: [&str; 1] = ["status"];

impl StatusUpdate {
    /// Validate a raw PATCH body. Keys other than `status` are dropped.
    pub fn from_payload(payload: &Value) -> Result<Self, ModelError> {
        let obj = match payload {
            Value::Object(map) if !map.is_empty() => map,
            _ => {
                return Err(ModelError::Validation(
                    "Invalid payload format. Expected a JSON object with fields to update.".into(),
                ))
            }
        };
        let raw = obj.get("status").ok_or_else(|| {
            ModelError::Validation(format!(
                "Only fields {} can be updated via this endpoint.",
                PATCHABLE_FIELDS.join(", ")
            ))
        })?;
        let status = raw
            .as_str()
            .ok_or_else(|| ModelError::InvalidStatus(raw.to_string()))
            .and_then(MessageStatus::parse)?;
        Ok(Self { status })
    }

    pub fn to_fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("status".into(), Value::String(self.status.as_str().into()));
        fields
    }
}
