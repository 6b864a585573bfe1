use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder sent to the model when the body field is blank.
pub const EMPTY_BODY_PLACEHOLDER: &str = "No body provided";

/// Subject and body captured from the form at trigger time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDraft {
    pub subject: String,
    pub body: String,
}

impl EmailDraft {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }

    pub fn body_or_placeholder(&self) -> &str {
        if self.body.trim().is_empty() {
            EMPTY_BODY_PLACEHOLDER
        } else {
            &self.body
        }
    }
}

/// A classified email as kept in a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub id: i64,
    pub subject: String,
    pub body: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub reason: String,
}
