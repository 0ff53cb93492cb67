use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A complaint as stored by the remote service.
///
/// `id` is assigned by the server. Entries are taken as the server sends
/// them: absent or null text fields become empty strings, a missing id
/// becomes 0 and `created_at` keeps the raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Complaint {
    #[serde(
        rename = "Id",
        alias = "id",
        default,
        deserialize_with = "lenient::id"
    )]
    pub id: i64,
    #[serde(
        rename = "Title",
        alias = "title",
        default,
        deserialize_with = "lenient::string"
    )]
    pub title: String,
    #[serde(
        rename = "Body",
        alias = "body",
        default,
        deserialize_with = "lenient::string"
    )]
    pub body: String,
    #[serde(
        rename = "CreatedAt",
        alias = "createdAt",
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

/// Field decoders that accept whatever JSON the server puts there.
mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f as i64))
                .unwrap_or_default(),
            Value::String(s) => s.trim().parse().unwrap_or_default(),
            _ => 0,
        })
    }

    pub fn string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(optional_string(deserializer)?.unwrap_or_default())
    }

    pub fn optional_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::Null => None,
            Value::String(s) => Some(s),
            other => Some(other.to_string()),
        })
    }
}

impl Complaint {
    /// Parse `created_at` as RFC 3339, falling back to an ISO-8601 local
    /// date-time without offset.
    pub fn created_at_local(&self) -> Option<DateTime<Local>> {
        let raw = self.created_at.as_deref()?.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Local));
        }
        ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .and_then(|naive| Local.from_local_datetime(&naive).earliest())
    }

    /// Timestamp formatted for display. Unparseable values are shown as sent.
    pub fn created_at_display(&self) -> String {
        match self.created_at_local() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            None => self.created_at.clone().unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Fields of a draft, in form order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Body,
}

impl DraftField {
    pub fn as_str(&self) -> &str {
        match self {
            DraftField::Title => "Title",
            DraftField::Body => "Body",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The complaint being composed. Serializes to the `SaveComplain` request body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComplaintDraft {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Body")]
    pub body: String,
}

impl ComplaintDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// First field that is empty after trimming, if any.
    pub fn missing_field(&self) -> Option<DraftField> {
        if self.title.trim().is_empty() {
            Some(DraftField::Title)
        } else if self.body.trim().is_empty() {
            Some(DraftField::Body)
        } else {
            None
        }
    }

    /// Copy with surrounding whitespace removed from both fields.
    pub fn trimmed(&self) -> Self {
        Self::new(self.title.trim(), self.body.trim())
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.body.is_empty()
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.body.clear();
    }
}

/// Acknowledgement returned by `SaveComplain`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiResult {
    #[serde(rename = "Success", alias = "success")]
    pub success: bool,
    #[serde(
        rename = "Message",
        alias = "message",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub message: Option<String>,
}
