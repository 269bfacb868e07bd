//! Calendar availability slots and OAuth redirect reason codes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::BUSINESS_DAY_MARKER;

/// A normalized busy/free interval derived from a provider event.
///
/// Computed per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub title: String,
    pub summary: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub is_business_day: bool,
}

impl AvailabilitySlot {
    /// Build a slot from raw event fields, deriving `is_business_day` from
    /// the title marker.
    pub fn from_event(
        title: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
        location: Option<String>,
        description: Option<String>,
    ) -> Self {
        let title = title.into();
        let is_business_day = is_business_day_title(&title);
        Self {
            summary: title.clone(),
            title,
            start_time,
            end_time,
            location,
            description,
            is_business_day,
        }
    }
}

/// True iff the event title carries the business-day marker.
///
/// Substring match on the title only; no other field participates.
pub fn is_business_day_title(title: &str) -> bool {
    title.contains(BUSINESS_DAY_MARKER)
}

/// Machine-readable reason codes carried in OAuth redirect URLs.
///
/// These are the only failure detail ever surfaced to the admin UI; raw
/// provider errors stay in the server log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OAuthReason {
    InvalidState,
    NoCode,
    Config,
    Exchange,
    NoRefreshToken,
    Encryption,
    Save,
    Local,
    Unauthorized,
    Forbidden,
    Server,
}

impl OAuthReason {
    /// Wire form used in `?google_calendar=error&message=<code>`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidState => "invalid_state",
            Self::NoCode => "no_code",
            Self::Config => "config",
            Self::Exchange => "exchange",
            Self::NoRefreshToken => "no_refresh_token",
            Self::Encryption => "encryption",
            Self::Save => "save",
            Self::Local => "local",
            Self::Unauthorized => "unauthorized",
            Self::Forbidden => "forbidden",
            Self::Server => "server",
        }
    }
}

impl std::fmt::Display for OAuthReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
