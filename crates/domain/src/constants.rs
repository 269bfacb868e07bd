//! Domain constants

/// Title marker identifying a business-day event on the store calendar.
///
/// This is a salon-side convention, not a provider feature: staff title
/// open days "営業日 10:00-18:00" on the linked Google calendar. The check
/// is a plain substring match on the event title.
pub const BUSINESS_DAY_MARKER: &str = "営業日";

/// Calendar identifier used when the provider's calendar-list lookup fails.
pub const PRIMARY_CALENDAR_ID: &str = "primary";

/// Deadline applied to every outbound provider call.
pub const OUTBOUND_TIMEOUT_SECS: u64 = 10;

/// Maximum attempts for idempotent provider calls (initial try + retries).
pub const OUTBOUND_MAX_ATTEMPTS: usize = 3;

/// Settings scope holding platform-wide admin rows (OAuth client pair).
///
/// Not a store id; underscore keeps it out of the tenant id space.
pub const ADMIN_SCOPE: &str = "_admin";

/// Settings keys that may be written through the admin surface.
pub const SETTINGS_ALLOW_LIST: &[&str] = &[
    "google_oauth_client_id",
    "google_oauth_client_secret",
    "service_account_json",
    "line_channel_token",
];
