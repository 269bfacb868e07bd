//! Google OAuth2 + Calendar API client.
//!
//! Implements the `OAuthClient` port with plain form posts against the
//! Google token endpoint and JSON reads against the Calendar v3 API.
//! Token exchange, refresh and event listing ride the retrying
//! [`HttpClient`]; Google treats all three as replay-safe.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use reqwest::Method;
use reserva_core::{OAuthClient, OAuthCredentials, RawCalendarEvent, TokenExchange};
use reserva_domain::{ReservaError, Result};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::http::HttpClient;

const DEFAULT_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const DEFAULT_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

pub struct GoogleOAuthClient {
    http: HttpClient,
    auth_url: String,
    token_url: String,
    api_base: String,
    redirect_uri: String,
}

impl GoogleOAuthClient {
    pub fn new(http: HttpClient, redirect_uri: impl Into<String>) -> Self {
        Self {
            http,
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            redirect_uri: redirect_uri.into(),
        }
    }

    /// Point every endpoint at a test server.
    pub fn with_base_url(http: HttpClient, base: &str, redirect_uri: impl Into<String>) -> Self {
        Self {
            http,
            auth_url: format!("{base}/auth"),
            token_url: format!("{base}/token"),
            api_base: format!("{base}/calendar/v3"),
            redirect_uri: redirect_uri.into(),
        }
    }
}

#[async_trait]
impl OAuthClient for GoogleOAuthClient {
    fn consent_url(&self, client_id: &str, state: &str) -> Result<String> {
        let mut url = Url::parse(&self.auth_url)
            .map_err(|e| ReservaError::Config(format!("invalid auth endpoint: {e}")))?;
        url.query_pairs_mut()
            .append_pair("client_id", client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("response_type", "code")
            .append_pair("scope", CALENDAR_SCOPE)
            // Offline access plus forced re-consent so a refresh token is
            // issued even for repeat authorizations.
            .append_pair("access_type", "offline")
            .append_pair("prompt", "consent")
            .append_pair("state", state);
        Ok(url.into())
    }

    #[instrument(skip(self, creds, code))]
    async fn exchange_code(&self, creds: &OAuthCredentials, code: &str) -> Result<TokenExchange> {
        let builder = self.http.request(Method::POST, &self.token_url).form(&[
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("code", code),
            ("grant_type", "authorization_code"),
            ("redirect_uri", self.redirect_uri.as_str()),
        ]);

        let response = self.http.send(builder).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(%status, body, "token exchange rejected");
            return Err(ReservaError::Upstream("exchange".into()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|_| ReservaError::Upstream("exchange".into()))?;
        Ok(TokenExchange {
            access_token: token.access_token,
            refresh_token: token.refresh_token,
            expires_in: token.expires_in,
        })
    }

    #[instrument(skip(self, creds, refresh_token))]
    async fn refresh_access_token(
        &self,
        creds: &OAuthCredentials,
        refresh_token: &str,
    ) -> Result<String> {
        let builder = self.http.request(Method::POST, &self.token_url).form(&[
            ("client_id", creds.client_id.as_str()),
            ("client_secret", creds.client_secret.as_str()),
            ("refresh_token", refresh_token),
            ("grant_type", "refresh_token"),
        ]);

        let response = self.http.send(builder).await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            debug!(%status, body, "token refresh rejected");
            return Err(ReservaError::Upstream("refresh".into()));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|_| ReservaError::Upstream("refresh".into()))?;
        Ok(token.access_token)
    }

    #[instrument(skip(self, access_token))]
    async fn primary_calendar_id(&self, access_token: &str) -> Result<String> {
        let url = format!("{}/calendars/primary", self.api_base);
        let builder = self.http.request(Method::GET, &url).bearer_auth(access_token);

        let response = self.http.send(builder).await?;
        if !response.status().is_success() {
            return Err(ReservaError::Upstream("calendar_lookup".into()));
        }

        let calendar: CalendarResource = response
            .json()
            .await
            .map_err(|_| ReservaError::Upstream("calendar_lookup".into()))?;
        Ok(calendar.id)
    }

    /// List events in `[start, end]`, following `nextPageToken` until the
    /// listing is exhausted.
    #[instrument(skip(self, access_token))]
    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<RawCalendarEvent>> {
        let url = format!("{}/calendars/{}/events", self.api_base, calendar_id);

        let mut events = Vec::new();
        let mut page_token: Option<String> = None;
        loop {
            let mut query = vec![
                ("timeMin", start.to_rfc3339()),
                ("timeMax", end.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
                ("maxResults", "2500".to_string()),
            ];
            if let Some(token) = &page_token {
                query.push(("pageToken", token.clone()));
            }
            let builder =
                self.http.request(Method::GET, &url).bearer_auth(access_token).query(&query);

            let response = self.http.send(builder).await?;
            if !response.status().is_success() {
                let status = response.status();
                debug!(%status, calendar_id, "event listing rejected");
                return Err(ReservaError::Upstream("events".into()));
            }

            let listing: EventsResponse = response
                .json()
                .await
                .map_err(|_| ReservaError::Upstream("events".into()))?;

            events.extend(listing.items.into_iter().filter_map(|event| {
                let (Some(start), Some(end)) =
                    (parse_event_time(&event.start), parse_event_time(&event.end))
                else {
                    warn!(event_id = %event.id, "skipping event without parseable times");
                    return None;
                };
                Some(RawCalendarEvent {
                    id: event.id,
                    title: event.summary,
                    start,
                    end,
                    location: event.location,
                    description: event.description,
                })
            }));

            match listing.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(events)
    }
}

/// All-day events carry `date`, timed events `dateTime`.
fn parse_event_time(value: &EventDateTime) -> Option<DateTime<Utc>> {
    if let Some(date_time) = &value.date_time {
        return DateTime::parse_from_rfc3339(date_time).ok().map(|dt| dt.with_timezone(&Utc));
    }
    let date = value.date.as_deref()?;
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&midnight))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct CalendarResource {
    id: String,
}

#[derive(Debug, Deserialize)]
struct EventsResponse {
    #[serde(default)]
    items: Vec<GoogleEvent>,
    #[serde(rename = "nextPageToken")]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    id: String,
    summary: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start: EventDateTime,
    end: EventDateTime,
}

#[derive(Debug, Deserialize)]
struct EventDateTime {
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
    date: Option<String>,
}
