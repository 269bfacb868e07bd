//! Low-level client for the hosted relational store.
//!
//! Speaks the PostgREST filter dialect (`column=eq.value`, `order=`,
//! `limit=`) and authenticates with the service-role key passed in at
//! construction. The key is the privileged capability of this process;
//! it never lives in a global.

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Method, Response, StatusCode};
use reserva_domain::{ReservaError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::http::HttpClient;

pub struct RestClient {
    http: HttpClient,
    base_url: String,
    service_role_key: String,
}

impl RestClient {
    pub fn new(http: HttpClient, base_url: impl Into<String>, service_role_key: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url, service_role_key: service_role_key.into() }
    }

    fn auth_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let bearer = format!("Bearer {}", self.service_role_key);
        let bearer = HeaderValue::from_str(&bearer)
            .map_err(|_| ReservaError::Config("service role key is not a valid header".into()))?;
        let apikey = HeaderValue::from_str(&self.service_role_key)
            .map_err(|_| ReservaError::Config("service role key is not a valid header".into()))?;
        headers.insert("Authorization", bearer);
        headers.insert("apikey", apikey);
        Ok(headers)
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    /// Fetch rows matching the query. Idempotent, so retried on transient
    /// failure.
    #[instrument(skip(self, query))]
    pub async fn select<T>(&self, table: &str, query: &[(&str, String)]) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let builder = self
            .http
            .request(Method::GET, self.table_url(table))
            .headers(self.auth_headers()?)
            .query(query);
        let response = self.http.send(builder).await?;
        let response = check_status(response, table).await?;
        response.json().await.map_err(|e| {
            ReservaError::Storage(format!("hosted store returned malformed rows: {e}"))
        })
    }

    /// Insert one or more rows. Not retried.
    #[instrument(skip(self, rows))]
    pub async fn insert<T>(&self, table: &str, rows: &[T]) -> Result<()>
    where
        T: Serialize,
    {
        let builder = self
            .http
            .request(Method::POST, self.table_url(table))
            .headers(self.auth_headers()?)
            .header("Prefer", "return=minimal")
            .json(rows);
        let response = self.http.send_once(builder).await?;
        check_status(response, table).await.map(|_| ())
    }

    /// Insert or replace a row keyed on `conflict_columns`. Not retried.
    #[instrument(skip(self, row))]
    pub async fn upsert<T>(&self, table: &str, conflict_columns: &str, row: &T) -> Result<()>
    where
        T: Serialize,
    {
        let builder = self
            .http
            .request(Method::POST, self.table_url(table))
            .headers(self.auth_headers()?)
            .query(&[("on_conflict", conflict_columns)])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&[row]);
        let response = self.http.send_once(builder).await?;
        check_status(response, table).await.map(|_| ())
    }

    /// Update rows matching the query. Returns the number of rows matched;
    /// callers turn zero into `NotFound`. Not retried.
    #[instrument(skip(self, query, row))]
    pub async fn update<T>(&self, table: &str, query: &[(&str, String)], row: &T) -> Result<usize>
    where
        T: Serialize,
    {
        let builder = self
            .http
            .request(Method::PATCH, self.table_url(table))
            .headers(self.auth_headers()?)
            .query(query)
            .header("Prefer", "return=representation")
            .json(row);
        let response = self.http.send_once(builder).await?;
        let response = check_status(response, table).await?;
        let rows: Vec<serde_json::Value> = response.json().await.map_err(|e| {
            ReservaError::Storage(format!("hosted store returned malformed rows: {e}"))
        })?;
        Ok(rows.len())
    }

    /// Delete rows matching the query. Not retried.
    #[instrument(skip(self, query))]
    pub async fn delete(&self, table: &str, query: &[(&str, String)]) -> Result<()> {
        let builder = self
            .http
            .request(Method::DELETE, self.table_url(table))
            .headers(self.auth_headers()?)
            .query(query);
        let response = self.http.send_once(builder).await?;
        check_status(response, table).await.map(|_| ())
    }
}

async fn check_status(response: Response, table: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    // Bodies from the hosted store are logged, never surfaced to callers.
    let body = response.text().await.unwrap_or_default();
    debug!(%status, table, body, "hosted store rejected request");

    Err(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ReservaError::Config("hosted store rejected the service role key".into())
        }
        StatusCode::CONFLICT => {
            ReservaError::Validation(format!("conflicting row in {table}"))
        }
        _ => ReservaError::Storage(format!("hosted store returned {status} for {table}")),
    })
}
