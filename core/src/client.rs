//! Base HTTP client shared by every resource API module.
//!
//! # Design
//! `ApiClient` holds the normalized base URL and, optionally, the shared
//! `SessionContext`. It never performs I/O: resource modules call
//! `request`/`json_request` to build an `HttpRequest` and `parse_json`/
//! `parse_empty` to interpret the `HttpResponse` the host brings back.
//! Auth headers are read from the session at build time, so a logout
//! between two builds is reflected immediately.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::{
    AdvisorsApi, CareerSimulationApi, OffersApi, ProgressSharingApi, ReferencesApi, SalaryApi, TeamsApi,
    TechnicalPrepApi,
};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::session::SessionContext;

pub const USER_ID_HEADER: &str = "x-user-id";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    session: Option<Arc<SessionContext>>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            session: None,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(&config.base_url)
    }

    pub fn with_session(mut self, session: Arc<SessionContext>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> Option<&SessionContext> {
        self.session.as_deref()
    }

    pub fn offers(&self) -> OffersApi<'_> {
        OffersApi::new(self)
    }

    pub fn advisors(&self) -> AdvisorsApi<'_> {
        AdvisorsApi::new(self)
    }

    pub fn teams(&self) -> TeamsApi<'_> {
        TeamsApi::new(self)
    }

    pub fn progress_sharing(&self) -> ProgressSharingApi<'_> {
        ProgressSharingApi::new(self)
    }

    pub fn career_simulation(&self) -> CareerSimulationApi<'_> {
        CareerSimulationApi::new(self)
    }

    pub fn salary(&self) -> SalaryApi<'_> {
        SalaryApi::new(self)
    }

    pub fn references(&self) -> ReferencesApi<'_> {
        ReferencesApi::new(self)
    }

    pub fn technical_prep(&self) -> TechnicalPrepApi<'_> {
        TechnicalPrepApi::new(self)
    }

    /// Build a body-less request for `path` (which must start with `/`).
    pub fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        tracing::debug!(%method, path, "building request");
        HttpRequest {
            method,
            url: format!("{}{path}", self.base_url),
            headers: self.auth_headers(),
            body: None,
        }
    }

    /// Build a request carrying `body` serialized as JSON.
    pub fn json_request<T: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut req = self.request(method, path);
        req.headers
            .push(("content-type".to_string(), "application/json".to_string()));
        req.body = Some(body);
        Ok(req)
    }

    /// Build a GET request with `query` appended as a URL-encoded query string.
    pub fn query_request<Q: Serialize + ?Sized>(&self, path: &str, query: &Q) -> Result<HttpRequest, ApiError> {
        let qs = serde_urlencoded::to_string(query).map_err(|e| ApiError::Serialization(e.to_string()))?;
        let mut req = self.request(HttpMethod::Get, path);
        if !qs.is_empty() {
            req.url.push('?');
            req.url.push_str(&qs);
        }
        Ok(req)
    }

    fn auth_headers(&self) -> Vec<(String, String)> {
        let Some(session) = self.session.as_ref().and_then(|ctx| ctx.current()) else {
            return Vec::new();
        };
        vec![
            ("authorization".to_string(), format!("Bearer {}", session.token)),
            (USER_ID_HEADER.to_string(), session.user_id.to_string()),
        ]
    }
}

/// Percent-encode an identifier for use as a single path segment.
pub(crate) fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}

/// Map non-success status codes to the appropriate `ApiError` variant.
pub(crate) fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    tracing::debug!(status = response.status, "parsing response");
    if response.is_success() {
        return Ok(());
    }
    let err = ApiError::from_response(response);
    tracing::warn!(status = response.status, error = %err, "request failed");
    Err(err)
}

pub(crate) fn parse_json<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    check_status(response)?;
    serde_json::from_slice(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

/// For endpoints whose success body carries nothing the caller needs.
pub(crate) fn parse_empty(response: &HttpResponse) -> Result<(), ApiError> {
    check_status(response)
}
