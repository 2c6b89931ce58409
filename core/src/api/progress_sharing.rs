//! `/progress-sharing`: share links that expose job-search progress to
//! mentors or family without an account.

use serde::Serialize;
use serde_json::Value;

use crate::client::{parse_empty, parse_json, segment, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const PREFIX: &str = "/progress-sharing";

/// What a share link exposes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ShareScope {
    pub include_applications: bool,
    pub include_goals: bool,
    pub include_interviews: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in_days: Option<u32>,
}

pub struct ProgressSharingApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ProgressSharingApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_create_link(&self, scope: &ShareScope) -> Result<HttpRequest, ApiError> {
        self.client
            .json_request(HttpMethod::Post, &format!("{PREFIX}/links"), scope)
    }

    pub fn build_list_links(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, &format!("{PREFIX}/links"))
    }

    pub fn build_revoke_link(&self, token: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Delete, &format!("{PREFIX}/links/{}", segment(token)))
    }

    /// Public view of a shared link; works without a session.
    pub fn build_view_shared(&self, token: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/shared/{}", segment(token)))
    }

    pub fn build_update_settings(&self, settings: &Value) -> Result<HttpRequest, ApiError> {
        self.client
            .json_request(HttpMethod::Put, &format!("{PREFIX}/settings"), settings)
    }

    pub fn parse_create_link(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_list_links(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        parse_json(&response)
    }

    pub fn parse_revoke_link(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(&response)
    }

    /// A revoked or expired link comes back as `ApiError::Forbidden`.
    pub fn parse_view_shared(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_update_settings(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ACCESS_DENIED_MESSAGE;
    use serde_json::json;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000/api")
    }

    #[test]
    fn create_link_body() {
        let c = client();
        let req = c
            .progress_sharing()
            .build_create_link(&ShareScope {
                include_applications: true,
                include_goals: true,
                include_interviews: false,
                expires_in_days: Some(30),
            })
            .unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/progress-sharing/links");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            json!({"include_applications": true, "include_goals": true, "include_interviews": false, "expires_in_days": 30})
        );
    }

    #[test]
    fn revoke_and_view_paths() {
        let c = client();
        let api = c.progress_sharing();
        let revoke = api.build_revoke_link("tok-1");
        assert_eq!(revoke.method, HttpMethod::Delete);
        assert_eq!(revoke.url, "http://localhost:8000/api/progress-sharing/links/tok-1");
        assert_eq!(
            api.build_view_shared("tok-1").url,
            "http://localhost:8000/api/progress-sharing/shared/tok-1"
        );
        assert_eq!(api.build_update_settings(&json!({})).unwrap().method, HttpMethod::Put);
    }

    #[test]
    fn revoked_link_is_forbidden() {
        let c = client();
        let err = c
            .progress_sharing()
            .parse_view_shared(HttpResponse::new(403, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }));
        assert_eq!(err.user_message(), ACCESS_DENIED_MESSAGE);
    }
}
