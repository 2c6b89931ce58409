//! `/advisors`: career coaches and mentors linked to the user.

use serde::Serialize;
use serde_json::Value;

use crate::client::{parse_empty, parse_json, segment, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const PREFIX: &str = "/advisors";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdvisorInvite {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

pub struct AdvisorsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> AdvisorsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, PREFIX)
    }

    pub fn build_invite(&self, invite: &AdvisorInvite) -> Result<HttpRequest, ApiError> {
        self.client
            .json_request(HttpMethod::Post, &format!("{PREFIX}/invite"), invite)
    }

    pub fn build_remove(&self, advisor_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Delete, &format!("{PREFIX}/{}", segment(advisor_id)))
    }

    pub fn build_list_sessions(&self, advisor_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/{}/sessions", segment(advisor_id)))
    }

    pub fn build_schedule_session(&self, advisor_id: &str, session: &Value) -> Result<HttpRequest, ApiError> {
        self.client.json_request(
            HttpMethod::Post,
            &format!("{PREFIX}/{}/sessions", segment(advisor_id)),
            session,
        )
    }

    pub fn build_recommendations(&self) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/recommendations"))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        parse_json(&response)
    }

    pub fn parse_invite(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_remove(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(&response)
    }

    pub fn parse_list_sessions(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        parse_json(&response)
    }

    pub fn parse_schedule_session(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_recommendations(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        parse_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn invite_omits_blank_optionals() {
        let c = ApiClient::new("http://localhost:8000/api");
        let req = c
            .advisors()
            .build_invite(&AdvisorInvite {
                email: "coach@example.com".into(),
                name: None,
                message: Some("Would love your input".into()),
            })
            .unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/advisors/invite");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"email": "coach@example.com", "message": "Would love your input"}));
    }

    #[test]
    fn session_paths() {
        let c = ApiClient::new("http://localhost:8000/api");
        let api = c.advisors();
        assert_eq!(api.build_list_sessions("a-1").url, "http://localhost:8000/api/advisors/a-1/sessions");
        let req = api.build_schedule_session("a-1", &json!({"scheduled_for": "2026-11-01T15:00:00Z"})).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(api.build_recommendations().url, "http://localhost:8000/api/advisors/recommendations");
        assert_eq!(api.build_remove("a-1").method, HttpMethod::Delete);
    }

    #[test]
    fn parse_list_forbidden() {
        let c = ApiClient::new("http://localhost:8000/api");
        let err = c.advisors().parse_list(HttpResponse::new(403, "")).unwrap_err();
        assert!(matches!(err, ApiError::Forbidden { .. }));
    }
}
