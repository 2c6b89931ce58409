//! `/references`: professional references and reference requests.

use serde::Serialize;
use serde_json::Value;

use crate::client::{parse_empty, parse_json, segment, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const PREFIX: &str = "/references";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReferenceRequest {
    /// Application the reference is needed for.
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
}

pub struct ReferencesApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ReferencesApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_list(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, PREFIX)
    }

    pub fn build_get(&self, reference_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/{}", segment(reference_id)))
    }

    pub fn build_create(&self, reference: &Value) -> Result<HttpRequest, ApiError> {
        self.client.json_request(HttpMethod::Post, PREFIX, reference)
    }

    pub fn build_update(&self, reference_id: &str, reference: &Value) -> Result<HttpRequest, ApiError> {
        self.client
            .json_request(HttpMethod::Put, &format!("{PREFIX}/{}", segment(reference_id)), reference)
    }

    pub fn build_delete(&self, reference_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Delete, &format!("{PREFIX}/{}", segment(reference_id)))
    }

    pub fn build_request_reference(&self, reference_id: &str, request: &ReferenceRequest) -> Result<HttpRequest, ApiError> {
        self.client.json_request(
            HttpMethod::Post,
            &format!("{PREFIX}/{}/request", segment(reference_id)),
            request,
        )
    }

    pub fn build_list_requests(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, &format!("{PREFIX}/requests"))
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_update(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(&response)
    }

    pub fn parse_request_reference(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_list_requests(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        parse_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000/api")
    }

    #[test]
    fn crud_paths() {
        let c = client();
        let api = c.references();
        assert_eq!(api.build_list().url, "http://localhost:8000/api/references");
        assert_eq!(api.build_get("r-1").url, "http://localhost:8000/api/references/r-1");
        assert_eq!(api.build_create(&json!({"name": "Pat"})).unwrap().method, HttpMethod::Post);
        assert_eq!(api.build_update("r-1", &json!({})).unwrap().method, HttpMethod::Put);
        assert_eq!(api.build_delete("r-1").method, HttpMethod::Delete);
        assert_eq!(api.build_list_requests().url, "http://localhost:8000/api/references/requests");
    }

    #[test]
    fn request_reference_body() {
        let c = client();
        let req = c
            .references()
            .build_request_reference(
                "r-1",
                &ReferenceRequest {
                    application_id: "app-3".into(),
                    message: None,
                    due_date: Some("2026-11-15".into()),
                },
            )
            .unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/references/r-1/request");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"application_id": "app-3", "due_date": "2026-11-15"}));
    }

    #[test]
    fn parse_create_validation_error() {
        let c = client();
        let err = c
            .references()
            .parse_create(HttpResponse::new(422, r#"{"detail":[{"msg":"email is invalid"}]}"#))
            .unwrap_err();
        assert_eq!(err.user_message(), "email is invalid");
    }
}
