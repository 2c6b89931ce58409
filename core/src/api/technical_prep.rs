//! `/technical-prep`: coding challenges and interview practice progress.

use serde::Serialize;
use serde_json::Value;

use crate::client::{parse_json, segment, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const PREFIX: &str = "/technical-prep";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChallengeAttempt {
    pub language: String,
    pub solution: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_spent_seconds: Option<u64>,
}

pub struct TechnicalPrepApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TechnicalPrepApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn build_list_challenges(&self) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/challenges"))
    }

    pub fn build_get_challenge(&self, challenge_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{PREFIX}/challenges/{}", segment(challenge_id)))
    }

    pub fn build_submit_attempt(&self, challenge_id: &str, attempt: &ChallengeAttempt) -> Result<HttpRequest, ApiError> {
        self.client.json_request(
            HttpMethod::Post,
            &format!("{PREFIX}/challenges/{}/attempts", segment(challenge_id)),
            attempt,
        )
    }

    pub fn build_progress(&self) -> HttpRequest {
        self.client.request(HttpMethod::Get, &format!("{PREFIX}/progress"))
    }

    pub fn parse_list_challenges(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get_challenge(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_submit_attempt(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_progress(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }
}
