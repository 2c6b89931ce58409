//! `/teams`: coaching teams, membership and the team dashboard.
//!
//! The `*_active` builders resolve the team from the session context, so
//! views do not have to carry the team id around.

use serde::Serialize;
use serde_json::Value;

use crate::client::{parse_empty, parse_json, segment, ApiClient};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

const PREFIX: &str = "/teams";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamRole {
    Admin,
    Mentor,
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewTeam {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamInvite {
    pub email: String,
    pub role: TeamRole,
}

#[derive(Debug, Serialize)]
struct RoleChange {
    role: TeamRole,
}

pub struct TeamsApi<'a> {
    client: &'a ApiClient,
}

impl<'a> TeamsApi<'a> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Team id of the current session.
    pub fn active_team(&self) -> Result<String, ApiError> {
        self.client
            .session()
            .and_then(|s| s.team_id())
            .ok_or(ApiError::NoActiveTeam)
    }

    fn team_path(team_id: &str) -> String {
        format!("{PREFIX}/{}", segment(team_id))
    }

    pub fn build_create(&self, team: &NewTeam) -> Result<HttpRequest, ApiError> {
        self.client.json_request(HttpMethod::Post, PREFIX, team)
    }

    pub fn build_get(&self, team_id: &str) -> HttpRequest {
        self.client.request(HttpMethod::Get, &Self::team_path(team_id))
    }

    pub fn build_members(&self, team_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{}/members", Self::team_path(team_id)))
    }

    pub fn build_members_active(&self) -> Result<HttpRequest, ApiError> {
        Ok(self.build_members(&self.active_team()?))
    }

    pub fn build_invite(&self, team_id: &str, invite: &TeamInvite) -> Result<HttpRequest, ApiError> {
        self.client
            .json_request(HttpMethod::Post, &format!("{}/invite", Self::team_path(team_id)), invite)
    }

    pub fn build_update_role(&self, team_id: &str, member_id: &str, role: TeamRole) -> Result<HttpRequest, ApiError> {
        self.client.json_request(
            HttpMethod::Put,
            &format!("{}/members/{}/role", Self::team_path(team_id), segment(member_id)),
            &RoleChange { role },
        )
    }

    pub fn build_remove_member(&self, team_id: &str, member_id: &str) -> HttpRequest {
        self.client.request(
            HttpMethod::Delete,
            &format!("{}/members/{}", Self::team_path(team_id), segment(member_id)),
        )
    }

    pub fn build_dashboard(&self, team_id: &str) -> HttpRequest {
        self.client
            .request(HttpMethod::Get, &format!("{}/dashboard", Self::team_path(team_id)))
    }

    pub fn build_dashboard_active(&self) -> Result<HttpRequest, ApiError> {
        Ok(self.build_dashboard(&self.active_team()?))
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_members(&self, response: HttpResponse) -> Result<Vec<Value>, ApiError> {
        parse_json(&response)
    }

    pub fn parse_invite(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_update_role(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }

    pub fn parse_remove_member(&self, response: HttpResponse) -> Result<(), ApiError> {
        parse_empty(&response)
    }

    pub fn parse_dashboard(&self, response: HttpResponse) -> Result<Value, ApiError> {
        parse_json(&response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionContext};
    use serde_json::json;
    use std::sync::Arc;
    use uuid::Uuid;

    #[test]
    fn active_team_requires_session_team() {
        let ctx = Arc::new(SessionContext::new());
        let c = ApiClient::new("http://localhost:8000/api").with_session(ctx.clone());

        assert!(matches!(c.teams().build_members_active().unwrap_err(), ApiError::NoActiveTeam));

        ctx.login(Session::new(Uuid::nil(), "tok").with_team("t-1"));
        let req = c.teams().build_members_active().unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/teams/t-1/members");
        assert_eq!(req.header("authorization"), Some("Bearer tok"));

        ctx.set_team(Some("t-2".into()));
        assert_eq!(
            c.teams().build_dashboard_active().unwrap().url,
            "http://localhost:8000/api/teams/t-2/dashboard"
        );
    }

    #[test]
    fn role_update_body() {
        let c = ApiClient::new("http://localhost:8000/api");
        let req = c.teams().build_update_role("t-1", "m-9", TeamRole::Mentor).unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(req.url, "http://localhost:8000/api/teams/t-1/members/m-9/role");
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"role": "mentor"}));
    }

    #[test]
    fn invite_and_remove() {
        let c = ApiClient::new("http://localhost:8000/api");
        let req = c
            .teams()
            .build_invite(
                "t-1",
                &TeamInvite {
                    email: "new@example.com".into(),
                    role: TeamRole::Member,
                },
            )
            .unwrap();
        assert_eq!(req.url, "http://localhost:8000/api/teams/t-1/invite");
        assert_eq!(c.teams().build_remove_member("t-1", "m-9").method, HttpMethod::Delete);
    }

    #[test]
    fn create_team_body() {
        let c = ApiClient::new("http://localhost:8000/api");
        let req = c
            .teams()
            .build_create(&NewTeam {
                name: "Bootcamp cohort".into(),
                description: None,
            })
            .unwrap();
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"name": "Bootcamp cohort"}));
    }
}
