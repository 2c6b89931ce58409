//! Process-wide session context.
//!
//! A single `SessionContext` is created at startup and shared as
//! `Arc<SessionContext>`. `login` and `logout` are the only places the
//! credentials change; clients read a snapshot when they build a request.

use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

/// Credentials of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub user_id: Uuid,
    pub token: String,
    pub team_id: Option<String>,
}

impl Session {
    pub fn new(user_id: Uuid, token: impl Into<String>) -> Self {
        Self {
            user_id,
            token: token.into(),
            team_id: None,
        }
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.team_id = Some(team_id.into());
        self
    }
}

#[derive(Debug, Default)]
pub struct SessionContext {
    current: RwLock<Option<Session>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn login(&self, session: Session) {
        tracing::debug!(user_id = %session.user_id, "session started");
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
    }

    pub fn logout(&self) {
        if self.current.write().unwrap_or_else(PoisonError::into_inner).take().is_some() {
            tracing::debug!("session ended");
        }
    }

    /// Snapshot of the active session, if any.
    pub fn current(&self) -> Option<Session> {
        self.current.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }

    /// Switch the active team. Ignored when nobody is logged in.
    pub fn set_team(&self, team_id: Option<String>) {
        if let Some(session) = self.current.write().unwrap_or_else(PoisonError::into_inner).as_mut() {
            session.team_id = team_id;
        }
    }

    pub fn team_id(&self) -> Option<String> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|s| s.team_id.clone())
    }
}
