// riwayat/src/utils/auth.rs
use log::info;
use serde::Serialize;

use crate::utils::rbac::PermissionSet;
use crate::utils::structs::Session;

/// Who is driving the portal. Only login and logout move between states;
/// the permission set is replaced wholesale, never edited in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "status", content = "session", rename_all = "lowercase")]
pub enum AuthState {
    #[default]
    Anonymous,
    Authenticated(Session),
}

impl AuthState {
    pub fn login(session: Session) -> Self {
        info!("Session opened for {} ({})", session.email, session.role);
        AuthState::Authenticated(session)
    }

    pub fn logout(self) -> Self {
        if let AuthState::Authenticated(session) = &self {
            info!("Session closed for {}", session.email);
        }
        AuthState::Anonymous
    }

    pub fn session(&self) -> Option<&Session> {
        match self {
            AuthState::Authenticated(session) => Some(session),
            AuthState::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }

    /// Grants for the current state; anonymous visitors hold none.
    pub fn permissions(&self) -> PermissionSet {
        self.session()
            .map(Session::permission_set)
            .unwrap_or_default()
    }
}
