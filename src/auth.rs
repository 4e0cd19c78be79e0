use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::errors::{Error, Result};
use crate::core::helpers::now_utc;
use crate::models::models::UserId;
use crate::users::UserDirectory;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub user_id: UserId,
    pub username: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    LoggedOut,
    LoggedIn(Session),
}

/// Holds the single active session, if any.
///
/// Credentials are compared verbatim. A failed login never reveals whether
/// the username or the password was wrong.
#[derive(Debug, Default)]
pub struct SessionGuard {
    state: SessionState,
}

impl SessionGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn current(&self) -> Option<&Session> {
        match &self.state {
            SessionState::LoggedIn(session) => Some(session),
            SessionState::LoggedOut => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.current().is_some()
    }

    pub fn current_user(&self) -> Result<UserId> {
        self.current().map(|s| s.user_id).ok_or(Error::NotLoggedIn)
    }

    /// Starts a session for `username`. On failure the previous state,
    /// logged in or not, is kept.
    pub fn authenticate(
        &mut self,
        directory: &UserDirectory,
        username: &str,
        password: &str,
    ) -> Result<UserId> {
        let user = match directory.find_user(username) {
            Some(user) => user,
            None => {
                debug!(%username, "login rejected: unknown username");
                return Err(Error::AuthFailed);
            }
        };
        if user.password != password {
            debug!(%username, "login rejected: password mismatch");
            return Err(Error::AuthFailed);
        }

        let session = Session {
            id: Uuid::new_v4(),
            user_id: user.id,
            username: user.username.clone(),
            started_at: now_utc(),
        };
        info!(%username, session = %session.id, "logged in");
        self.state = SessionState::LoggedIn(session);
        Ok(user.id)
    }

    /// Ends the current session, if there is one, and returns it.
    pub fn logout(&mut self) -> Option<Session> {
        match std::mem::take(&mut self.state) {
            SessionState::LoggedIn(session) => {
                info!(username = %session.username, session = %session.id, "logged out");
                Some(session)
            }
            SessionState::LoggedOut => None,
        }
    }

    /// Replaces the logged-in user's password when `old` matches it exactly.
    /// Length rules for `new` are the caller's business.
    pub fn change_password(
        &self,
        directory: &mut UserDirectory,
        old: &str,
        new: &str,
    ) -> Result<()> {
        let user = directory.user_mut(self.current_user()?)?;
        if user.password != old {
            debug!(username = %user.username, "password change rejected");
            return Err(Error::WrongPassword);
        }
        user.password = new.to_string();
        info!(username = %user.username, "password changed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (UserDirectory, SessionGuard) {
        let mut dir = UserDirectory::new();
        dir.insert("alice", "password1");
        dir.insert("bob", "password2");
        (dir, SessionGuard::new())
    }

    #[test]
    fn login_with_matching_credentials() {
        let (dir, mut guard) = setup();
        let id = guard.authenticate(&dir, "alice", "password1").unwrap();
        assert_eq!(dir.find("alice"), Some(id));
        assert_eq!(guard.current().map(|s| s.username.as_str()), Some("alice"));
    }

    #[test]
    fn unknown_user_and_wrong_password_look_the_same() {
        let (dir, mut guard) = setup();
        assert_eq!(guard.authenticate(&dir, "alice", "nope"), Err(Error::AuthFailed));
        assert_eq!(guard.authenticate(&dir, "ghost", "password1"), Err(Error::AuthFailed));
        assert_eq!(guard.state(), &SessionState::LoggedOut);
    }

    #[test]
    fn failed_login_keeps_existing_session() {
        let (dir, mut guard) = setup();
        guard.authenticate(&dir, "bob", "password2").unwrap();
        let before = guard.state().clone();
        assert!(guard.authenticate(&dir, "alice", "wrong").is_err());
        assert_eq!(guard.state(), &before);
    }

    #[test]
    fn logout_is_unconditional() {
        let (dir, mut guard) = setup();
        assert!(guard.logout().is_none());
        guard.authenticate(&dir, "bob", "password2").unwrap();
        let ended = guard.logout().unwrap();
        assert_eq!(ended.username, "bob");
        assert!(!guard.is_logged_in());
        assert_eq!(guard.current_user(), Err(Error::NotLoggedIn));
    }

    #[test]
    fn change_password_checks_old_value() {
        let (mut dir, mut guard) = setup();
        assert_eq!(
            guard.change_password(&mut dir, "password1", "newpassword"),
            Err(Error::NotLoggedIn)
        );
        guard.authenticate(&dir, "alice", "password1").unwrap();
        assert_eq!(
            guard.change_password(&mut dir, "wrong", "newpassword"),
            Err(Error::WrongPassword)
        );
        guard.change_password(&mut dir, "password1", "newpassword").unwrap();
        guard.logout();
        assert!(guard.authenticate(&dir, "alice", "password1").is_err());
        assert!(guard.authenticate(&dir, "alice", "newpassword").is_ok());
    }
}
