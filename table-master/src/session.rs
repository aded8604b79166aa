//! SessionContext - 当前身份
//!
//! Created once at startup and shared by handle with every flow that needs
//! the current identity. The record is kept in `session.json`; sign-out
//! removes it entirely. Changes are announced on a broadcast channel.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use shared::error::AppResult;
use shared::models::{Identity, UserProfile};
use tokio::sync::broadcast;

/// Broadcast channel 容量
const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Identity change notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(UserProfile),
    GuestRemembered(String),
    SignedOut,
}

/// 会话上下文
pub struct SessionContext {
    /// 会话文件路径: {data_dir}/session.json
    file_path: PathBuf,
    identity: RwLock<Option<Identity>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionContext {
    /// 从文件加载
    ///
    /// An unreadable record is treated as signed out.
    pub fn load(file_path: impl Into<PathBuf>) -> Arc<Self> {
        let file_path = file_path.into();
        let identity = match read_identity(&file_path) {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(path = %file_path.display(), error = %e, "Ignoring unreadable session record");
                None
            }
        };
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Arc::new(Self {
            file_path,
            identity: RwLock::new(identity),
            events,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    pub fn current(&self) -> Option<Identity> {
        self.identity.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity
            .read()
            .as_ref()
            .is_some_and(Identity::is_authenticated)
    }

    /// Email of the signed-in user; guests do not count
    pub fn authenticated_email(&self) -> Option<String> {
        match &*self.identity.read() {
            Some(Identity::Authenticated { user, .. }) if !user.email.trim().is_empty() => {
                Some(user.email.clone())
            }
            _ => None,
        }
    }

    /// Last guest email, used to pre-fill the checkout prompt
    pub fn guest_email(&self) -> Option<String> {
        match &*self.identity.read() {
            Some(Identity::Guest { email }) => Some(email.clone()),
            _ => None,
        }
    }

    pub fn access_token(&self) -> Option<String> {
        match &*self.identity.read() {
            Some(Identity::Authenticated { access_token, .. }) => access_token.clone(),
            _ => None,
        }
    }

    /// Replace the identity with a signed-in user
    pub fn set_authenticated(
        &self,
        user: UserProfile,
        access_token: Option<String>,
    ) -> AppResult<()> {
        let identity = Identity::Authenticated {
            user: user.clone(),
            access_token,
        };
        self.store(Some(identity))?;
        tracing::debug!(user_id = %user.id, "Session signed in");
        let _ = self.events.send(SessionEvent::SignedIn(user));
        Ok(())
    }

    /// Remember a guest email
    ///
    /// A signed-in identity is left alone.
    pub fn remember_guest(&self, email: &str) -> AppResult<()> {
        if self.is_authenticated() {
            tracing::debug!("Signed in; guest email not stored");
            return Ok(());
        }
        self.store(Some(Identity::Guest {
            email: email.to_string(),
        }))?;
        let _ = self
            .events
            .send(SessionEvent::GuestRemembered(email.to_string()));
        Ok(())
    }

    /// Clear the identity record entirely
    pub fn sign_out(&self) -> AppResult<()> {
        self.store(None)?;
        tracing::debug!("Session cleared");
        let _ = self.events.send(SessionEvent::SignedOut);
        Ok(())
    }

    fn store(&self, identity: Option<Identity>) -> AppResult<()> {
        let mut guard = self.identity.write();
        match &identity {
            Some(identity) => {
                if let Some(parent) = self.file_path.parent() {
                    std::fs::create_dir_all(parent)?;
                }
                let content = serde_json::to_string_pretty(identity)?;
                std::fs::write(&self.file_path, content)?;
            }
            None => {
                if self.file_path.exists() {
                    std::fs::remove_file(&self.file_path)?;
                }
            }
        }
        *guard = identity;
        Ok(())
    }
}

fn read_identity(path: &Path) -> AppResult<Option<Identity>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    Ok(Some(serde_json::from_str(&content)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn user() -> UserProfile {
        UserProfile {
            id: "u1".into(),
            email: "u@x.com".into(),
            display_name: "Uma".into(),
        }
    }

    #[test]
    fn test_identity_survives_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let session = SessionContext::load(&path);
        assert!(session.current().is_none());
        session.set_authenticated(user(), Some("jwt".into())).unwrap();

        let reloaded = SessionContext::load(&path);
        assert_eq!(reloaded.authenticated_email().as_deref(), Some("u@x.com"));
        assert_eq!(reloaded.access_token().as_deref(), Some("jwt"));
    }

    #[test]
    fn test_sign_out_removes_record() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");

        let session = SessionContext::load(&path);
        session.set_authenticated(user(), None).unwrap();
        assert!(path.exists());

        session.sign_out().unwrap();
        assert!(!path.exists());
        assert!(session.current().is_none());
        assert!(SessionContext::load(&path).current().is_none());
    }

    #[test]
    fn test_guest_does_not_replace_signed_in_user() {
        let dir = TempDir::new().unwrap();
        let session = SessionContext::load(dir.path().join("session.json"));

        session.remember_guest("g@x.com").unwrap();
        assert_eq!(session.guest_email().as_deref(), Some("g@x.com"));
        assert!(session.authenticated_email().is_none());

        session.set_authenticated(user(), None).unwrap();
        session.remember_guest("other@x.com").unwrap();
        assert!(session.guest_email().is_none());
        assert_eq!(session.authenticated_email().as_deref(), Some("u@x.com"));
    }

    #[test]
    fn test_corrupt_record_loads_signed_out() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(SessionContext::load(&path).current().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_see_changes() {
        let dir = TempDir::new().unwrap();
        let session = SessionContext::load(dir.path().join("session.json"));
        let mut rx = session.subscribe();

        session.set_authenticated(user(), None).unwrap();
        session.sign_out().unwrap();

        assert_eq!(rx.recv().await.unwrap(), SessionEvent::SignedIn(user()));
        assert_eq!(rx.recv().await.unwrap(), SessionEvent::SignedOut);
    }
}
