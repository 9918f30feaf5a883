//! Session store
//!
//! The single owner of the signed-in user and their token. It is created
//! once at startup by `hydrate`, shared by cloning the handle, and changed
//! only through `login` and `logout`. Persistence is best effort: a storage
//! failure is logged and the in-memory state still changes.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

use domain_account::{Session, User};

use crate::error::StorageError;
use crate::storage::{MemorySessionStorage, SessionStorage, TOKEN_KEY, USER_KEY};

struct SessionInner {
    storage: Arc<dyn SessionStorage>,
    current: RwLock<Option<Session>>,
}

/// Shared handle to the process-wide session
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<SessionInner>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl SessionStore {
    /// Restores whatever session `storage` holds
    ///
    /// A half-written or unreadable session counts as signed out and is
    /// wiped from storage.
    pub fn hydrate(storage: Arc<dyn SessionStorage>) -> Self {
        let restored = match read_persisted(storage.as_ref()) {
            Ok(restored) => restored,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable session");
                None
            }
        };

        match &restored {
            Some(session) => info!(user = %session.user.id, "Restored session"),
            None => clear_persisted(storage.as_ref()),
        }

        Self {
            inner: Arc::new(SessionInner {
                storage,
                current: RwLock::new(restored),
            }),
        }
    }

    /// A store that forgets everything when the process exits
    pub fn ephemeral() -> Self {
        Self::hydrate(Arc::new(MemorySessionStorage::new()))
    }

    /// Stores the token and user and marks the session authenticated
    pub fn login(&self, token: impl Into<String>, user: User) {
        let session = Session::new(token, user);
        if let Err(e) = write_persisted(self.inner.storage.as_ref(), &session) {
            warn!(error = %e, "Failed to persist session");
        }
        info!(user = %session.user.id, "Signed in");
        *self.inner.current.write() = Some(session);
    }

    /// Clears the token and user; returns whether anyone was signed in
    pub fn logout(&self) -> bool {
        let previous = self.inner.current.write().take();
        clear_persisted(self.inner.storage.as_ref());
        match &previous {
            Some(session) => info!(user = %session.user.id, "Signed out"),
            None => info!("Sign-out requested with no active session"),
        }
        previous.is_some()
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner
            .current
            .read()
            .as_ref()
            .is_some_and(|session| !session.token.is_empty())
    }

    pub fn token(&self) -> Option<String> {
        self.inner.current.read().as_ref().map(|s| s.token.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.inner.current.read().as_ref().map(|s| s.user.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.inner.current.read().clone()
    }
}

fn read_persisted(storage: &dyn SessionStorage) -> Result<Option<Session>, StorageError> {
    let token = storage.get(TOKEN_KEY)?.filter(|t| !t.is_empty());
    let user = storage.get(USER_KEY)?;
    match (token, user) {
        (Some(token), Some(user)) => {
            let user: User = serde_json::from_str(&user)?;
            Ok(Some(Session::new(token, user)))
        }
        _ => Ok(None),
    }
}

fn write_persisted(storage: &dyn SessionStorage, session: &Session) -> Result<(), StorageError> {
    storage.set(TOKEN_KEY, &session.token)?;
    storage.set(USER_KEY, &serde_json::to_string(&session.user)?)
}

fn clear_persisted(storage: &dyn SessionStorage) {
    for key in [TOKEN_KEY, USER_KEY] {
        if let Err(e) = storage.remove(key) {
            warn!(key, error = %e, "Failed to clear stored session");
        }
    }
}
