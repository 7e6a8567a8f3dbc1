use crate::domain::model::SessionId;
use crate::domain::ports::KeyValueStorage;
use crate::utils::error::Result;

pub const DEFAULT_SESSION_KEY: &str = "sessionId";

/// The one persisted value that makes a submission resumable.
#[derive(Debug, Clone)]
pub struct SessionStore<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_SESSION_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// An empty stored value counts as no session.
    pub fn get(&self) -> Result<Option<SessionId>> {
        Ok(self
            .storage
            .get_item(&self.key)?
            .filter(|id| !id.is_empty())
            .map(SessionId::from))
    }

    pub fn set(&self, id: &SessionId) -> Result<()> {
        tracing::debug!("Persisting session id under '{}'", self.key);
        self.storage.set_item(&self.key, id.as_str())
    }

    pub fn clear(&self) -> Result<()> {
        tracing::debug!("Clearing session id under '{}'", self.key);
        self.storage.remove_item(&self.key)
    }
}
