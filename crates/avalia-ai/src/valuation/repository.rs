use super::session::{FormSession, SessionId};

/// Storage abstraction for live form sessions.
pub trait SessionRepository: Send + Sync {
    fn insert(&self, session: FormSession) -> Result<FormSession, RepositoryError>;
    fn fetch(&self, id: &SessionId) -> Result<Option<FormSession>, RepositoryError>;
    /// Runs `change` against the stored session atomically.
    fn update<T>(
        &self,
        id: &SessionId,
        change: impl FnOnce(&mut FormSession) -> T,
    ) -> Result<T, RepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("session already exists")]
    Conflict,
    #[error("session not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
