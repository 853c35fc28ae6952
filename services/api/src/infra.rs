use avalia_ai::valuation::{FormLayout, FormSession, RepositoryError, SessionId, SessionRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, FormSession>>>,
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: FormSession) -> Result<FormSession, RepositoryError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session mutex poisoned".to_string()))?;
        if guard.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id().clone(), session.clone());
        Ok(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<FormSession>, RepositoryError> {
        let guard = self
            .sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session mutex poisoned".to_string()))?;
        Ok(guard.get(id).cloned())
    }

    fn update<T>(
        &self,
        id: &SessionId,
        change: impl FnOnce(&mut FormSession) -> T,
    ) -> Result<T, RepositoryError> {
        let mut guard = self
            .sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session mutex poisoned".to_string()))?;
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(change(session))
    }
}

impl InMemorySessionRepository {
    pub(crate) fn len(&self) -> usize {
        self.sessions.lock().map(|guard| guard.len()).unwrap_or(0)
    }
}

pub(crate) fn parse_layout(raw: &str) -> Result<FormLayout, String> {
    FormLayout::parse(raw)
        .ok_or_else(|| format!("unknown layout '{raw}' (expected stepped or single_page)"))
}
