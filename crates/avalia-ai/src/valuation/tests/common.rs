use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::Notify;

use crate::valuation::estimation::{
    EstimationError, EstimationRequest, EstimationResponse, PriceEstimator,
};
use crate::valuation::repository::{RepositoryError, SessionRepository};
use crate::valuation::session::{FormSession, SessionId};
use crate::valuation::{FormLayout, ValuationService};

#[derive(Default)]
pub(super) struct MemoryRepository {
    sessions: Mutex<HashMap<SessionId, FormSession>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: FormSession) -> Result<FormSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex");
        if guard.contains_key(session.id()) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id().clone(), session.clone());
        Ok(session)
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<FormSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex");
        Ok(guard.get(id).cloned())
    }

    fn update<T>(
        &self,
        id: &SessionId,
        change: impl FnOnce(&mut FormSession) -> T,
    ) -> Result<T, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex");
        let session = guard.get_mut(id).ok_or(RepositoryError::NotFound)?;
        Ok(change(session))
    }
}

#[derive(Clone)]
pub(super) enum Scripted {
    Price(&'static str),
    Fail,
}

/// Answers every request with a fixed outcome and records what it saw.
pub(super) struct ScriptedEstimator {
    script: Scripted,
    seen: Mutex<Vec<EstimationRequest>>,
    gate: Option<Arc<Notify>>,
}

impl ScriptedEstimator {
    pub(super) fn price(value: &'static str) -> Self {
        Self {
            script: Scripted::Price(value),
            seen: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub(super) fn failing() -> Self {
        Self {
            script: Scripted::Fail,
            seen: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    /// Holds every request until the returned handle is notified.
    pub(super) fn gated(value: &'static str) -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let estimator = Self {
            script: Scripted::Price(value),
            seen: Mutex::new(Vec::new()),
            gate: Some(gate.clone()),
        };
        (estimator, gate)
    }

    pub(super) fn requests(&self) -> Vec<EstimationRequest> {
        self.seen.lock().expect("seen mutex").clone()
    }
}

impl PriceEstimator for ScriptedEstimator {
    fn estimate(
        &self,
        request: EstimationRequest,
    ) -> impl Future<Output = Result<EstimationResponse, EstimationError>> + Send {
        self.seen.lock().expect("seen mutex").push(request);
        let script = self.script.clone();
        let gate = self.gate.clone();

        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            match script {
                Scripted::Price(value) => Ok(EstimationResponse {
                    estimated_price: value.to_string(),
                }),
                Scripted::Fail => Err(EstimationError::Status(503)),
            }
        }
    }
}

pub(super) fn service_with(
    estimator: ScriptedEstimator,
    layout: FormLayout,
) -> (
    Arc<ValuationService<MemoryRepository, ScriptedEstimator>>,
    Arc<ScriptedEstimator>,
) {
    let estimator = Arc::new(estimator);
    let service = ValuationService::new(
        Arc::new(MemoryRepository::default()),
        estimator.clone(),
        layout,
    );
    (Arc::new(service), estimator)
}
