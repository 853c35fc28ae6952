use std::sync::Arc;

use axum::http::StatusCode;
use tracing::{debug, info, warn};

use super::edit::FieldEdit;
use super::estimation::{display_text, EstimateRejected, PriceEstimator, RequestToken};
use super::render::FormLayout;
use super::repository::{RepositoryError, SessionRepository};
use super::session::{AdvanceOutcome, FormSession, SessionId};

/// Service composing the session store and the estimation transport.
pub struct ValuationService<R, E> {
    repository: Arc<R>,
    estimator: Arc<E>,
    default_layout: FormLayout,
}

impl<R, E> ValuationService<R, E>
where
    R: SessionRepository + 'static,
    E: PriceEstimator + 'static,
{
    pub fn new(repository: Arc<R>, estimator: Arc<E>, default_layout: FormLayout) -> Self {
        Self {
            repository,
            estimator,
            default_layout,
        }
    }

    pub fn default_layout(&self) -> FormLayout {
        self.default_layout
    }

    /// Start a new, empty form.
    pub fn open(&self, layout: Option<FormLayout>) -> Result<FormSession, ValuationServiceError> {
        let session = FormSession::open(layout.unwrap_or(self.default_layout));
        let stored = self.repository.insert(session)?;
        info!(session = %stored.id(), layout = ?stored.layout(), "valuation form opened");
        Ok(stored)
    }

    pub fn get(&self, id: &SessionId) -> Result<FormSession, ValuationServiceError> {
        let session = self.repository.fetch(id)?.ok_or(RepositoryError::NotFound)?;
        Ok(session)
    }

    pub fn edit(
        &self,
        id: &SessionId,
        edits: &[FieldEdit],
    ) -> Result<FormSession, ValuationServiceError> {
        let session = self.repository.update(id, |session| {
            session.apply_all(edits);
            session.clone()
        })?;
        debug!(session = %id, edits = edits.len(), "applied field edits");
        Ok(session)
    }

    pub fn advance(
        &self,
        id: &SessionId,
    ) -> Result<(FormSession, AdvanceOutcome), ValuationServiceError> {
        let result = self.repository.update(id, |session| {
            let outcome = session.advance();
            (session.clone(), outcome)
        })?;
        Ok(result)
    }

    pub fn retreat(&self, id: &SessionId) -> Result<FormSession, ValuationServiceError> {
        let session = self.repository.update(id, |session| {
            session.retreat();
            session.clone()
        })?;
        Ok(session)
    }

    /// Request a price estimate and store its display text on the session.
    ///
    /// Transport and decoding failures are not errors here: they become the
    /// fixed error text. Only a busy slot or a missing location is rejected.
    /// Dropping the returned future mid-request frees the slot again.
    pub async fn estimate(&self, id: &SessionId) -> Result<FormSession, ValuationServiceError> {
        let (token, request) = self
            .repository
            .update(id, |session| session.begin_estimate())??;
        let pending = PendingEstimate {
            repository: self.repository.clone(),
            id: id.clone(),
            token: Some(token),
        };

        let result = self.estimator.estimate(request).await;
        if let Err(err) = &result {
            warn!(session = %id, error = %err, "price estimation failed");
        }
        let text = display_text(&result);
        let outcome = match result {
            Ok(_) => Ok(text),
            Err(_) => Err(text),
        };

        let session = pending.complete(outcome)?;
        Ok(session)
    }
}

/// Owns a claimed estimate slot until the request finishes.
///
/// If dropped before `complete`, the slot is released so the session can
/// request again.
struct PendingEstimate<R: SessionRepository> {
    repository: Arc<R>,
    id: SessionId,
    token: Option<RequestToken>,
}

impl<R: SessionRepository> PendingEstimate<R> {
    fn complete(mut self, outcome: Result<String, String>) -> Result<FormSession, RepositoryError> {
        let Some(token) = self.token.take() else {
            return self.repository.fetch(&self.id)?.ok_or(RepositoryError::NotFound);
        };
        self.repository.update(&self.id, |session| {
            if !session.finish_estimate(token, outcome) {
                debug!(session = %session.id(), "discarding stale estimate");
            }
            session.clone()
        })
    }
}

impl<R: SessionRepository> Drop for PendingEstimate<R> {
    fn drop(&mut self) {
        let Some(token) = self.token.take() else {
            return;
        };
        match self
            .repository
            .update(&self.id, |session| session.release_estimate(token))
        {
            Ok(true) => debug!(session = %self.id, "estimate abandoned, slot released"),
            Ok(false) => {}
            Err(err) => warn!(session = %self.id, error = %err, "could not release estimate slot"),
        }
    }
}

/// Error raised by the valuation service.
#[derive(Debug, thiserror::Error)]
pub enum ValuationServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Rejected(#[from] EstimateRejected),
}

impl ValuationServiceError {
    /// HTTP status reported for this error, shared by every response path.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            Self::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
            Self::Repository(RepositoryError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Rejected(EstimateRejected::InFlight) => StatusCode::CONFLICT,
            Self::Rejected(EstimateRejected::MissingLocation) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}
