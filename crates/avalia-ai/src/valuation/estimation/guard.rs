use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

static REQUEST_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Identifies one outstanding estimation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    fn next() -> Self {
        Self(REQUEST_SEQUENCE.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EstimateStatus {
    Idle,
    Pending,
    Ready,
    Failed,
}

/// Single-slot holder for a session's estimate.
///
/// At most one request may be pending; its token must be presented to
/// complete it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EstimateSlot {
    #[default]
    Idle,
    Pending(RequestToken),
    Ready(String),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EstimateRejected {
    #[error("an estimate request is already in flight")]
    InFlight,
    #[error("an address or CEP is required before requesting an estimate")]
    MissingLocation,
}

impl EstimateSlot {
    /// Claims the slot, discarding any previous result.
    pub fn claim(&mut self) -> Result<RequestToken, EstimateRejected> {
        if self.is_pending() {
            return Err(EstimateRejected::InFlight);
        }
        let token = RequestToken::next();
        *self = Self::Pending(token);
        Ok(token)
    }

    /// Stores the outcome if `token` still owns the slot. Returns whether it did.
    pub fn complete(&mut self, token: RequestToken, outcome: Result<String, String>) -> bool {
        match self {
            Self::Pending(current) if *current == token => {
                *self = match outcome {
                    Ok(text) => Self::Ready(text),
                    Err(text) => Self::Failed(text),
                };
                true
            }
            _ => false,
        }
    }

    /// Frees the slot when the request owning `token` was abandoned.
    pub fn release(&mut self, token: RequestToken) -> bool {
        match self {
            Self::Pending(current) if *current == token => {
                *self = Self::Idle;
                true
            }
            _ => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending(_))
    }

    pub fn status(&self) -> EstimateStatus {
        match self {
            Self::Idle => EstimateStatus::Idle,
            Self::Pending(_) => EstimateStatus::Pending,
            Self::Ready(_) => EstimateStatus::Ready,
            Self::Failed(_) => EstimateStatus::Failed,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Ready(text) | Self::Failed(text) => Some(text),
            Self::Idle | Self::Pending(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_rejected_while_pending() {
        let mut slot = EstimateSlot::default();
        let token = slot.claim().expect("first claim");
        assert_eq!(slot.claim(), Err(EstimateRejected::InFlight));

        assert!(slot.complete(token, Ok("5000".to_string())));
        assert_eq!(slot.text(), Some("5000"));
        assert_eq!(slot.status(), EstimateStatus::Ready);

        assert!(slot.claim().is_ok(), "slot frees once completed");
        assert_eq!(slot.text(), None);
    }

    #[test]
    fn stale_token_cannot_complete() {
        let mut slot = EstimateSlot::default();
        let first = slot.claim().expect("claim");
        slot.complete(first, Err("boom".to_string()));
        assert_eq!(slot.status(), EstimateStatus::Failed);

        let second = slot.claim().expect("reclaim");
        assert_ne!(first, second);
        assert!(!slot.complete(first, Ok("late".to_string())));
        assert!(slot.is_pending());
    }

    #[test]
    fn release_only_frees_the_owning_token() {
        let mut slot = EstimateSlot::default();
        let first = slot.claim().expect("claim");
        slot.complete(first, Ok("5000".to_string()));
        let second = slot.claim().expect("reclaim");

        assert!(!slot.release(first));
        assert!(slot.is_pending());
        assert!(slot.release(second));
        assert_eq!(slot.status(), EstimateStatus::Idle);
        assert!(!slot.release(second));
    }
}
