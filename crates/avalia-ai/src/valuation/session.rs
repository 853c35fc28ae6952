use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::PropertyData;
use super::edit::{apply_edit, FieldEdit};
use super::estimation::{EstimateRejected, EstimateSlot, EstimationRequest, RequestToken};
use super::render::FormLayout;
use super::wizard::{StepController, StepTransition, WizardStep};

pub const SUBMISSION_CONFIRMATION: &str = "Avaliação finalizada! Dados enviados com sucesso.";

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    fn next() -> Self {
        let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("form-{id:06}"))
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Snapshot of the record taken when the user finalises the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Submission {
    pub submitted_at: DateTime<Utc>,
    pub data: PropertyData,
    pub confirmation: &'static str,
}

/// What a forward action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Moved(WizardStep),
    Submitted,
}

/// Form state for one user filling in one form.
#[derive(Debug, Clone)]
pub struct FormSession {
    id: SessionId,
    layout: FormLayout,
    data: PropertyData,
    controller: StepController,
    estimate: EstimateSlot,
    submission: Option<Submission>,
    opened_at: DateTime<Utc>,
}

impl FormSession {
    pub fn open(layout: FormLayout) -> Self {
        Self {
            id: SessionId::next(),
            layout,
            data: PropertyData::default(),
            controller: StepController::new(),
            estimate: EstimateSlot::default(),
            submission: None,
            opened_at: Utc::now(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn layout(&self) -> FormLayout {
        self.layout
    }

    pub fn data(&self) -> &PropertyData {
        &self.data
    }

    pub fn current_step(&self) -> WizardStep {
        self.controller.current()
    }

    pub fn controller(&self) -> &StepController {
        &self.controller
    }

    pub fn estimate(&self) -> &EstimateSlot {
        &self.estimate
    }

    pub fn submission(&self) -> Option<&Submission> {
        self.submission.as_ref()
    }

    pub fn opened_at(&self) -> DateTime<Utc> {
        self.opened_at
    }

    /// Applies one edit, replacing the record as a whole.
    pub fn apply(&mut self, edit: &FieldEdit) {
        self.data = apply_edit(&self.data, edit);
    }

    pub fn apply_all<'a>(&mut self, edits: impl IntoIterator<Item = &'a FieldEdit>) {
        let next = edits
            .into_iter()
            .fold(self.data.clone(), |data, edit| apply_edit(&data, edit));
        self.data = next;
    }

    /// Forward button. Single-page forms have no steps and submit directly.
    pub fn advance(&mut self) -> AdvanceOutcome {
        let transition = match self.layout {
            FormLayout::Stepped => self.controller.advance(),
            FormLayout::SinglePage => StepTransition::Submit,
        };

        match transition {
            StepTransition::Moved { to, .. } => AdvanceOutcome::Moved(to),
            StepTransition::Submit => {
                self.submit();
                AdvanceOutcome::Submitted
            }
        }
    }

    /// Back button. Returns `false` when there is nowhere to go.
    pub fn retreat(&mut self) -> bool {
        match self.layout {
            FormLayout::Stepped => self.controller.retreat(),
            FormLayout::SinglePage => false,
        }
    }

    fn submit(&mut self) {
        let payload = serde_json::to_string(&self.data).unwrap_or_default();
        info!(session = %self.id, %payload, "valuation form submitted");
        self.submission = Some(Submission {
            submitted_at: Utc::now(),
            data: self.data.clone(),
            confirmation: SUBMISSION_CONFIRMATION,
        });
    }

    /// Claims the estimate slot and builds the outbound request.
    pub fn begin_estimate(&mut self) -> Result<(RequestToken, EstimationRequest), EstimateRejected> {
        if self.estimate.is_pending() {
            return Err(EstimateRejected::InFlight);
        }
        let address = self
            .data
            .location()
            .ok_or(EstimateRejected::MissingLocation)?;
        let token = self.estimate.claim()?;

        Ok((
            token,
            EstimationRequest {
                property_data: self.data.clone(),
                address,
            },
        ))
    }

    pub fn finish_estimate(&mut self, token: RequestToken, outcome: Result<String, String>) -> bool {
        self.estimate.complete(token, outcome)
    }

    /// Abandons the pending request owning `token`, leaving the slot idle.
    pub fn release_estimate(&mut self, token: RequestToken) -> bool {
        self.estimate.release(token)
    }
}
