//! Turns a session into the view a client draws, for either layout.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::catalog::SelectOption;
use super::estimation::EstimateStatus;
use super::resolver::{help_text, label_for, options, visible_in_section};
use super::schema::{FieldId, FormSection};
use super::session::{FormSession, SessionId};
use super::wizard::{WizardStep, STEP_COUNT};

/// Rendering strategy over the one canonical record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormLayout {
    /// Four-step wizard showing one section at a time.
    #[default]
    Stepped,
    /// Every section on one page.
    SinglePage,
}

impl FormLayout {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "stepped" | "wizard" => Some(Self::Stepped),
            "single_page" | "single" | "page" => Some(Self::SinglePage),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub session_id: SessionId,
    pub layout: FormLayout,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<StepView>,
    pub sections: Vec<SectionView>,
    pub estimate: EstimateView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirmation: Option<&'static str>,
    pub opened_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StepView {
    pub step: WizardStep,
    pub index: usize,
    pub total: usize,
    pub progress_label: String,
    pub title: &'static str,
    pub description: &'static str,
    pub next_label: &'static str,
    pub prev_label: &'static str,
    pub can_retreat: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionView {
    pub section: FormSection,
    pub title: &'static str,
    pub fields: Vec<FieldView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    pub field: FieldId,
    pub label: &'static str,
    pub kind: &'static str,
    pub value: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateView {
    pub status: EstimateStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl SectionView {
    pub fn field(&self, id: FieldId) -> Option<&FieldView> {
        self.fields.iter().find(|field| field.field == id)
    }
}

impl FormView {
    pub fn field(&self, id: FieldId) -> Option<&FieldView> {
        self.sections.iter().find_map(|section| section.field(id))
    }

    pub fn field_ids(&self) -> Vec<FieldId> {
        self.sections
            .iter()
            .flat_map(|section| section.fields.iter().map(|field| field.field))
            .collect()
    }
}

pub fn render(session: &FormSession) -> FormView {
    let (step, sections) = match session.layout() {
        FormLayout::Stepped => {
            let current = session.current_step();
            (
                Some(step_view(current, session.controller().can_retreat())),
                vec![current.section()],
            )
        }
        FormLayout::SinglePage => (None, FormSection::ordered().to_vec()),
    };

    let data = session.data();
    let sections = sections
        .into_iter()
        .map(|section| SectionView {
            section,
            title: section.title(),
            fields: visible_in_section(section, data)
                .into_iter()
                .map(|spec| FieldView {
                    field: spec.id,
                    label: label_for(spec, data),
                    kind: spec.kind.name(),
                    value: data.value_of(spec.id),
                    options: options(spec, data),
                    help: help_text(spec, data),
                })
                .collect(),
        })
        .collect();

    FormView {
        session_id: session.id().clone(),
        layout: session.layout(),
        step,
        sections,
        estimate: EstimateView {
            status: session.estimate().status(),
            text: session.estimate().text().map(str::to_string),
        },
        confirmation: session.submission().map(|submission| submission.confirmation),
        opened_at: session.opened_at(),
    }
}

fn step_view(step: WizardStep, can_retreat: bool) -> StepView {
    let section = step.section();
    StepView {
        step,
        index: step.index(),
        total: STEP_COUNT,
        progress_label: format!("Etapa {} de {}", step.index() + 1, STEP_COUNT),
        title: section.title(),
        description: section.description(),
        next_label: step.next_label(),
        prev_label: step.prev_label(),
        can_retreat,
    }
}
