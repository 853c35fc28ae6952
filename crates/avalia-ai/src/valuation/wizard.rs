use serde::{Deserialize, Serialize};

use super::schema::FormSection;

pub const STEP_COUNT: usize = 4;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    PropertyType,
    PricePerSqm,
    Structure,
    Details,
}

impl WizardStep {
    pub const fn ordered() -> [Self; STEP_COUNT] {
        [
            Self::PropertyType,
            Self::PricePerSqm,
            Self::Structure,
            Self::Details,
        ]
    }

    pub const fn index(self) -> usize {
        match self {
            Self::PropertyType => 0,
            Self::PricePerSqm => 1,
            Self::Structure => 2,
            Self::Details => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ordered().get(index).copied()
    }

    pub const fn section(self) -> FormSection {
        match self {
            Self::PropertyType => FormSection::Identification,
            Self::PricePerSqm => FormSection::Pricing,
            Self::Structure => FormSection::Structure,
            Self::Details => FormSection::Details,
        }
    }

    pub const fn next_label(self) -> &'static str {
        match self {
            Self::PropertyType => "Continuar para Preço",
            Self::PricePerSqm => "Continuar para Cômodos",
            Self::Structure => "Continuar para Detalhes",
            Self::Details => "Finalizar Avaliação",
        }
    }

    pub const fn prev_label(self) -> &'static str {
        "Voltar"
    }

    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Details)
    }
}

/// Outcome of pressing the forward button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepTransition {
    Moved { from: WizardStep, to: WizardStep },
    /// Forward on the last step submits instead of moving.
    Submit,
}

/// Current step of a stepped form. Only moves one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StepController {
    current: WizardStep,
}

impl StepController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> WizardStep {
        self.current
    }

    pub fn advance(&mut self) -> StepTransition {
        let from = self.current;
        match WizardStep::from_index(from.index() + 1) {
            Some(to) => {
                self.current = to;
                StepTransition::Moved { from, to }
            }
            None => StepTransition::Submit,
        }
    }

    /// Returns `false` when already on the first step.
    pub fn retreat(&mut self) -> bool {
        match self.current.index().checked_sub(1).and_then(WizardStep::from_index) {
            Some(previous) => {
                self.current = previous;
                true
            }
            None => false,
        }
    }

    pub fn can_retreat(&self) -> bool {
        self.current.index() > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_on_first_step() {
        let controller = StepController::new();
        assert_eq!(controller.current(), WizardStep::PropertyType);
        assert!(!controller.can_retreat());
    }

    #[test]
    fn advance_moves_one_step_then_submits() {
        let mut controller = StepController::new();
        assert_eq!(
            controller.advance(),
            StepTransition::Moved {
                from: WizardStep::PropertyType,
                to: WizardStep::PricePerSqm
            }
        );
        controller.advance();
        controller.advance();
        assert_eq!(controller.current(), WizardStep::Details);
        assert_eq!(controller.advance(), StepTransition::Submit);
        assert_eq!(controller.current(), WizardStep::Details);
    }

    #[test]
    fn index_stays_in_range_under_any_sequence() {
        let mut controller = StepController::new();
        let pattern = [true, true, false, true, true, true, true, true, false, false, false, false, false, true];
        for _ in 0..5 {
            for forward in pattern {
                if forward {
                    controller.advance();
                } else {
                    controller.retreat();
                }
                assert!(controller.current().index() < STEP_COUNT);
            }
        }
    }

    #[test]
    fn retreat_is_clamped_at_zero() {
        let mut controller = StepController::new();
        assert!(!controller.retreat());
        controller.advance();
        assert!(controller.retreat());
        assert_eq!(controller.current(), WizardStep::PropertyType);
    }

    #[test]
    fn steps_map_to_sections_in_order() {
        let sections: Vec<_> = WizardStep::ordered().into_iter().map(WizardStep::section).collect();
        assert_eq!(sections, FormSection::ordered());
        assert!(WizardStep::Details.is_terminal());
        assert_eq!(WizardStep::Details.next_label(), "Finalizar Avaliação");
    }
}
