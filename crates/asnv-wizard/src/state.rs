use asnv_core::models::ValidationOutcome;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Wizard step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Editing raw text (initial)
    #[default]
    Input,
    /// Reviewing the parsed document before submission
    Preview,
    /// Reviewing the compliance report
    Report,
    /// Service rejected the document shape; user must edit
    InputError,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "input",
            Self::Preview => "preview",
            Self::Report => "report",
            Self::InputError => "input_error",
        };
        f.write_str(name)
    }
}

/// Session state; written only by [`Wizard`](crate::Wizard)
#[derive(Debug, Clone, Default)]
pub struct WizardState {
    pub(crate) step: Step,
    pub(crate) raw_text: String,
    pub(crate) document: Option<Value>,
    pub(crate) outcome: Option<ValidationOutcome>,
    pub(crate) error: Option<String>,
}

impl WizardState {
    pub fn step(&self) -> Step {
        self.step
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Parsed document, set on a successful "proceed"
    pub fn document(&self) -> Option<&Value> {
        self.document.as_ref()
    }

    /// Last successful validation outcome
    pub fn outcome(&self) -> Option<&ValidationOutcome> {
        self.outcome.as_ref()
    }

    /// Last classified error message
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Builds the renderable view, checking that the current step has the
    /// data it needs
    pub fn view(&self, validating: bool) -> Result<View<'_>, InvariantViolation> {
        match self.step {
            Step::Input => Ok(View::Input {
                raw_text: &self.raw_text,
                error: self.error(),
            }),
            Step::Preview => {
                let document = self
                    .document
                    .as_ref()
                    .ok_or(InvariantViolation::PreviewWithoutDocument)?;
                Ok(View::Preview {
                    document,
                    error: self.error(),
                    validating,
                })
            }
            Step::Report => {
                let outcome = self
                    .outcome
                    .as_ref()
                    .ok_or(InvariantViolation::ReportWithoutOutcome)?;
                Ok(View::Report { outcome })
            }
            Step::InputError => {
                let message = self
                    .error()
                    .ok_or(InvariantViolation::InputErrorWithoutMessage)?;
                Ok(View::InputError {
                    raw_text: &self.raw_text,
                    message,
                })
            }
        }
    }
}

/// What the presentation layer renders for the current step
#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Input {
        raw_text: &'a str,
        error: Option<&'a str>,
    },
    Preview {
        document: &'a Value,
        error: Option<&'a str>,
        /// Validate trigger must be disabled while true
        validating: bool,
    },
    Report {
        outcome: &'a ValidationOutcome,
    },
    InputError {
        raw_text: &'a str,
        message: &'a str,
    },
}

/// A step is missing the data it renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("preview step has no parsed document")]
    PreviewWithoutDocument,

    #[error("report step has no validation outcome")]
    ReportWithoutOutcome,

    #[error("input error step has no message")]
    InputErrorWithoutMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_renders_empty_input() {
        let state = WizardState::default();
        assert_eq!(state.step(), Step::Input);
        assert_eq!(
            state.view(false),
            Ok(View::Input {
                raw_text: "",
                error: None
            })
        );
    }

    #[test]
    fn steps_without_their_data_fail_to_render() {
        let mut state = WizardState::default();

        state.step = Step::Preview;
        assert_eq!(state.view(false), Err(InvariantViolation::PreviewWithoutDocument));

        state.step = Step::Report;
        assert_eq!(state.view(false), Err(InvariantViolation::ReportWithoutOutcome));

        state.step = Step::InputError;
        assert_eq!(state.view(false), Err(InvariantViolation::InputErrorWithoutMessage));
    }
}
