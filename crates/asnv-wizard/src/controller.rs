use crate::state::{InvariantViolation, Step, View, WizardState};
use asnv_client::{cancel_pair, CancelHandle, CancelSignal};
use asnv_core::error::{EMPTY_INPUT_MESSAGE, MALFORMED_INPUT_MESSAGE};
use asnv_core::models::ValidationOutcome;
use asnv_core::ClassifiedError;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Permission to run one validation call, issued by [`Wizard::begin_validation`]
#[derive(Debug)]
pub struct ValidationTicket {
    id: u64,
    raw_text: String,
    signal: CancelSignal,
}

impl ValidationTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Raw text as it was when the preview was entered
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    /// Fires when the user navigates away from the preview
    pub fn signal(&self) -> CancelSignal {
        self.signal.clone()
    }
}

#[derive(Debug)]
struct InFlight {
    id: u64,
    cancel: CancelHandle,
}

/// Owns the [`WizardState`] and applies user actions and service results.
///
/// Performs no I/O: [`begin_validation`](Self::begin_validation) hands out a
/// ticket and [`complete_validation`](Self::complete_validation) applies the
/// result only while that ticket is current.
#[derive(Debug, Default)]
pub struct Wizard {
    state: WizardState,
    in_flight: Option<InFlight>,
    issued: u64,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> Step {
        self.state.step
    }

    /// True while a validation ticket is outstanding
    pub fn is_validating(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Renderable view of the current step
    pub fn view(&self) -> Result<View<'_>, InvariantViolation> {
        self.state.view(self.is_validating())
    }

    /// Replaces the raw text; only accepted on the input step
    pub fn set_raw_text(&mut self, text: impl Into<String>) -> bool {
        if self.state.step != Step::Input {
            debug!(step = %self.state.step, "Ignoring edit outside the input step");
            return false;
        }
        self.state.raw_text = text.into();
        true
    }

    /// "proceed": parse the raw text and move to the preview
    pub fn proceed(&mut self) {
        if self.state.step != Step::Input {
            debug!(step = %self.state.step, "Ignoring proceed outside the input step");
            return;
        }

        if self.state.raw_text.trim().is_empty() {
            self.state.error = Some(EMPTY_INPUT_MESSAGE.to_string());
            return;
        }

        match serde_json::from_str::<Value>(&self.state.raw_text) {
            Ok(document) => {
                self.state.document = Some(document);
                self.state.error = None;
                self.enter_preview();
            }
            Err(err) => {
                debug!(error = %err, "Raw text failed to parse");
                self.state.error = Some(MALFORMED_INPUT_MESSAGE.to_string());
            }
        }
    }

    /// "validate": issues a ticket if on the preview with nothing in flight.
    ///
    /// Returns `None` for a duplicate trigger, which is ignored.
    pub fn begin_validation(&mut self) -> Option<ValidationTicket> {
        if self.state.step != Step::Preview {
            debug!(step = %self.state.step, "Ignoring validate outside the preview step");
            return None;
        }
        if let Some(in_flight) = &self.in_flight {
            warn!(ticket = in_flight.id, "Validation already in flight, ignoring trigger");
            return None;
        }

        self.issued += 1;
        let (cancel, signal) = cancel_pair();
        self.in_flight = Some(InFlight {
            id: self.issued,
            cancel,
        });
        self.state.error = None;
        debug!(ticket = self.issued, "Validation started");

        Some(ValidationTicket {
            id: self.issued,
            raw_text: self.state.raw_text.clone(),
            signal,
        })
    }

    /// Applies the result of the call made for `ticket`.
    ///
    /// Returns false if the ticket is stale (cancelled or superseded) or the
    /// result is a control outcome; the state is then left untouched.
    pub fn complete_validation(
        &mut self,
        ticket: &ValidationTicket,
        result: Result<ValidationOutcome, ClassifiedError>,
    ) -> bool {
        match &self.in_flight {
            Some(in_flight) if in_flight.id == ticket.id => {}
            _ => {
                debug!(ticket = ticket.id, "Dropping stale validation result");
                return false;
            }
        }
        self.in_flight = None;

        match result {
            Ok(outcome) => {
                info!(
                    ticket = ticket.id,
                    valid = outcome.valid,
                    errors = outcome.error_count(),
                    "Showing validation report"
                );
                self.state.outcome = Some(outcome);
                self.state.error = None;
                self.state.step = Step::Report;
                true
            }
            Err(err) if !err.kind.is_user_facing() => {
                debug!(ticket = ticket.id, kind = ?err.kind, "Validation ended without a result");
                false
            }
            Err(err) if err.kind.returns_to_input() => {
                warn!(ticket = ticket.id, kind = ?err.kind, message = %err.message, "Document rejected");
                self.state.error = Some(err.message);
                self.state.step = Step::InputError;
                true
            }
            Err(err) => {
                warn!(ticket = ticket.id, kind = ?err.kind, message = %err.message, "Validation failed, retry available");
                self.state.error = Some(err.message);
                true
            }
        }
    }

    /// "back": preview to input, or report to preview
    pub fn back(&mut self) {
        match self.state.step {
            Step::Preview => {
                self.cancel_in_flight();
                self.state.step = Step::Input;
            }
            Step::Report => self.enter_preview(),
            step => debug!(step = %step, "Ignoring back"),
        }
    }

    /// "back to edit": leave the input-error step
    pub fn back_to_edit(&mut self) {
        if self.state.step != Step::InputError {
            debug!(step = %self.state.step, "Ignoring back to edit");
            return;
        }
        self.state.error = None;
        self.state.step = Step::Input;
    }

    /// "reset" / "new document": start over from the report
    pub fn reset(&mut self) {
        if self.state.step != Step::Report {
            debug!(step = %self.state.step, "Ignoring reset outside the report step");
            return;
        }
        self.state.document = None;
        self.state.outcome = None;
        self.state.step = Step::Input;
    }

    /// "clear form": from any step, back to an empty input
    pub fn clear_form(&mut self) {
        self.cancel_in_flight();
        self.state = WizardState::default();
    }

    /// "load template": from any step, replace the raw text with a sample
    pub fn load_template(&mut self, raw_text: String) {
        self.cancel_in_flight();
        self.state.raw_text = raw_text;
        self.state.document = None;
        self.state.outcome = None;
        self.state.error = None;
        self.state.step = Step::Input;
    }

    fn enter_preview(&mut self) {
        // Nothing may be in flight from an earlier visit.
        self.cancel_in_flight();
        self.state.step = Step::Preview;
    }

    fn cancel_in_flight(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            debug!(ticket = in_flight.id, "Cancelling in-flight validation");
            in_flight.cancel.cancel();
        }
    }
}
