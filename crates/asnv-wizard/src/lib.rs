pub mod config;
pub mod controller;
pub mod preview;
pub mod reporters;
pub mod session;
pub mod state;

pub use config::Config;
pub use controller::{ValidationTicket, Wizard};
pub use session::Session;
pub use state::{InvariantViolation, Step, View, WizardState};

/// Report output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}
