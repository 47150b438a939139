use thiserror::Error;

/// Programming and configuration errors raised by the wizard engine.
///
/// Field validation failures are not errors; they are reported through
/// `FieldErrors` on the wizard state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("A wizard flow needs at least one step")]
    EmptyFlow,

    #[error("Step index {index} is out of range for a flow of {len} steps")]
    OutOfRange { index: usize, len: usize },

    #[error("Step '{step}' cannot be skipped")]
    SkipNotAllowed { step: String },

    #[error("Missing field '{field}' in collected form data")]
    MissingField { field: String },
}
