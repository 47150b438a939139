pub mod coordinator;
pub mod errors;
pub mod sequencer;
pub mod types;
pub mod validation;

#[cfg(test)]
mod wizard_flow_test;

pub use coordinator::*;
pub use errors::WizardError;
pub use sequencer::*;
pub use types::*;
pub use validation::*;
