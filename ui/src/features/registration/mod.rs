//! Account registration: six strict steps ending in code confirmation.

pub mod availability;
pub mod steps;
pub mod submission;

pub use availability::{AvailabilityStatus, UsernameAvailability};
pub use steps::{
    contact_candidate, fields, normalize_phone, registration_schema, registration_wizard, username_is_well_formed,
    RegistrationStep,
};
pub use submission::{
    confirm_request, register_request, step_failure, submit_confirmation_step,
    submit_contact_step,
};
