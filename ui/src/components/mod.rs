//! User Interface Components
//!
//! Reusable Dioxus components for the onboarding screens:
//!
//! - **forms**: one form per wizard step, the login form and the shared wizard controls
//! - **display**: step progress, loading, exit confirmation and permission prompts
//! - **input**: validated text inputs, availability feedback and segmented boxes
//!
//! Components stay thin; validation, sequencing and submission live in
//! `features` and `services`.

pub mod display;
pub mod forms;
pub mod input;
