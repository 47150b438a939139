//! Onboarding client: account registration, login and profile creation.
//!
//! - **features**: the wizard engine and the registration, profile and
//!   segmented-input logic built on it
//! - **services**: HTTP client, token storage, session refresh, config,
//!   navigation and media picking
//! - **components** / **app**: Dioxus views over the above

pub mod app;
pub mod components;
pub mod features;
pub mod services;
pub mod utils;
