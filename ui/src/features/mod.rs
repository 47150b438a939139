//! Feature modules
//!
//! - **wizard**: the step engine shared by both flows
//! - **registration**: account sign-up steps and the username check
//! - **profile**: profile-creation steps and social links
//! - **segmented**: multi-box date and code entry

pub mod profile;
pub mod registration;
pub mod segmented;
pub mod wizard;
