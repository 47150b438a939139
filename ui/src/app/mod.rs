//! Screens, one per route, composed from `components` over the wizard engine
//! and the auth service.

pub mod profile_flow;
pub mod registration_flow;
pub mod session;
pub mod welcome;
pub mod wizard_scope;

pub use profile_flow::*;
pub use registration_flow::*;
pub use session::*;
pub use welcome::*;
pub use wizard_scope::*;
