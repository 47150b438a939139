pub mod login_form;
pub mod profile_forms;
pub mod registration_forms;
pub mod wizard_controls;

pub use login_form::*;
pub use profile_forms::*;
pub use registration_forms::*;
pub use wizard_controls::*;
