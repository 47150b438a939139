pub mod exit_confirmation;
pub mod loading_indicator;
pub mod permission_prompt;
pub mod step_progress;

pub use exit_confirmation::*;
pub use loading_indicator::*;
pub use permission_prompt::*;
pub use step_progress::*;
