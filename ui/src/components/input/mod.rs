pub mod segmented_input;
pub mod validated_input;
pub mod validation_feedback;

pub use segmented_input::*;
pub use validated_input::*;
pub use validation_feedback::*;
