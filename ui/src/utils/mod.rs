//! Utility Functions and Cross-Cutting Concerns
//!
//! - **console_macros**: timestamped logging macros (browser console on WASM, `tracing` natively)
//! - **timing**: target-independent sleep and calendar helpers
//! - **validation**: CSS class/style helpers for validation state
//!
//! These utilities behave consistently across native tests and WASM
//! deployment targets.

pub mod console_macros;
pub mod timing;
pub mod validation;

pub use validation::*;
