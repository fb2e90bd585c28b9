//! Utility modules for common functionality
//!
//! Logging and terminal progress reporting used throughout the application.

pub mod logger;
pub(crate) mod progress;
