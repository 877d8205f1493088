//! Shared helpers for command execution.

pub mod logging;

pub use logging::initialize_logging;
