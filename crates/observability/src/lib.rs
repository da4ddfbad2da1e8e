//! Process-wide tracing setup shared by binaries and tests.

/// Log subscriber configuration.
pub mod tracing;

pub use crate::tracing::{LogFormat, init_for_tests, init_with};

/// Install the default subscriber: JSON lines, filtered by `RUST_LOG`
/// (default `info`).
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    init_with(LogFormat::Json, "info");
}
