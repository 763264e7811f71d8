//! Process-unique widget identifiers.

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix used for generated ids unless the engine is configured otherwise.
pub const DEFAULT_ID_PREFIX: &str = "_innerui_";

static NEXT_GUID: AtomicU64 = AtomicU64::new(0);

/// Generate a process-unique id with the default prefix.
pub fn make_guid() -> String {
    make_guid_with(DEFAULT_ID_PREFIX)
}

/// Generate a process-unique id with the given prefix.
///
/// The counter is shared by every prefix, so two calls never return the same
/// numeric suffix within one process.
pub fn make_guid_with(prefix: &str) -> String {
    let n = NEXT_GUID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}{n}")
}
