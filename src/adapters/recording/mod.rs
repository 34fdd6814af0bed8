//! Recording adapters that capture interactions to cassettes.

pub mod catalog;
pub mod probe;

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

pub use catalog::RecordingCatalog;
pub use probe::RecordingUrlProbe;

/// Record a `Result<T, E>` interaction using the Ok/Err JSON convention.
///
/// Mirror of `replaying::replay_result`:
/// - `Ok(v)` is serialized as `{"Ok": v}`
/// - `Err(e)` is serialized as `{"Err": e.to_string()}`
///
/// A value that cannot be serialized is recorded as `null` with a warning,
/// so a recording problem never fails the run being recorded.
pub(crate) fn record_result<T, E, I>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    result: &Result<T, E>,
) where
    T: Serialize,
    E: std::fmt::Display,
    I: Serialize,
{
    let to_json = |value: serde_json::Result<serde_json::Value>| {
        value.unwrap_or_else(|e| {
            tracing::warn!(port, method, error = %e, "failed to serialize recorded value");
            serde_json::Value::Null
        })
    };

    let input_json = to_json(serde_json::to_value(input));
    let output_json = match result {
        Ok(v) => serde_json::json!({ "Ok": to_json(serde_json::to_value(v)) }),
        Err(e) => serde_json::json!({ "Err": e.to_string() }),
    };

    match recorder.lock() {
        Ok(mut guard) => guard.record(port, method, input_json, output_json),
        Err(e) => tracing::warn!(port, method, error = %e, "recorder lock poisoned"),
    }
}
