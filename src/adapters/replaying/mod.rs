//! Replaying adapters that serve recorded interactions.

pub mod catalog;
pub mod probe;

use std::sync::Mutex;

use serde::de::DeserializeOwned;

use crate::cassette::replayer::CassetteReplayer;
use crate::error::PortError;

pub use catalog::ReplayingCatalog;
pub use probe::ReplayingUrlProbe;

/// Take the output of the next `port::method` interaction.
///
/// # Panics
///
/// Panics if the replayer is poisoned or exhausted.
pub(crate) fn next_output(
    replayer: &Mutex<CassetteReplayer>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method).output
}

/// Decode an output recorded by `recording::record_result`.
///
/// `{"Err": msg}` becomes an error carrying `msg`; `{"Ok": v}` is
/// deserialized into `T`. A bare value is treated as `Ok`.
///
/// # Panics
///
/// Panics if the recorded value does not deserialize into `T`.
pub(crate) fn replay_result<T: DeserializeOwned>(
    output: serde_json::Value,
    port: &str,
    method: &str,
) -> Result<T, PortError> {
    if let Some(err) = output.get("Err") {
        let msg = err.as_str().map_or_else(|| err.to_string(), str::to_string);
        return Err(msg.into());
    }
    let value = match output {
        serde_json::Value::Object(mut map) if map.contains_key("Ok") => {
            map.remove("Ok").unwrap_or_default()
        }
        other => other,
    };
    Ok(serde_json::from_value(value)
        .unwrap_or_else(|e| panic!("{port}::{method}: recorded output does not match: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ok_wrapper_is_unwrapped() {
        let value: u16 = replay_result(json!({"Ok": 302}), "probe", "probe_url").unwrap();
        assert_eq!(value, 302);
    }

    #[test]
    fn bare_value_is_ok() {
        let value: u16 = replay_result(json!(200), "probe", "probe_url").unwrap();
        assert_eq!(value, 200);
    }

    #[test]
    fn err_wrapper_becomes_error() {
        let err = replay_result::<u16>(json!({"Err": "timed out"}), "probe", "probe_url").unwrap_err();
        assert_eq!(err.to_string(), "timed out");
    }

    #[test]
    fn unit_result_replays_from_null() {
        replay_result::<()>(json!({"Ok": null}), "catalog", "patch_resource_url").unwrap();
    }

    #[test]
    #[should_panic(expected = "probe::probe_url: recorded output does not match")]
    fn mismatched_output_panics() {
        let _ = replay_result::<u16>(json!({"Ok": "not a number"}), "probe", "probe_url");
    }
}
