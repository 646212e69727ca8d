//! Recording adapters that capture interactions to cassettes.

pub mod id_gen;
pub mod repository;

pub use id_gen::RecordingIdGenerator;
pub use repository::RecordingRepository;

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::cassette::recorder::CassetteRecorder;

/// Record an interaction's input and output.
///
/// Mirror of `replaying::next_output`. `Result` outputs serialize in
/// serde's externally tagged form (`{"Ok": v}` / `{"Err": e}`), which the
/// replaying adapters deserialize back into typed results. Values that
/// cannot be represented as JSON are recorded as `null` with a warning, since
/// they will not replay as the original outcome.
pub(crate) fn record_interaction<I, O>(
    recorder: &Arc<Mutex<CassetteRecorder>>,
    port: &str,
    method: &str,
    input: &I,
    output: &O,
) where
    I: Serialize,
    O: Serialize,
{
    let to_json = |what: &str, value: serde_json::Result<serde_json::Value>| {
        value.unwrap_or_else(|error| {
            tracing::warn!(
                port,
                method,
                %error,
                "failed to serialize recorded {what}; storing null"
            );
            serde_json::Value::Null
        })
    };
    let input_json = to_json("input", serde_json::to_value(input));
    let output_json = to_json("output", serde_json::to_value(output));

    let mut guard = recorder.lock().unwrap_or_else(PoisonError::into_inner);
    guard.record(port, method, input_json, output_json);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn unserializable_values_are_recorded_as_null() {
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            std::env::temp_dir().join("unused-null.cassette.yaml"),
            "test",
            "abc",
        )));
        // JSON object keys must be strings.
        let input: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);

        record_interaction(&recorder, "repository", "retrieve", &input, &"out");

        let guard = recorder.lock().unwrap();
        let recorded = &guard.interactions()[0];
        assert!(recorded.input.is_null());
        assert_eq!(recorded.output, serde_json::json!("out"));
    }
}
