// JSON-in/JSON-out entry points for form frontends (used by the wasm bindings)

use crate::estimate::{compute, Pipeline, Request, SizeUnit, TimeUnit, UnitTable};
use serde_json::{json, Value as JsonValue};

/// Run `pipeline` on a JSON object of raw form text
///
/// Missing keys count as blank fields. The result is the estimate envelope:
/// `{"ok": true, "result": {...}}` or `{"ok": false, "errors": {...}}`.
pub fn compute_from_json(pipeline: Pipeline, inputs_json: &str) -> Result<JsonValue, serde_json::Error> {
    let request = match pipeline {
        Pipeline::Traffic => Request::Traffic(serde_json::from_str(inputs_json)?),
        Pipeline::Storage => Request::Storage(serde_json::from_str(inputs_json)?),
    };
    Ok(compute(&request).to_json())
}

/// Selectable labels for the two unit dropdowns
pub fn unit_labels() -> JsonValue {
    json!({
        "timeRange": TimeUnit::labels(),
        "unit": SizeUnit::labels(),
    })
}
