// WebAssembly bindings for the estimator forms
use crate::bridge;
use crate::estimate::Pipeline;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct NapkinWasm {}

impl Default for NapkinWasm {
    fn default() -> Self {
        Self::new()
    }
}

fn to_js_error(e: serde_json::Error) -> JsValue {
    JsValue::from_str(&format!("Failed to parse inputs JSON: {}", e))
}

#[wasm_bindgen]
impl NapkinWasm {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {}
    }

    /// Estimate traffic from `{"numRequests", "timeRange"}`
    /// Returns JSON string `{"ok": true, "result": ...}` or `{"ok": false, "errors": ...}`
    #[wasm_bindgen]
    pub fn compute_traffic(&self, inputs_json: &str) -> Result<String, JsValue> {
        let out = bridge::compute_from_json(Pipeline::Traffic, inputs_json).map_err(to_js_error)?;
        Ok(out.to_string())
    }

    /// Estimate storage from `{"storagePerItem", "unit", "itemsPerDay", "daysPerYear", "yearsToStore"}`
    /// Returns the same envelope as `compute_traffic`
    #[wasm_bindgen]
    pub fn compute_storage(&self, inputs_json: &str) -> Result<String, JsValue> {
        let out = bridge::compute_from_json(Pipeline::Storage, inputs_json).map_err(to_js_error)?;
        Ok(out.to_string())
    }

    /// Dropdown labels: `{"timeRange": [...], "unit": [...]}`
    #[wasm_bindgen]
    pub fn table_labels(&self) -> String {
        bridge::unit_labels().to_string()
    }
}
