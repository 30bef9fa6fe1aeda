use crate::estimate::{compute, Estimate, Pipeline};
use crate::scenario::config::Scenario;
use serde_json::{Map, Value as JsonValue};
use tracing::info;

/// A scenario paired with its estimate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub estimate: Estimate,
}

impl ScenarioOutcome {
    pub fn pipeline(&self) -> Pipeline {
        self.estimate.pipeline()
    }

    /// `{"name", "pipeline", "ok", "result" | "errors"}`
    pub fn to_json(&self) -> JsonValue {
        let mut object = Map::new();
        object.insert("name".to_string(), JsonValue::String(self.name.clone()));
        object.insert(
            "pipeline".to_string(),
            JsonValue::String(self.pipeline().to_string()),
        );
        if let JsonValue::Object(envelope) = self.estimate.to_json() {
            object.extend(envelope);
        }
        JsonValue::Object(object)
    }
}

/// Run every scenario independently, preserving order
pub fn run_scenarios(scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
    scenarios
        .iter()
        .map(|scenario| {
            let estimate = compute(&scenario.request);
            info!(
                name = %scenario.name,
                pipeline = %scenario.pipeline(),
                ok = estimate.is_ok(),
                "scenario evaluated"
            );
            ScenarioOutcome {
                name: scenario.name.clone(),
                estimate,
            }
        })
        .collect()
}

/// JSON array of every outcome
pub fn outcomes_to_json(outcomes: &[ScenarioOutcome]) -> JsonValue {
    JsonValue::Array(outcomes.iter().map(ScenarioOutcome::to_json).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::config::ScenarioFile;
    use serde_json::json;

    const FILE: &str = r#"
[[traffic]]
name = "api"
numRequests = 100
timeRange = "per min"

[[storage]]
name = "broken"
storagePerItem = -5
itemsPerDay = 10
"#;

    #[test]
    fn test_run_scenarios() {
        let scenarios = ScenarioFile::load_from_str(FILE).unwrap();
        let outcomes = run_scenarios(&scenarios);

        assert_eq!(outcomes.len(), 2);
        assert!(outcomes[0].estimate.is_ok());
        assert!(!outcomes[1].estimate.is_ok());
        assert_eq!(outcomes[1].pipeline(), Pipeline::Storage);
    }

    #[test]
    fn test_outcome_json() {
        let scenarios = ScenarioFile::load_from_str(FILE).unwrap();
        let json = outcomes_to_json(&run_scenarios(&scenarios));

        assert_eq!(json[0]["name"], "api");
        assert_eq!(json[0]["pipeline"], "traffic");
        assert_eq!(json[0]["ok"], true);
        assert_eq!(json[0]["result"]["perHour"], "6.00 K req");

        assert_eq!(json[1]["ok"], false);
        assert_eq!(
            json[1]["errors"],
            json!({ "storagePerItem": "Storage per item must not be negative." })
        );
        assert!(json[1].get("result").is_none());
    }
}
