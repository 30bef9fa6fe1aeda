use crate::estimate::{
    Pipeline, Request, StorageField, StorageInputs, TrafficField, TrafficInputs,
};
use crate::scenario::error::ScenarioError;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use toml::Value;

/// A scenario file: named form submissions for either pipeline
///
/// ```toml
/// [[traffic]]
/// name = "checkout api"
/// numRequests = 100
/// timeRange = "per min"
///
/// [[storage]]
/// name = "photos"
/// storagePerItem = 2
/// unit = "MB"
/// itemsPerDay = "1000"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScenarioFile {
    #[serde(default)]
    pub traffic: Vec<RawScenario>,
    #[serde(default)]
    pub storage: Vec<RawScenario>,
}

/// One `[[traffic]]` or `[[storage]]` table before its fields are checked
#[derive(Debug, Clone, Deserialize)]
pub struct RawScenario {
    pub name: String,
    #[serde(flatten)]
    pub fields: HashMap<String, Value>,
}

/// A named request ready to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scenario {
    pub name: String,
    pub request: Request,
}

impl Scenario {
    pub fn pipeline(&self) -> Pipeline {
        self.request.pipeline()
    }
}

impl RawScenario {
    /// Field text keyed by wire name. Numbers become their decimal text so they
    /// go through the same validation as typed input.
    fn texts(&self, known: &[&str]) -> Result<HashMap<String, String>, ScenarioError> {
        let mut texts = HashMap::new();
        for (key, value) in &self.fields {
            if !known.contains(&key.as_str()) {
                return Err(ScenarioError::UnknownField {
                    scenario: self.name.clone(),
                    field: key.clone(),
                });
            }

            let text = match value {
                Value::String(s) => s.clone(),
                Value::Integer(i) => i.to_string(),
                Value::Float(f) => f.to_string(),
                other => {
                    return Err(ScenarioError::UnsupportedValue {
                        scenario: self.name.clone(),
                        field: key.clone(),
                        kind: other.type_str(),
                    })
                }
            };
            texts.insert(key.clone(), text);
        }
        Ok(texts)
    }

    fn into_traffic(self) -> Result<Scenario, ScenarioError> {
        let known: Vec<&str> = TrafficField::ALL.iter().map(|f| f.key()).collect();
        let mut texts = self.texts(&known)?;
        let mut take = |field: TrafficField| texts.remove(field.key()).unwrap_or_default();

        let inputs = TrafficInputs {
            num_requests: take(TrafficField::NumRequests),
            time_range: take(TrafficField::TimeRange),
        };
        Ok(Scenario {
            name: self.name,
            request: Request::Traffic(inputs),
        })
    }

    fn into_storage(self) -> Result<Scenario, ScenarioError> {
        let known: Vec<&str> = StorageField::ALL.iter().map(|f| f.key()).collect();
        let mut texts = self.texts(&known)?;
        let mut take = |field: StorageField| texts.remove(field.key()).unwrap_or_default();

        let inputs = StorageInputs {
            storage_per_item: take(StorageField::StoragePerItem),
            unit: take(StorageField::Unit),
            items_per_day: take(StorageField::ItemsPerDay),
            days_per_year: take(StorageField::DaysPerYear),
            years_to_store: take(StorageField::YearsToStore),
        };
        Ok(Scenario {
            name: self.name,
            request: Request::Storage(inputs),
        })
    }
}

impl ScenarioFile {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Vec<Scenario>, ScenarioError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_str(&content)
    }

    pub fn load_from_str(content: &str) -> Result<Vec<Scenario>, ScenarioError> {
        let file: ScenarioFile = toml::from_str(content)?;
        file.into_scenarios()
    }

    /// Traffic scenarios first, then storage, each in file order
    pub fn into_scenarios(self) -> Result<Vec<Scenario>, ScenarioError> {
        let mut seen = HashSet::new();
        let mut scenarios = Vec::with_capacity(self.traffic.len() + self.storage.len());

        let traffic = self.traffic.into_iter().map(RawScenario::into_traffic);
        let storage = self.storage.into_iter().map(RawScenario::into_storage);
        for scenario in traffic.chain(storage) {
            let scenario = scenario?;
            if !seen.insert(scenario.name.clone()) {
                return Err(ScenarioError::DuplicateName(scenario.name));
            }
            scenarios.push(scenario);
        }

        Ok(scenarios)
    }
}
