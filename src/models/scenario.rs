use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SeaLevelError;

/// Number of sea-level-rise scenario buckets (1 m through 5 m).
pub const SCENARIO_BUCKETS: usize = 5;

/// Impact percentages for one country at 1 m, 2 m, 3 m, 4 m and 5 m of
/// sea-level rise, in bucket order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSeries {
    values: [f64; SCENARIO_BUCKETS],
}

impl ScenarioSeries {
    pub fn new(values: [f64; SCENARIO_BUCKETS]) -> Self {
        Self { values }
    }

    /// Bucket values in order, 1 m first.
    pub fn values(&self) -> &[f64; SCENARIO_BUCKETS] {
        &self.values
    }

    /// The bucket x-axis in millimetres: 1000, 2000, ..., 5000.
    ///
    /// Buckets are tabulated in metres but the sea-level series is in
    /// millimetres, so fits against this axis keep the units consistent.
    pub fn bucket_axis_mm() -> [f64; SCENARIO_BUCKETS] {
        [1000.0, 2000.0, 3000.0, 4000.0, 5000.0]
    }
}

/// A loaded per-country scenario table, keyed by three-letter country code.
///
/// Iteration order equals the order countries first appear in the source
/// file. Downstream map rendering joins output values positionally with a
/// separately loaded country-code reference list, so this order must never
/// be disturbed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountryTable {
    /// Name or identifier for this table (e.g. the metric it tabulates)
    pub name: String,
    countries: IndexMap<String, ScenarioSeries>,
}

impl CountryTable {
    /// Create a new empty table.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            countries: IndexMap::new(),
        }
    }

    /// Insert a country's scenario series.
    pub fn insert(
        &mut self,
        code: impl Into<String>,
        series: ScenarioSeries,
    ) -> Result<(), SeaLevelError> {
        let code = code.into();
        if code.is_empty() {
            return Err(SeaLevelError::InvalidParameter(
                "country code must be non-empty".to_string(),
            ));
        }
        if self.countries.contains_key(&code) {
            return Err(SeaLevelError::InvalidParameter(format!(
                "duplicate country code '{code}' in table '{}'",
                self.name
            )));
        }
        self.countries.insert(code, series);
        Ok(())
    }

    /// Look up a country by code.
    pub fn get(&self, code: &str) -> Result<&ScenarioSeries, SeaLevelError> {
        self.countries
            .get(code)
            .ok_or_else(|| SeaLevelError::MissingKey(format!("country code '{code}'")))
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    /// Country codes in first-appearance order.
    pub fn codes(&self) -> Vec<&str> {
        self.countries.keys().map(String::as_str).collect()
    }

    /// Iterate (code, series) pairs in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScenarioSeries)> {
        self.countries.iter().map(|(k, v)| (k.as_str(), v))
    }
}
