use tracing::debug;

use crate::analysis::regression;
use crate::error::SeaLevelError;
use crate::models::{CountryTable, ScenarioSeries};

/// Default fit degree for the impact-vs-sea-level-rise regression.
///
/// Quadratic, to capture impact accelerating at higher rise.
pub const DEFAULT_IMPACT_DEGREE: usize = 2;

/// Predicted impact percentage for one country at a given sea-level rise.
///
/// The scenario buckets (1 m through 5 m) form the observed x-axis in
/// millimetres, matching the unit of the sea-level series. A raw
/// extrapolation can dip below zero near the origin; that is a modeling
/// artifact, not a real effect, so negative results are clamped to 0.0.
pub fn project_impact(
    scenario: &ScenarioSeries,
    sea_level_rise_mm: f64,
    degree: usize,
) -> Result<f64, SeaLevelError> {
    let x_observed = ScenarioSeries::bucket_axis_mm();
    let predicted =
        regression::fit_and_predict(&x_observed, scenario.values(), &[sea_level_rise_mm], degree)?;
    debug!(sea_level_rise_mm, raw = predicted[0], "projected impact");
    Ok(predicted[0].max(0.0))
}

/// Predicted impact for every country in the table, in table iteration order.
///
/// The result has one entry per country; positional alignment with an
/// externally loaded country-code reference list is the caller's
/// responsibility and relies on both files sharing row order.
pub fn project_all(
    table: &CountryTable,
    sea_level_rise_mm: f64,
    degree: usize,
) -> Result<Vec<f64>, SeaLevelError> {
    let mut results = Vec::with_capacity(table.len());
    for (_, scenario) in table.iter() {
        results.push(project_impact(scenario, sea_level_rise_mm, degree)?);
    }
    Ok(results)
}

/// Predicted impact for a single country looked up by code.
pub fn project_country(
    table: &CountryTable,
    code: &str,
    sea_level_rise_mm: f64,
    degree: usize,
) -> Result<f64, SeaLevelError> {
    let scenario = table.get(code)?;
    project_impact(scenario, sea_level_rise_mm, degree)
}
