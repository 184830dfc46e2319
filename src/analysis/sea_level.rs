use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::regression;
use crate::error::SeaLevelError;
use crate::models::TimeSeries;

/// Last year covered by the historical datasets; projections start after it.
pub const BASE_YEAR: i32 = 2013;

/// Default fit degree for the sea-level-vs-CO2 regression.
pub const DEFAULT_SEA_LEVEL_DEGREE: usize = 1;

/// User-supplied projection parameters.
///
/// The emission rate is annual; the total additional CO2 budget is derived
/// by multiplying it over the projection horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// Year to project to; must be after [`BASE_YEAR`]
    pub target_year: i32,
    /// Annual CO2 emission rate in metric tonnes; must be at least 1
    pub annual_emission_rate: f64,
}

impl ProjectionRequest {
    /// Check the public preconditions on the request.
    pub fn validate(&self) -> Result<(), SeaLevelError> {
        if self.target_year <= BASE_YEAR {
            return Err(SeaLevelError::InvalidParameter(format!(
                "target year must be after {BASE_YEAR}, got {}",
                self.target_year
            )));
        }
        if self.annual_emission_rate < 1.0 {
            return Err(SeaLevelError::InvalidParameter(format!(
                "annual emission rate must be at least 1, got {}",
                self.annual_emission_rate
            )));
        }
        Ok(())
    }

    /// Number of future points to project, one per year after [`BASE_YEAR`].
    pub fn horizon_years(&self) -> usize {
        (self.target_year - BASE_YEAR).max(0) as usize
    }

    /// Total additional CO2 emitted over the horizon.
    pub fn total_additional_co2(&self) -> f64 {
        self.horizon_years() as f64 * self.annual_emission_rate
    }
}

/// `count` evenly spaced values from `start` to `end` inclusive.
///
/// A single-point span yields just `start`, matching numpy's linspace.
fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    if count == 1 {
        return vec![start];
    }
    let step = (end - start) / (count - 1) as f64;
    (0..count)
        .map(|i| {
            if i == count - 1 {
                end
            } else {
                start + step * i as f64
            }
        })
        .collect()
}

/// Project future sea level against a growing cumulative CO2 budget.
///
/// The observed pairs are built by joining the two series on matching year
/// keys, in the CO2 series' iteration order. The future x-axis is
/// `horizon_years` evenly spaced budget values from the last observed CO2
/// value to that value plus `total_additional_co2`, inclusive; the fitted
/// polynomial (degree 1 by default) is evaluated at each. The result has
/// exactly `horizon_years` points in chronological order.
pub fn project_sea_level(
    sea_level: &TimeSeries,
    co2: &TimeSeries,
    total_additional_co2: f64,
    horizon_years: usize,
    degree: usize,
) -> Result<Vec<f64>, SeaLevelError> {
    if total_additional_co2 < 1.0 {
        return Err(SeaLevelError::InvalidParameter(format!(
            "total additional CO2 must be at least 1, got {total_additional_co2}"
        )));
    }
    if horizon_years < 1 {
        return Err(SeaLevelError::InvalidParameter(
            "projection horizon must be at least 1 year".to_string(),
        ));
    }
    if sea_level.len() != co2.len() {
        return Err(SeaLevelError::InvalidParameter(format!(
            "series cover different year sets: {} sea-level years vs {} CO2 years",
            sea_level.len(),
            co2.len()
        )));
    }

    let mut x_observed = Vec::with_capacity(co2.len());
    let mut y_observed = Vec::with_capacity(co2.len());
    for (year, emissions) in co2.iter() {
        let level = sea_level.get(year).ok_or_else(|| {
            SeaLevelError::InvalidParameter(format!(
                "year {year} present in the CO2 series but absent from the sea-level series"
            ))
        })?;
        x_observed.push(emissions);
        y_observed.push(level);
    }

    let last_budget = *x_observed.last().ok_or_else(|| {
        SeaLevelError::InsufficientData("no overlapping observations to fit".to_string())
    })?;
    let x_future = linspace(last_budget, last_budget + total_additional_co2, horizon_years);

    let points = regression::fit_and_predict(&x_observed, &y_observed, &x_future, degree)?;
    info!(
        horizon_years,
        total_additional_co2, degree, "projected sea-level trajectory"
    );
    Ok(points)
}

/// Validate a request and run the projection it describes.
pub fn project_from_request(
    sea_level: &TimeSeries,
    co2: &TimeSeries,
    request: &ProjectionRequest,
    degree: usize,
) -> Result<Vec<f64>, SeaLevelError> {
    request.validate()?;
    project_sea_level(
        sea_level,
        co2,
        request.total_additional_co2(),
        request.horizon_years(),
        degree,
    )
}

/// Total projected rise over a trajectory: last point minus first point.
///
/// Zero for trajectories with fewer than two points.
pub fn projected_rise(points: &[f64]) -> f64 {
    match (points.first(), points.last()) {
        (Some(first), Some(last)) => last - first,
        _ => 0.0,
    }
}
