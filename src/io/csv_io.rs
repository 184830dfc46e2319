use std::path::Path;

use csv::StringRecord;
use tracing::{debug, info};

use crate::error::SeaLevelError;
use crate::models::{CountryTable, ScenarioSeries, TimeSeries, SCENARIO_BUCKETS};

/// Year range retained from the sea-level dataset.
pub const SEA_LEVEL_YEARS: (i32, i32) = (1751, 2013);

/// Year range retained from the CO2 emissions dataset.
pub const CO2_YEARS: (i32, i32) = (1880, 2013);

fn reader(path: &Path) -> Result<csv::Reader<std::fs::File>, SeaLevelError> {
    Ok(csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?)
}

fn record_row(record: &StringRecord, index: usize) -> usize {
    // Prefer the actual file line; fall back to the data-row index.
    record
        .position()
        .map_or(index + 2, |p| p.line() as usize)
}

fn field<'r>(record: &'r StringRecord, col: usize, row: usize) -> Result<&'r str, SeaLevelError> {
    record
        .get(col)
        .ok_or_else(|| SeaLevelError::data_format(row, format!("missing column {col}")))
}

fn numeric_field(record: &StringRecord, col: usize, row: usize) -> Result<f64, SeaLevelError> {
    let raw = field(record, col, row)?;
    raw.parse::<f64>().map_err(|_| {
        SeaLevelError::data_format(row, format!("non-numeric value '{raw}' in column {col}"))
    })
}

/// Parse the year out of a field that begins with `yyyy` (a plain year or a
/// `yyyy-mm-dd` date).
fn year_prefix(raw: &str, row: usize) -> Result<i32, SeaLevelError> {
    let prefix = raw.get(0..4).unwrap_or(raw);
    prefix.parse::<i32>().map_err(|_| {
        SeaLevelError::data_format(row, format!("cannot parse year from '{raw}'"))
    })
}

/// Read the global-mean-sea-level dataset.
///
/// Columns by position: date (`yyyy-mm-dd`), sea level (mm), uncertainty.
/// Rows outside 1751..=2013 are skipped; dates are truncated to their year.
/// Any malformed row fails the whole load.
pub fn read_sea_level(path: impl AsRef<Path>) -> Result<TimeSeries, SeaLevelError> {
    let path = path.as_ref();
    let mut rdr = reader(path)?;

    let mut series = TimeSeries::new("Sea Level (mm)");
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = record_row(&record, i);
        let year = year_prefix(field(&record, 0, row)?, row)?;
        if (SEA_LEVEL_YEARS.0..=SEA_LEVEL_YEARS.1).contains(&year) {
            let value = numeric_field(&record, 1, row)?;
            series.push(year, value)?;
        }
    }

    info!(
        path = %path.display(),
        years = series.len(),
        "loaded sea-level series"
    );
    Ok(series)
}

/// Read the cumulative CO2 emissions dataset.
///
/// Columns by position: the year lives in column 2 (as a `yyyy` prefix) and
/// the total emissions value in column 3. Rows outside 1880..=2013 are
/// skipped. Any malformed row fails the whole load.
pub fn read_co2(path: impl AsRef<Path>) -> Result<TimeSeries, SeaLevelError> {
    let path = path.as_ref();
    let mut rdr = reader(path)?;

    let mut series = TimeSeries::new("CO2 Emissions (t)");
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = record_row(&record, i);
        let year = year_prefix(field(&record, 2, row)?, row)?;
        if (CO2_YEARS.0..=CO2_YEARS.1).contains(&year) {
            let value = numeric_field(&record, 3, row)?;
            series.push(year, value)?;
        }
    }

    info!(path = %path.display(), years = series.len(), "loaded CO2 series");
    Ok(series)
}

/// Read a per-country scenario table (land loss or population displacement).
///
/// Columns by position: country code, country name, then five impact
/// percentages for 1 m through 5 m of sea-level rise. Row order is preserved
/// in the returned table. Any malformed row fails the whole load.
pub fn read_country_table(path: impl AsRef<Path>) -> Result<CountryTable, SeaLevelError> {
    let path = path.as_ref();
    let mut rdr = reader(path)?;

    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "Unknown".to_string());
    let mut table = CountryTable::new(name);

    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = record_row(&record, i);
        let code = field(&record, 0, row)?;
        if code.is_empty() {
            return Err(SeaLevelError::data_format(row, "empty country code"));
        }

        let mut values = [0.0; SCENARIO_BUCKETS];
        for (bucket, value) in values.iter_mut().enumerate() {
            *value = numeric_field(&record, 2 + bucket, row)?;
        }
        table.insert(code, ScenarioSeries::new(values))?;
        debug!(code, row, "parsed scenario row");
    }

    info!(
        path = %path.display(),
        countries = table.len(),
        "loaded country scenario table"
    );
    Ok(table)
}

/// Read the country-name/code reference list used to label national output.
///
/// Columns by position: country name, country code. Returned in row order,
/// which must match the scenario tables for positional joins.
pub fn read_country_codes(
    path: impl AsRef<Path>,
) -> Result<Vec<(String, String)>, SeaLevelError> {
    let path = path.as_ref();
    let mut rdr = reader(path)?;

    let mut entries = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = record_row(&record, i);
        let name = field(&record, 0, row)?.to_string();
        let code = field(&record, 1, row)?.to_string();
        if code.is_empty() {
            return Err(SeaLevelError::data_format(row, "empty country code"));
        }
        entries.push((name, code));
    }

    info!(path = %path.display(), countries = entries.len(), "loaded country code list");
    Ok(entries)
}
