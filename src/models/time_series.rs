use serde::{Deserialize, Serialize};

use crate::error::SeaLevelError;

/// An ordered mapping from calendar year to a measured value.
///
/// Insertion order is preserved and equals the row order of the source
/// dataset. Keys are unique; pushing a duplicate year is an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Name or identifier for this series
    pub name: String,
    entries: Vec<(i32, f64)>,
}

impl TimeSeries {
    /// Create a new empty series.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    /// Append a (year, value) observation.
    ///
    /// The source datasets guarantee monotonic years, so a duplicate year
    /// indicates a corrupt file rather than a user mistake.
    pub fn push(&mut self, year: i32, value: f64) -> Result<(), SeaLevelError> {
        if self.entries.iter().any(|&(y, _)| y == year) {
            return Err(SeaLevelError::InvalidParameter(format!(
                "duplicate year {year} in series '{}'",
                self.name
            )));
        }
        self.entries.push((year, value));
        Ok(())
    }

    /// Value recorded for a year, if present.
    pub fn get(&self, year: i32) -> Option<f64> {
        self.entries
            .iter()
            .find(|&&(y, _)| y == year)
            .map(|&(_, v)| v)
    }

    /// Number of observations.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Years in insertion order.
    pub fn years(&self) -> Vec<i32> {
        self.entries.iter().map(|&(y, _)| y).collect()
    }

    /// Values in insertion order.
    pub fn values(&self) -> Vec<f64> {
        self.entries.iter().map(|&(_, v)| v).collect()
    }

    /// Last observed value, if any.
    pub fn last_value(&self) -> Option<f64> {
        self.entries.last().map(|&(_, v)| v)
    }

    /// Iterate over (year, value) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, f64)> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_series() -> TimeSeries {
        let mut ts = TimeSeries::new("Test");
        ts.push(2010, 0.0).unwrap();
        ts.push(2011, 10.0).unwrap();
        ts.push(2012, 20.0).unwrap();
        ts
    }

    #[test]
    fn test_new_series_empty() {
        let ts = TimeSeries::new("Empty");
        assert_eq!(ts.name, "Empty");
        assert!(ts.is_empty());
        assert_eq!(ts.len(), 0);
        assert!(ts.last_value().is_none());
    }

    #[test]
    fn test_push_and_get() {
        let ts = sample_series();
        assert_eq!(ts.len(), 3);
        assert_eq!(ts.get(2011), Some(10.0));
        assert_eq!(ts.get(1999), None);
    }

    #[test]
    fn test_push_duplicate_year_fails() {
        let mut ts = sample_series();
        let result = ts.push(2011, 99.0);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("duplicate year"));
        // The failed push must not mutate the series
        assert_eq!(ts.get(2011), Some(10.0));
        assert_eq!(ts.len(), 3);
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut ts = TimeSeries::new("Unsorted");
        ts.push(1995, 1.0).unwrap();
        ts.push(1990, 2.0).unwrap();
        ts.push(2000, 3.0).unwrap();
        assert_eq!(ts.years(), vec![1995, 1990, 2000]);
        assert_eq!(ts.values(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_last_value() {
        let ts = sample_series();
        assert_eq!(ts.last_value(), Some(20.0));
    }

    #[test]
    fn test_iter_pairs() {
        let ts = sample_series();
        let pairs: Vec<(i32, f64)> = ts.iter().collect();
        assert_eq!(pairs, vec![(2010, 0.0), (2011, 10.0), (2012, 20.0)]);
    }

    #[test]
    fn test_series_json_roundtrip() {
        let ts = sample_series();
        let json = serde_json::to_string(&ts).unwrap();
        let deserialized: TimeSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, ts);
    }
}
