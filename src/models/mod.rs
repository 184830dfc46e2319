mod scenario;
mod time_series;

pub use scenario::{CountryTable, ScenarioSeries, SCENARIO_BUCKETS};
pub use time_series::TimeSeries;
