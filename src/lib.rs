pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use analysis::{PolynomialFit, ProjectionRequest};
pub use config::AnalyzerConfig;
pub use error::SeaLevelError;
pub use models::{CountryTable, ScenarioSeries, TimeSeries};
