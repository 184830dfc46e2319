use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::analysis::{DEFAULT_IMPACT_DEGREE, DEFAULT_SEA_LEVEL_DEGREE};
use crate::error::SeaLevelError;

/// Analyzer configuration, loadable from a TOML file.
///
/// Holds the default dataset locations and regression degrees; CLI flags
/// override individual values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    pub datasets: DatasetPaths,
    pub regression: RegressionConfig,
}

/// Where the four source datasets and the country-code reference list live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetPaths {
    pub sea_level: PathBuf,
    pub co2: PathBuf,
    pub land_loss: PathBuf,
    pub pop_displacement: PathBuf,
    pub country_codes: PathBuf,
}

/// Fit degrees for the two regressions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegressionConfig {
    /// Degree of the sea-level-vs-CO2 fit (linear by default)
    pub sea_level_degree: usize,
    /// Degree of the impact-vs-rise fit (quadratic by default)
    pub impact_degree: usize,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            datasets: DatasetPaths::default(),
            regression: RegressionConfig::default(),
        }
    }
}

impl Default for DatasetPaths {
    fn default() -> Self {
        Self {
            sea_level: PathBuf::from("data/sea_level.csv"),
            co2: PathBuf::from("data/annual_co2_emissions.csv"),
            land_loss: PathBuf::from("data/land_loss.csv"),
            pop_displacement: PathBuf::from("data/pop_displacement.csv"),
            country_codes: PathBuf::from("data/country_to_code.csv"),
        }
    }
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            sea_level_degree: DEFAULT_SEA_LEVEL_DEGREE,
            impact_degree: DEFAULT_IMPACT_DEGREE,
        }
    }
}

impl AnalyzerConfig {
    /// Load configuration from a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SeaLevelError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let config: AnalyzerConfig = toml::from_str(&contents).map_err(|e| {
            SeaLevelError::InvalidParameter(format!(
                "cannot parse config {}: {e}",
                path.display()
            ))
        })?;
        info!(path = %path.display(), "loaded analyzer config");
        Ok(config)
    }
}
