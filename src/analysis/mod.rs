mod impact;
mod regression;
mod sea_level;

pub use impact::{project_all, project_country, project_impact, DEFAULT_IMPACT_DEGREE};
pub use regression::{fit, fit_and_predict, PolynomialFit};
pub use sea_level::{
    project_from_request, project_sea_level, projected_rise, ProjectionRequest, BASE_YEAR,
    DEFAULT_SEA_LEVEL_DEGREE,
};
