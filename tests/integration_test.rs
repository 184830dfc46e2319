use std::io::Write;
use std::path::PathBuf;

use assert_approx_eq::assert_approx_eq;
use tempfile::TempDir;

use sea_level_analyzer::{
    analysis::{
        fit, project_all, project_country, project_from_request, project_sea_level,
        projected_rise, ProjectionRequest,
    },
    config::AnalyzerConfig,
    error::SeaLevelError,
    io,
    models::{CountryTable, ScenarioSeries, TimeSeries},
};

const SEA_LEVEL_CSV: &str = "\
Time,GMSL,GMSL uncertainty
2010-01-01,0.0,1.0
2011-01-01,10.0,1.0
2012-01-01,20.0,1.0
2013-01-01,30.0,1.0
";

const CO2_CSV: &str = "\
Entity,Code,Year,Annual CO2 emissions
World,OWID_WRL,2010,100.0
World,OWID_WRL,2011,200.0
World,OWID_WRL,2012,300.0
World,OWID_WRL,2013,400.0
";

const LAND_LOSS_CSV: &str = "\
code,name,1m,2m,3m,4m,5m
USA,United States,0.1,0.3,0.6,1.0,1.5
BGD,Bangladesh,2.0,5.0,9.0,14.0,20.0
NLD,Netherlands,1.0,3.0,6.0,10.0,15.0
";

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn load_fixture_series(dir: &TempDir) -> (TimeSeries, TimeSeries) {
    let sea_path = write_fixture(dir, "sea_level.csv", SEA_LEVEL_CSV);
    let co2_path = write_fixture(dir, "co2.csv", CO2_CSV);
    (
        io::read_sea_level(&sea_path).unwrap(),
        io::read_co2(&co2_path).unwrap(),
    )
}

// ============================================================================
// End-to-end projection pipeline
// ============================================================================

#[test]
fn test_full_pipeline_from_csv_to_projection() {
    let dir = TempDir::new().unwrap();
    let (sea_level, co2) = load_fixture_series(&dir);

    assert_eq!(sea_level.len(), 4);
    assert_eq!(co2.len(), 4);

    // 10 mm of rise per 100 t of CO2: slope 0.1
    let request = ProjectionRequest {
        target_year: 2017,
        annual_emission_rate: 100.0,
    };
    let points = project_from_request(&sea_level, &co2, &request, 1).unwrap();

    assert_eq!(points.len(), 4);
    assert_approx_eq!(points[0], 30.0, 1e-6);
    assert_approx_eq!(points[3], 70.0, 1e-6);
    assert_approx_eq!(projected_rise(&points), 40.0, 1e-6);
}

#[test]
fn test_full_pipeline_through_national_impacts() {
    let dir = TempDir::new().unwrap();
    let (sea_level, co2) = load_fixture_series(&dir);
    let table_path = write_fixture(&dir, "land_loss.csv", LAND_LOSS_CSV);
    let table = io::read_country_table(&table_path).unwrap();

    let request = ProjectionRequest {
        target_year: 2017,
        annual_emission_rate: 100.0,
    };
    let points = project_from_request(&sea_level, &co2, &request, 1).unwrap();
    let rise = projected_rise(&points);

    let impacts = project_all(&table, rise, 2).unwrap();
    assert_eq!(impacts.len(), table.len());
    for impact in &impacts {
        assert!(*impact >= 0.0);
    }

    // Output order equals source-file row order
    assert_eq!(table.codes(), vec!["USA", "BGD", "NLD"]);
    let bgd = project_country(&table, "BGD", rise, 2).unwrap();
    assert_approx_eq!(impacts[1], bgd, 1e-12);
}

#[test]
fn test_pipeline_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let (sea_level, co2) = load_fixture_series(&dir);

    let first = project_sea_level(&sea_level, &co2, 400.0, 4, 1).unwrap();
    let second = project_sea_level(&sea_level, &co2, 400.0, 4, 1).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_longer_horizon_projects_further_rise() {
    let dir = TempDir::new().unwrap();
    let (sea_level, co2) = load_fixture_series(&dir);

    let near = ProjectionRequest {
        target_year: 2020,
        annual_emission_rate: 100.0,
    };
    let far = ProjectionRequest {
        target_year: 2050,
        annual_emission_rate: 100.0,
    };
    let near_points = project_from_request(&sea_level, &co2, &near, 1).unwrap();
    let far_points = project_from_request(&sea_level, &co2, &far, 1).unwrap();

    assert!(projected_rise(&far_points) > projected_rise(&near_points));
}

// ============================================================================
// Error propagation across module boundaries
// ============================================================================

#[test]
fn test_invalid_request_rejected_before_loading_math() {
    let dir = TempDir::new().unwrap();
    let (sea_level, co2) = load_fixture_series(&dir);

    let request = ProjectionRequest {
        target_year: 2000,
        annual_emission_rate: 100.0,
    };
    let err = project_from_request(&sea_level, &co2, &request, 1).unwrap_err();
    assert!(matches!(err, SeaLevelError::InvalidParameter(_)));
    assert!(err.to_string().contains("after 2013"));
}

#[test]
fn test_underdetermined_fit_surfaces_as_insufficient_data() {
    let err = fit(&[1000.0, 2000.0], &[1.0, 2.0], 2).unwrap_err();
    assert!(matches!(err, SeaLevelError::InsufficientData(_)));
}

#[test]
fn test_corrupt_csv_surfaces_row_number() {
    let dir = TempDir::new().unwrap();
    let path = write_fixture(
        &dir,
        "bad.csv",
        "Time,GMSL,U\n2010-01-01,0.0,1.0\n2011-01-01,oops,1.0\n",
    );
    let err = io::read_sea_level(&path).unwrap_err();
    assert!(matches!(err, SeaLevelError::DataFormat { .. }));
    assert!(err.to_string().contains("row 3"));
}

#[test]
fn test_unknown_country_is_missing_key() {
    let dir = TempDir::new().unwrap();
    let table_path = write_fixture(&dir, "land_loss.csv", LAND_LOSS_CSV);
    let table = io::read_country_table(&table_path).unwrap();

    let err = project_country(&table, "ATL", 40.0, 2).unwrap_err();
    assert!(matches!(err, SeaLevelError::MissingKey(_)));
}

// ============================================================================
// Config-driven runs
// ============================================================================

#[test]
fn test_config_paths_drive_the_pipeline() {
    let dir = TempDir::new().unwrap();
    let sea_path = write_fixture(&dir, "sea_level.csv", SEA_LEVEL_CSV);
    let co2_path = write_fixture(&dir, "co2.csv", CO2_CSV);
    let config_path = write_fixture(
        &dir,
        "analyzer.toml",
        &format!(
            "[datasets]\nsea_level = \"{}\"\nco2 = \"{}\"\n",
            sea_path.display(),
            co2_path.display()
        ),
    );

    let config = AnalyzerConfig::from_path(&config_path).unwrap();
    let sea_level = io::read_sea_level(&config.datasets.sea_level).unwrap();
    let co2 = io::read_co2(&config.datasets.co2).unwrap();

    let points = project_sea_level(
        &sea_level,
        &co2,
        400.0,
        4,
        config.regression.sea_level_degree,
    )
    .unwrap();
    assert_approx_eq!(points[3], 70.0, 1e-6);
}

// ============================================================================
// Model invariants on hand-built data
// ============================================================================

#[test]
fn test_impact_clamp_holds_for_tiny_rise() {
    let mut table = CountryTable::new("Synthetic");
    table
        .insert("AAA", ScenarioSeries::new([0.5, 3.0, 8.0, 16.0, 27.0]))
        .unwrap();
    // A 5 mm rise sits far below the first bucket; the quadratic dips
    // negative there and must be clamped
    let impacts = project_all(&table, 5.0, 2).unwrap();
    assert_eq!(impacts, vec![0.0]);
}

#[test]
fn test_projection_with_quadratic_degree() {
    let dir = TempDir::new().unwrap();
    let (sea_level, co2) = load_fixture_series(&dir);

    // The fixture is exactly linear, so a quadratic fit reproduces it
    let linear = project_sea_level(&sea_level, &co2, 400.0, 4, 1).unwrap();
    let quadratic = project_sea_level(&sea_level, &co2, 400.0, 4, 2).unwrap();
    for (a, b) in linear.iter().zip(&quadratic) {
        assert_approx_eq!(a, b, 1e-5);
    }
}
