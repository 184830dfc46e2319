use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{projected_rise, ProjectionRequest, BASE_YEAR};

/// Format a projection summary table as a string.
pub fn format_projection_summary(request: &ProjectionRequest, points: &[f64]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Sea-Level Projection".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Metric", "Value", "Unit"]);

    table.add_row(vec![
        Cell::new("Target Year"),
        Cell::new(format!("{}", request.target_year)),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Annual Emission Rate"),
        Cell::new(format!("{:.1}", request.annual_emission_rate)),
        Cell::new("t/year"),
    ]);
    table.add_row(vec![
        Cell::new("Projection Horizon"),
        Cell::new(format!("{}", request.horizon_years())),
        Cell::new("years"),
    ]);
    table.add_row(vec![
        Cell::new("Additional CO2 Budget"),
        Cell::new(format!("{:.1}", request.total_additional_co2())),
        Cell::new("t"),
    ]);
    if let Some(last) = points.last() {
        table.add_row(vec![
            Cell::new(format!("Sea Level in {}", request.target_year)),
            Cell::new(format!("{last:.1}")),
            Cell::new("mm"),
        ]);
    }
    table.add_row(vec![
        Cell::new("Projected Rise"),
        Cell::new(format!("{:.1}", projected_rise(points))),
        Cell::new("mm"),
    ]);

    output.push_str(&format!("{table}"));
    output
}

/// Print a formatted projection summary table.
pub fn print_projection_summary(request: &ProjectionRequest, points: &[f64]) {
    print!("{}", format_projection_summary(request, points));
}

/// Format the year-by-year projected trajectory as a table string.
pub fn format_trajectory_table(points: &[f64]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Projected Trajectory".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Year", "Sea Level (mm)", "Rise (mm)"]);

    for (i, level) in points.iter().enumerate() {
        let year = BASE_YEAR + 1 + i as i32;
        let rise = level - points[0];
        table.add_row(vec![
            Cell::new(format!("{year}")),
            Cell::new(format!("{level:.1}")),
            Cell::new(format!("{rise:.1}")),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print the year-by-year projected trajectory.
pub fn print_trajectory_table(points: &[f64]) {
    print!("{}", format_trajectory_table(points));
}

/// Format a per-country impact table as a string.
///
/// `countries` pairs full names with codes, positionally aligned with
/// `impacts`; rows beyond the shorter of the two are dropped.
pub fn format_national_table(
    title: &str,
    countries: &[(String, String)],
    impacts: &[f64],
) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", title.bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Country", "Code", "Impact"]);

    for ((name, code), impact) in countries.iter().zip(impacts) {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(code),
            Cell::new(format!("{impact:.2}%")),
        ]);
    }

    output.push_str(&format!("{table}"));
    output
}

/// Print a per-country impact table.
pub fn print_national_table(title: &str, countries: &[(String, String)], impacts: &[f64]) {
    print!("{}", format_national_table(title, countries, impacts));
}
