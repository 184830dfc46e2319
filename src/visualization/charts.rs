use colored::Colorize;

use crate::analysis::BASE_YEAR;

/// Format a text-based bar chart of the projected trajectory as a string.
pub fn format_trajectory_chart(points: &[f64]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Sea-Level Trajectory".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if points.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_level = points.iter().fold(0.0f64, |acc, &p| acc.max(p));

    let bar_width = 40;

    output.push_str(&format!("  {:>6}  {:>12}  Level\n", "Year", "mm"));
    output.push_str(&format!("  {}\n", "-".repeat(70)));

    for (i, level) in points.iter().enumerate() {
        let year = BASE_YEAR + 1 + i as i32;
        let bar_len = if max_level > 0.0 {
            ((level.max(0.0) / max_level) * bar_width as f64).round() as usize
        } else {
            0
        };

        let bar = "\u{2588}".repeat(bar_len);

        output.push_str(&format!("  {year:>6}  {level:>12.1}  {}\n", bar.cyan()));
    }

    output.push('\n');
    output
}

/// Print a text-based bar chart of the projected trajectory.
pub fn print_trajectory_chart(points: &[f64]) {
    print!("{}", format_trajectory_chart(points));
}
