mod tables;
mod charts;

pub use tables::{
    format_projection_summary, print_projection_summary,
    format_trajectory_table, print_trajectory_table,
    format_national_table, print_national_table,
};
pub use charts::{format_trajectory_chart, print_trajectory_chart};
