mod csv_io;

pub use csv_io::{
    read_co2, read_country_codes, read_country_table, read_sea_level, CO2_YEARS, SEA_LEVEL_YEARS,
};
