use thiserror::Error;

/// Errors that can occur while loading datasets or running projections.
#[derive(Error, Debug)]
pub enum SeaLevelError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Data format error at row {row}: {message}")]
    DataFormat { row: usize, message: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Missing key: {0}")]
    MissingKey(String),
}

impl SeaLevelError {
    /// Data format error for a specific row of a source file.
    pub fn data_format(row: usize, message: impl Into<String>) -> Self {
        SeaLevelError::DataFormat {
            row,
            message: message.into(),
        }
    }
}
