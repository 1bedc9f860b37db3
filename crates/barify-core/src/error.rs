pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(
        "Invalid page format `{spec}`: expected one of [{known}] or a custom WxH size in millimeters"
    )]
    InvalidPageFormat { spec: String, known: String },

    #[error("Malformed row (line {line}): {message}")]
    MalformedRow { line: u64, message: String },

    #[error("Chapter indices {min}..={max} span more than {limit} chapters")]
    IndexSpanTooLarge { min: i64, max: i64, limit: usize },

    #[error("No chapters found in input")]
    EmptyInput,

    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },
}
