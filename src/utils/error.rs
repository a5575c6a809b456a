use thiserror::Error;

#[derive(Error, Debug)]
pub enum JushoError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("File name '{name}' does not match pattern '{pattern}'")]
    PatternError { name: String, pattern: &'static str },

    #[error("Zip entry '{name}' is {size} bytes, over the {limit} byte limit")]
    OversizeEntryError { name: String, size: u64, limit: u64 },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, JushoError>;
