pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("data table JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parse error (line {line}): {message}")]
    Csv { line: usize, message: String },
}
