use axum::http::StatusCode;

/// The input table is not usable: a required column is missing or a row
/// cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum DataFormatError {
    #[error("missing required column '{0}'")]
    MissingColumn(String),

    #[error("invalid row at line {line}: {message}")]
    InvalidRow { line: u64, message: String },
}

impl From<csv::Error> for DataFormatError {
    fn from(err: csv::Error) -> Self {
        Self::InvalidRow {
            line: err.position().map_or(0, |pos| pos.line()),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read dataset: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Format(#[from] DataFormatError),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
