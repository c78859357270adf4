//! Todo store error type. The variants let each front end decide how to
//! present a failure: the CLI prints and exits, the HTTP server maps to a status code.

use axum::http::StatusCode;

use crate::todo::permitted_statuses;

#[derive(thiserror::Error, Debug)]
pub enum TodoError {
    #[error("Status of {0} is not permitted. Permitted statuses are :- {}", permitted_statuses())]
    InvalidStatus(String),

    #[error("ToDo with id {0} not found")]
    NotFound(i64),

    #[error("Unable to convert ID: {0}")]
    InvalidId(String),

    #[error("No id left after {0}")]
    IdExhausted(i64),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Error decoding todo object: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("Unable to parse {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unable to serialize todos for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, TodoError>;

impl TodoError {
    /// HTTP status code mapping.
    ///
    /// A missing record and an undecodable body are both 500, not 404/422.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidStatus(_) | Self::InvalidId(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Decode(_) | Self::IdExhausted(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Io { .. } | Self::Parse { .. } | Self::Encode { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Machine readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::NotFound(_) => "NOT_FOUND",
            Self::InvalidId(_) => "INVALID_ID",
            Self::IdExhausted(_) => "ID_EXHAUSTED",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Io { .. } => "IO_ERROR",
            Self::Parse { .. } => "PARSE_ERROR",
            Self::Encode { .. } => "ENCODE_ERROR",
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
