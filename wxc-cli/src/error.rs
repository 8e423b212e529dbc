use thiserror::Error;

pub type WxcResult<T> = Result<T, WxcError>;

#[derive(Debug, Error)]
pub enum WxcError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("{kind} '{name}' not found")]
    NotFound { kind: &'static str, name: String },

    #[error("{kind} '{name}' is ambiguous ({count} matches)")]
    Ambiguous {
        kind: &'static str,
        name: String,
        count: usize,
    },

    #[error("CSV file is missing required column '{column}'")]
    MissingColumn { column: &'static str },

    #[error("CSV error at row {row}: {source}")]
    Csv {
        row: usize,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid API URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("No access token; run 'wxc auth login' or set WEBEX_ACCESS_TOKEN")]
    MissingToken,
}

impl WxcError {
    pub fn api(status: reqwest::StatusCode, message: impl Into<String>) -> Self {
        Self::Api {
            status: status.as_u16(),
            message: message.into(),
        }
    }

    pub fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }
}
