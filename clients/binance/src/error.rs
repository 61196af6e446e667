use serde::Deserialize;

/// Error body returned by Binance on rejected requests.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
}

/// Errors surfaced by [`crate::BinancePerpsClient`].
#[derive(Debug, thiserror::Error)]
pub enum BinanceError {
    /// Connection, TLS or timeout failure before a response arrived.
    /// The cause is reachable through `source()`.
    #[error("network error")]
    Http(#[from] reqwest::Error),

    /// Exchange rejected the request with a structured error.
    #[error("API Error {status}: {msg} (code {code})")]
    Api { status: u16, code: i64, msg: String },

    /// Non-2xx response whose body was not a Binance error object.
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to decode response")]
    Decode(#[from] serde_json::Error),
}

impl BinanceError {
    /// Builds the error for a non-2xx response body.
    pub(crate) fn from_response(status: u16, body: String) -> Self {
        match serde_json::from_str::<ApiErrorBody>(&body) {
            Ok(err) => BinanceError::Api {
                status,
                code: err.code,
                msg: err.msg,
            },
            Err(_) => BinanceError::Status { status, body },
        }
    }

    /// Binance error code, when the exchange sent one.
    pub fn code(&self) -> Option<i64> {
        match self {
            BinanceError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
