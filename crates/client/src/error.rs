use thiserror::Error;

/// Failure talking to the REST backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the bearer token (HTTP 401).
    ///
    /// Callers must treat this as session expiry: clear all persisted
    /// session state and force a sign-in.
    #[error("session expired or token rejected")]
    Unauthorized,

    /// The backend answered with a non-success status and (possibly) a
    /// `{message}`/`{error}` payload.
    #[error("backend rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// Transport-level failure (DNS, connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A 2xx response whose body did not match the expected shape.
    #[error("malformed response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message suitable for direct display in the sign-in form.
    pub fn user_message(&self) -> &str {
        match self {
            ApiError::Rejected { message, .. } => message,
            ApiError::Unauthorized => "sessão expirada, entre novamente",
            _ => "não foi possível contactar o servidor",
        }
    }
}
