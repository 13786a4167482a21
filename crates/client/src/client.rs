use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use notapro_auth::SessionToken;

use crate::dto::{ErrorBody, LoginRequest, LoginResponse, NoteStats};
use crate::error::ApiError;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Seam for the authentication calls, so the session layer can be exercised
/// without a live backend.
#[async_trait]
pub trait AuthBackend: Send + Sync {
    async fn login(&self, email: &str, senha: &str) -> Result<LoginResponse, ApiError>;

    /// Best-effort remote logout; callers ignore the outcome beyond logging.
    async fn logout(&self, token: &SessionToken) -> Result<(), ApiError>;
}

/// HTTP client for the NotaPro REST backend.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Fetch the aggregate fiscal-note statistics.
    pub async fn fetch_note_stats(
        &self,
        token: Option<&SessionToken>,
    ) -> Result<NoteStats, ApiError> {
        let mut req = self.http.get(self.url("/estatisticas/notas"));
        if let Some(token) = token {
            req = req.bearer_auth(token.as_str());
        }

        let res = req.send().await?;
        if !res.status().is_success() {
            return Err(Self::read_error(res).await);
        }

        res.json::<NoteStats>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Map a non-success response to an [`ApiError`].
    ///
    /// 401 is distinguished so callers can clear the session; other statuses
    /// carry the backend's `{message}`/`{error}` payload when present.
    async fn read_error(res: reqwest::Response) -> ApiError {
        let status = res.status();
        if status == StatusCode::UNAUTHORIZED {
            return ApiError::Unauthorized;
        }

        let message = res
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| format!("request failed with status {status}"));

        ApiError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl AuthBackend for ApiClient {
    async fn login(&self, email: &str, senha: &str) -> Result<LoginResponse, ApiError> {
        let res = self
            .http
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, senha })
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::read_error(res).await);
        }

        res.json::<LoginResponse>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn logout(&self, token: &SessionToken) -> Result<(), ApiError> {
        let res = self
            .http
            .post(self.url("/auth/logout"))
            .bearer_auth(token.as_str())
            .send()
            .await?;

        if !res.status().is_success() {
            return Err(Self::read_error(res).await);
        }
        Ok(())
    }
}
