//! Request/response DTOs for the REST backend (wire names preserved).

use serde::{Deserialize, Serialize};

use notapro_auth::SessionUser;

/// `POST /auth/login` body.
#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub senha: &'a str,
}

/// `POST /auth/login` success payload: `{token, id, email, nome, role}`.
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(flatten)]
    pub user: SessionUser,
}

/// Aggregate fiscal-note statistics (`GET /estatisticas/notas`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteStats {
    pub total_notas: u64,
    pub notas_pendentes: u64,
    pub notas_pagas: u64,
    pub valor_total_notas: f64,
    pub valor_total_pendente: f64,
    pub valor_total_pago: f64,
    pub valor_medio_por_nota: f64,
    pub total_empresas: u64,
}

/// Error payload shape the backend uses for non-2xx answers.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
