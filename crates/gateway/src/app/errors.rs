use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use notapro_session::SessionError;

pub fn session_error_to_response(err: SessionError) -> axum::response::Response {
    match err {
        SessionError::InFlight => json_error(
            StatusCode::CONFLICT,
            "login_in_flight",
            "a sign-in is already in progress",
        ),
        SessionError::Credentials { message } => {
            json_error(StatusCode::UNAUTHORIZED, "invalid_credentials", message)
        }
        SessionError::Backend(e) => json_error(
            StatusCode::BAD_GATEWAY,
            "backend_unavailable",
            e.user_message().to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
