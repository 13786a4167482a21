use serde::{Deserialize, Serialize};

use notapro_core::UserId;

use crate::Role;

/// The authenticated identity carried by a session.
///
/// Wire field names mirror the backend's login payload (`id`, `email`,
/// `nome`, `role`); the same encoding is used for the persisted `user`
/// cookie so both stores stay byte-comparable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub email: String,
    #[serde(rename = "nome")]
    pub display_name: String,
    pub role: Role,
}

impl SessionUser {
    pub fn new(
        id: impl Into<UserId>,
        email: impl Into<String>,
        display_name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            display_name: display_name.into(),
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_form_uses_backend_field_names() {
        let user = SessionUser::new("7", "ana@example.com", "Ana Souza", Role::Admin);
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "7",
                "email": "ana@example.com",
                "nome": "Ana Souza",
                "role": "ADMIN",
            })
        );
    }

    #[test]
    fn accepts_numeric_id_from_backend() {
        let user: SessionUser = serde_json::from_str(
            r#"{"id": 12, "email": "b@example.com", "nome": "B", "role": "USER"}"#,
        )
        .unwrap();
        assert_eq!(user.id.as_str(), "12");
    }
}
