//! Authentication models

use serde::{Deserialize, Serialize};

/// Login or registration credentials. Never persisted.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields are required
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Token issued by `POST /login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,

    /// Usually "bearer"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let creds = Credentials::new("a@b.c", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("a@b.c"));
        assert!(!printed.contains("hunter2"));
    }

    #[test]
    fn test_is_complete() {
        assert!(Credentials::new("a@b.c", "pw").is_complete());
        assert!(!Credentials::new("  ", "pw").is_complete());
        assert!(!Credentials::new("a@b.c", "").is_complete());
    }

    #[test]
    fn test_access_token_without_type() {
        let token: AccessToken = serde_json::from_str(r#"{"access_token":"T"}"#).unwrap();
        assert_eq!(token.access_token, "T");
        assert!(token.token_type.is_none());
    }
}
