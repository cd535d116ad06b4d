//! Login credentials.

use std::fmt;

use serde::Serialize;

/// Email and password for the first step of the OTP sign-in flow.
///
/// Serializes as the login request body. `Debug` redacts the password.
///
/// ```
/// use folio_core::Credentials;
///
/// let creds = Credentials::new("alice@example.com", "hunter2");
/// let body = serde_json::to_value(&creds).unwrap();
/// assert_eq!(body["email"], "alice@example.com");
/// ```
#[derive(Clone, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    /// The password, for request bodies only.
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let debug = format!("{:?}", Credentials::new("alice@example.com", "secret123"));
        assert!(debug.contains("alice@example.com"));
        assert!(!debug.contains("secret123"));
    }

    #[test]
    fn serializes_as_login_body() {
        let creds = Credentials::new("  alice@example.com ", " pass ");
        assert_eq!(
            serde_json::to_value(&creds).unwrap(),
            serde_json::json!({"email": "alice@example.com", "password": " pass "})
        );
    }
}
