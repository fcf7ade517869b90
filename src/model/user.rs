use serde::{Deserialize, Serialize};

/// Login credentials held in the session context while an authentication
/// flow is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Signup form data. Unlike [`Credentials`] this also carries the display
/// name and the requested role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupProfile {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

impl SignupProfile {
    /// True when every field the backend requires is present.
    /// Role is optional on the backend side, so it is not checked here.
    pub fn has_required_fields(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty() && !self.password.is_empty()
    }
}

/// The authenticated user record returned by `POST /api/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: u64,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

/// Acknowledgement body returned by `POST /api/signup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupAck {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

/// Identity attached to the orders fetch via the `x-user-email` and
/// `x-user-role` headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RequestorIdentity {
    pub user_email: String,
    pub user_role: String,
}
