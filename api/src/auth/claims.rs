use serde::{Deserialize, Serialize};

/// JWT payload: user id, the caller's role and the expiry timestamp.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    pub sub: i64,
    pub role: String,
    pub exp: usize,
}

/// A caller whose token has been verified.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    pub fn id(&self) -> i64 {
        self.0.sub
    }

    pub fn role(&self) -> &str {
        &self.0.role
    }

    pub fn is_admin(&self) -> bool {
        crate::auth::policy::is_admin(self.role())
    }
}
