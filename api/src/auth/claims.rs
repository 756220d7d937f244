use serde::{Deserialize, Serialize};

/// Subject id used for the configured administrator, who has no lecturer row.
pub const ADMIN_SUBJECT: i64 = 0;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Lecturer id, or [`ADMIN_SUBJECT`] for the administrator.
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// The lecturer behind this token, if it is a lecturer token.
    pub fn lecturer_id(&self) -> Option<i64> {
        (!self.0.admin).then_some(self.0.sub)
    }
}
