//! The signed-in identity.

use serde::{Deserialize, Serialize};

use super::role::Role;
use super::user::UserRecord;
use crate::keys;

/// Record stored under the `currentUser` key.
///
/// Its presence is the whole of "being logged in"; there is no expiry,
/// refresh or server-side revocation beyond removing the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub email: String,
    pub role: Role,
}

impl SessionRecord {
    /// Session for the built-in super admin credential.
    #[must_use]
    pub fn builtin_super_admin() -> Self {
        Self {
            email: keys::BUILTIN_SUPER_ADMIN_EMAIL.to_owned(),
            role: Role::SuperAdmin,
        }
    }
}

impl From<&UserRecord> for SessionRecord {
    fn from(record: &UserRecord) -> Self {
        Self {
            email: record.email.clone(),
            role: record.role,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_json_shape() {
        let json = serde_json::to_string(&SessionRecord::builtin_super_admin()).unwrap();
        assert_eq!(json, r#"{"email":"admin@mt.com","role":"Super Admin"}"#);
    }
}
