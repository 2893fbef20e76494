//! Directory records.

use serde::{Deserialize, Serialize};

use super::email::Email;
use super::id::UserId;
use super::role::Role;
use super::status::Status;
use crate::keys;

fn default_avatar() -> String {
    keys::DEFAULT_AVATAR.to_owned()
}

/// A single entry of the directory stored under the `users` key.
///
/// Nothing checks that ids or emails are unique, or that `email` is well
/// formed: records are taken as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub email: String,
    /// Plaintext password. Records without one cannot sign in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub status: Status,
    #[serde(default = "default_avatar")]
    pub avatar: String,
}

impl UserRecord {
    /// Whether `email` and `password` match this record exactly.
    #[must_use]
    pub fn matches_credentials(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password.as_deref() == Some(password)
    }

    /// Whether this record is the protected super admin.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == Role::SuperAdmin
    }
}

/// Input for adding a record to the directory.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: Email,
    pub password: Option<String>,
    pub role: Role,
    pub status: Status,
    pub avatar: Option<String>,
}

impl NewUser {
    /// Build the stored record under `id`.
    #[must_use]
    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord {
            id,
            name: self.name,
            email: self.email.into_inner(),
            password: self.password,
            role: self.role,
            status: self.status,
            avatar: self.avatar.unwrap_or_else(default_avatar),
        }
    }
}

/// Partial update of a record's editable fields. Role changes go through
/// their own operation.
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<Email>,
    pub password: Option<String>,
    pub status: Option<Status>,
    pub avatar: Option<String>,
}

impl UserPatch {
    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.password.is_none()
            && self.status.is_none()
            && self.avatar.is_none()
    }

    /// Apply the patch to `record` in place.
    pub fn apply(&self, record: &mut UserRecord) {
        if let Some(name) = &self.name {
            record.name.clone_from(name);
        }
        if let Some(email) = &self.email {
            record.email = email.as_str().to_owned();
        }
        if let Some(password) = &self.password {
            record.password = Some(password.clone());
        }
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(avatar) = &self.avatar {
            record.avatar.clone_from(avatar);
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn record() -> UserRecord {
        UserRecord {
            id: UserId::new(3),
            name: "Dara".to_owned(),
            email: "dara@example.com".to_owned(),
            password: Some("pw".to_owned()),
            role: Role::Admin,
            status: Status::Active,
            avatar: "/static/dara.png".to_owned(),
        }
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let parsed: UserRecord =
            serde_json::from_str(r#"{"id":1,"name":"Sok","email":"sok@example.com"}"#).unwrap();
        assert_eq!(parsed.role, Role::User);
        assert_eq!(parsed.status, Status::Active);
        assert_eq!(parsed.avatar, keys::DEFAULT_AVATAR);
        assert!(parsed.password.is_none());
    }

    #[test]
    fn test_password_omitted_when_absent() {
        let mut r = record();
        r.password = None;
        let json = serde_json::to_value(&r).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["role"], "Admin");
    }

    #[test]
    fn test_matches_credentials_requires_password() {
        let mut r = record();
        assert!(r.matches_credentials("dara@example.com", "pw"));
        assert!(!r.matches_credentials("dara@example.com", "PW"));
        assert!(!r.matches_credentials("other@example.com", "pw"));
        r.password = None;
        assert!(!r.matches_credentials("dara@example.com", ""));
    }

    #[test]
    fn test_patch_only_touches_given_fields() {
        let mut r = record();
        let patch = UserPatch {
            name: Some("Dara K.".to_owned()),
            status: Some(Status::Inactive),
            ..UserPatch::default()
        };
        patch.apply(&mut r);
        assert_eq!(r.name, "Dara K.");
        assert_eq!(r.status, Status::Inactive);
        assert_eq!(r.email, "dara@example.com");
        assert_eq!(r.role, Role::Admin);
        assert!(UserPatch::default().is_empty());
        assert!(!patch.is_empty());
    }

    #[test]
    fn test_new_user_into_record() {
        let new = NewUser {
            name: "Vanna".to_owned(),
            email: Email::parse("vanna@example.com").unwrap(),
            password: None,
            role: Role::User,
            status: Status::Inactive,
            avatar: None,
        };
        let r = new.into_record(UserId::new(10));
        assert_eq!(r.id, UserId::new(10));
        assert_eq!(r.email, "vanna@example.com");
        assert_eq!(r.avatar, keys::DEFAULT_AVATAR);
    }
}
