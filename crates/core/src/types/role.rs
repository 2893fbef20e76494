//! Roles and the permissions they grant.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a role string is not recognised.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid role: {0}. Valid roles: User, Admin, Super Admin")]
pub struct RoleParseError(pub String);

/// Directory role.
///
/// Serialized the way the dashboard has always stored it: `"User"`,
/// `"Admin"` and `"Super Admin"`. `"SuperAdmin"` is accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Role {
    /// Regular member. Sees the directory but cannot change it.
    #[default]
    User,
    /// Can edit directory records.
    Admin,
    /// Can edit, delete and re-role directory records.
    #[serde(rename = "Super Admin", alias = "SuperAdmin")]
    SuperAdmin,
}

/// Something a signed-in user may attempt against the directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    /// Add a record.
    CreateUser,
    /// Change a record's name, email or status.
    EditUser,
    /// Change a record's role.
    ChangeRole,
    /// Remove a record.
    DeleteUser,
    /// Change the site-wide settings.
    ManageSettings,
}

impl Role {
    /// All roles, in the order the role selector lists them.
    pub const ALL: [Self; 3] = [Self::User, Self::Admin, Self::SuperAdmin];

    /// Returns the stored label of this role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
            Self::SuperAdmin => "Super Admin",
        }
    }

    /// Whether this role is granted `permission`.
    ///
    /// Admins may create, edit and manage settings; only super admins may
    /// delete or re-role.
    #[must_use]
    pub const fn allows(self, permission: Permission) -> bool {
        match permission {
            Permission::CreateUser | Permission::EditUser | Permission::ManageSettings => {
                matches!(self, Self::Admin | Self::SuperAdmin)
            }
            Permission::ChangeRole | Permission::DeleteUser => matches!(self, Self::SuperAdmin),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "user" => Ok(Self::User),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::SuperAdmin),
            _ => Err(RoleParseError(s.to_owned())),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_super_admin_wire_label() {
        assert_eq!(
            serde_json::to_string(&Role::SuperAdmin).unwrap(),
            "\"Super Admin\""
        );
        let legacy: Role = serde_json::from_str("\"SuperAdmin\"").unwrap();
        assert_eq!(legacy, Role::SuperAdmin);
    }

    #[test]
    fn test_parse_is_lenient_about_separators() {
        assert_eq!("Super Admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!("super_admin".parse::<Role>().unwrap(), Role::SuperAdmin);
        assert_eq!("ADMIN".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!("viewer".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_matches_stored_label() {
        for role in Role::ALL {
            assert_eq!(role.to_string(), role.as_str());
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
        assert_eq!(format!("[{:<12}]", Role::Admin), "[Admin       ]");
    }

    #[test]
    fn test_permissions() {
        assert!(!Role::User.allows(Permission::EditUser));
        assert!(!Role::User.allows(Permission::CreateUser));
        assert!(Role::Admin.allows(Permission::EditUser));
        assert!(Role::Admin.allows(Permission::CreateUser));
        assert!(Role::Admin.allows(Permission::ManageSettings));
        assert!(!Role::User.allows(Permission::ManageSettings));
        assert!(!Role::Admin.allows(Permission::DeleteUser));
        assert!(!Role::Admin.allows(Permission::ChangeRole));
        assert!(Role::SuperAdmin.allows(Permission::DeleteUser));
        assert!(Role::SuperAdmin.allows(Permission::ChangeRole));
    }

    #[test]
    fn test_default_role_is_user() {
        assert_eq!(Role::default(), Role::User);
    }
}
