//! Fixed storage keys and the built-in credential.
//!
//! The dashboard keeps all of its state as JSON text under a handful of
//! well-known keys, mirroring how a browser app uses local storage.

/// Key holding the JSON array of user records.
pub const USERS: &str = "users";

/// Key holding the JSON object `{email, role}` of the signed-in user.
pub const CURRENT_USER: &str = "currentUser";

/// Key holding the site settings object.
pub const SETTINGS: &str = "settings";

/// Identifier of the built-in super admin account.
///
/// This pair is accepted unconditionally and is checked before the directory.
pub const BUILTIN_SUPER_ADMIN_EMAIL: &str = "admin@mt.com";

/// Secret of the built-in super admin account (plaintext).
pub const BUILTIN_SUPER_ADMIN_PASSWORD: &str = "1234";

/// Avatar path used when a record does not carry one.
pub const DEFAULT_AVATAR: &str = "/static/avatar.svg";
