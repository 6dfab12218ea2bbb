//! User model for quillboard.

use std::fmt;
use std::str::FromStr;

/// User role for the admin console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Role {
    /// Read-only account.
    Reader = 0,
    /// Can write and edit own posts.
    #[default]
    Author = 1,
    /// Can edit all content and moderate comments.
    Editor = 2,
    /// Full administrative access.
    Admin = 3,
}

impl Role {
    /// Convert role to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Reader => "reader",
            Role::Author => "author",
            Role::Editor => "editor",
            Role::Admin => "admin",
        }
    }

    /// Check if this role has at least the required permission level.
    pub fn can_access(&self, required: Role) -> bool {
        *self >= required
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "reader" => Ok(Role::Reader),
            "author" => Ok(Role::Author),
            "editor" => Ok(Role::Editor),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("unknown role: {s}")),
        }
    }
}

/// User entity representing a console account.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: i64,
    /// Login username (unique).
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// Display name shown as post author.
    pub display_name: String,
    /// User role for permissions.
    pub role: Role,
    /// Whether the account is active.
    pub is_active: bool,
    /// Account creation timestamp.
    pub created_at: String,
}

impl User {
    /// Check if this user has at least the required role level.
    pub fn has_role(&self, required: Role) -> bool {
        self.role >= required
    }

    /// Check if this user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Data for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    /// Login username.
    pub username: String,
    /// Display name.
    pub display_name: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// User role (defaults to Author).
    pub role: Role,
}

impl NewUser {
    /// Create a new user with minimal required fields.
    pub fn new(username: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            display_name: display_name.into(),
            email: None,
            role: Role::Author,
        }
    }

    /// Set the email address.
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// Data for updating an existing user.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    /// New display name.
    pub display_name: Option<String>,
    /// New email address (Some(None) clears it).
    pub email: Option<Option<String>>,
    /// New role.
    pub role: Option<Role>,
    /// New active status.
    pub is_active: Option<bool>,
}

impl UserUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set new display name.
    pub fn display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set new email.
    pub fn email(mut self, email: Option<String>) -> Self {
        self.email = Some(email);
        self
    }

    /// Set new role.
    pub fn role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Set active status.
    pub fn is_active(mut self, is_active: bool) -> Self {
        self.is_active = Some(is_active);
        self
    }

    /// Check if any fields are set.
    pub fn is_empty(&self) -> bool {
        self.display_name.is_none()
            && self.email.is_none()
            && self.role.is_none()
            && self.is_active.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_ordering() {
        assert!(Role::Admin > Role::Editor);
        assert!(Role::Editor > Role::Author);
        assert!(Role::Author > Role::Reader);
    }

    #[test]
    fn test_role_can_access() {
        assert!(Role::Admin.can_access(Role::Author));
        assert!(Role::Author.can_access(Role::Author));
        assert!(!Role::Reader.can_access(Role::Author));
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Reader, Role::Author, Role::Editor, Role::Admin] {
            assert_eq!(role.as_str().parse::<Role>().unwrap(), role);
        }
    }

    #[test]
    fn test_role_from_str_unknown() {
        assert!("sysop".parse::<Role>().is_err());
        assert!("".parse::<Role>().is_err());
    }

    #[test]
    fn test_new_user_builder() {
        let user = NewUser::new("maya", "Maya")
            .with_email("maya@example.com")
            .with_role(Role::Editor);

        assert_eq!(user.username, "maya");
        assert_eq!(user.email, Some("maya@example.com".to_string()));
        assert_eq!(user.role, Role::Editor);
    }

    #[test]
    fn test_user_update_is_empty() {
        assert!(UserUpdate::new().is_empty());
        assert!(!UserUpdate::new().role(Role::Admin).is_empty());
    }
}
