//! User records and registration input
//!
//! Column widths match the `users` table: username, first and last name
//! are VARCHAR(50), address is VARCHAR(255).

use serde::{Deserialize, Serialize};

use super::validation::{bounded_text, ValidationError};

/// Maximum length for usernames and person names
pub const MAX_NAME_LEN: usize = 50;

/// Maximum length for the free-text address
pub const MAX_ADDRESS_LEN: usize = 255;

/// Validated login key, unique across all users
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Create a username, trimming surrounding whitespace.
    ///
    /// # Example
    /// ```
    /// use loanapp_core::models::Username;
    ///
    /// assert_eq!(Username::new(" alice ").unwrap().as_str(), "alice");
    /// assert!(Username::new("").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        bounded_text("username", s, MAX_NAME_LEN).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Username {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl std::fmt::Display for Username {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Stored user row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
    pub address: String,
    pub monthly_income: f64,
}

impl User {
    /// Display name used in reports: "first last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}

/// Validated registration input, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: Username,
    pub firstname: String,
    pub lastname: String,
    pub age: i32,
    pub address: String,
    pub monthly_income: f64,
}

impl NewUser {
    /// Validate raw registration fields.
    ///
    /// Text fields are trimmed and checked against their column widths.
    /// Age and income are taken as-is; no range checks apply.
    pub fn new(
        username: &str,
        firstname: &str,
        lastname: &str,
        age: i32,
        address: &str,
        monthly_income: f64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            username: Username::new(username)?,
            firstname: bounded_text("firstname", firstname, MAX_NAME_LEN)?,
            lastname: bounded_text("lastname", lastname, MAX_NAME_LEN)?,
            age,
            address: bounded_text("address", address, MAX_ADDRESS_LEN)?,
            monthly_income,
        })
    }

    /// Attach a store-assigned identity.
    pub fn into_user(self, id: i32) -> User {
        User {
            id,
            username: self.username.into_string(),
            firstname: self.firstname,
            lastname: self.lastname,
            age: self.age,
            address: self.address,
            monthly_income: self.monthly_income,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> NewUser {
        NewUser::new("alice", "Alice", "Liddell", 30, "1 Rabbit Hole", 4200.0).unwrap()
    }

    #[test]
    fn new_user_trims_text_fields() {
        let user = NewUser::new(" bob ", " Bob ", " Builder ", 41, " 2 Yard St ", 3100.5).unwrap();
        assert_eq!(user.username.as_str(), "bob");
        assert_eq!(user.firstname, "Bob");
        assert_eq!(user.lastname, "Builder");
        assert_eq!(user.address, "2 Yard St");
    }

    #[test]
    fn new_user_allows_any_numbers() {
        // no range checks on age or income
        let user = NewUser::new("kid", "K", "D", -1, "here", -50.0).unwrap();
        assert_eq!(user.age, -1);
        assert_eq!(user.monthly_income, -50.0);
    }

    #[test]
    fn rejects_long_username() {
        let err = NewUser::new(&"u".repeat(51), "A", "B", 1, "addr", 1.0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::TooLong {
                field: "username",
                max: MAX_NAME_LEN
            }
        );
    }

    #[test]
    fn rejects_empty_lastname() {
        let err = NewUser::new("a", "A", "", 1, "addr", 1.0).unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "lastname" });
    }

    #[test]
    fn address_allows_255_chars() {
        assert!(NewUser::new("a", "A", "B", 1, &"x".repeat(255), 1.0).is_ok());
        assert!(NewUser::new("a", "A", "B", 1, &"x".repeat(256), 1.0).is_err());
    }

    #[test]
    fn into_user_keeps_fields() {
        let user = alice().into_user(7);
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
        assert_eq!(user.full_name(), "Alice Liddell");
    }

    #[test]
    fn username_deserialize_validates() {
        let ok: Username = serde_json::from_str("\"carol\"").unwrap();
        assert_eq!(ok.as_str(), "carol");
        assert!(serde_json::from_str::<Username>("\"  \"").is_err());
    }
}
