//! User domain model.

use serde::{Deserialize, Serialize};

use crate::models::pet::ReadPet;
use crate::validation::{FieldCheck, Rule, Validate};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Argon2id PHC string. Never serialized.
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    /// Raw password (hashed with Argon2id before storage).
    pub password: String,
}

impl Validate for CreateUser {
    fn checks(&self) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::text("name", &self.name, &[Rule::NotEmpty]),
            FieldCheck::text("email", &self.email, &[Rule::NotEmpty, Rule::Email]),
            FieldCheck::text("password", &self.password, &[Rule::NotEmpty]),
        ]
    }
}

/// Profile update. `id` is accepted for wire compatibility and ignored;
/// any `password` makes the whole update fail.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl Validate for UpdateUser {
    fn checks(&self) -> Vec<FieldCheck<'_>> {
        vec![
            FieldCheck::optional_text("name", self.name.as_deref(), &[Rule::NotEmpty]),
            FieldCheck::optional_text(
                "email",
                self.email.as_deref(),
                &[Rule::NotEmpty, Rule::Email],
            ),
        ]
    }
}

/// Public projection of a user with their pets.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub pets: Vec<ReadPet>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;

    #[test]
    fn password_hash_is_not_serialized() {
        let user = User {
            id: 1,
            name: "A".into(),
            email: "a@x.com".into(),
            password_hash: "$argon2id$...".into(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["email"], "a@x.com");
    }

    #[test]
    fn create_user_requires_email_shape() {
        let input = CreateUser {
            name: "A".into(),
            email: "nope".into(),
            password: "secret".into(),
        };
        let errors = validate(&input).unwrap_err();
        assert_eq!(errors.fields().collect::<Vec<_>>(), vec!["email"]);
    }

    #[test]
    fn empty_update_is_valid() {
        assert!(validate(&UpdateUser::default()).is_ok());
    }
}
