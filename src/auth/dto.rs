use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use super::repo_types::User;
use crate::error::{Field, FieldErrors};

pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Request body for registration and login.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub email: Field<String>,
    #[serde(default)]
    pub password: Field<String>,
}

/// Credentials that passed validation; the email is normalized.
#[derive(Debug)]
pub struct ValidCredentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn for_register(self) -> Result<ValidCredentials, FieldErrors> {
        self.validate(|password, errors| {
            if password.chars().count() < MIN_PASSWORD_LEN {
                errors.add(
                    "password",
                    format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
                );
            }
        })
    }

    pub fn for_login(self) -> Result<ValidCredentials, FieldErrors> {
        self.validate(|password, errors| {
            if password.is_empty() {
                errors.add("password", "Password is required");
            }
        })
    }

    fn validate(
        self,
        check_password: impl FnOnce(&str, &mut FieldErrors),
    ) -> Result<ValidCredentials, FieldErrors> {
        let mut errors = FieldErrors::new();

        let email = match self.email {
            Field::Missing => {
                errors.add("email", "Email is required");
                None
            }
            Field::Invalid => {
                errors.add("email", "Expected string");
                None
            }
            Field::Present(e) => {
                let e = e.trim().to_lowercase();
                if !is_valid_email(&e) {
                    errors.add("email", "Invalid email");
                }
                Some(e)
            }
        };

        let password = match self.password {
            Field::Missing => {
                errors.add("password", "Password is required");
                None
            }
            Field::Invalid => {
                errors.add("password", "Expected string");
                None
            }
            Field::Present(p) => {
                check_password(&p, &mut errors);
                Some(p)
            }
        };

        match (email, password) {
            (Some(email), Some(password)) if errors.is_empty() => {
                Ok(ValidCredentials { email, password })
            }
            _ => Err(errors),
        }
    }
}

/// Response returned after login or register.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: PublicUser,
    pub token: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            created_at: u.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(email: &str, password: &str) -> Credentials {
        Credentials {
            email: Field::Present(email.into()),
            password: Field::Present(password.into()),
        }
    }

    #[test]
    fn email_format() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("invalid-email"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("two words@example.com"));
    }

    #[test]
    fn register_normalizes_email() {
        let valid = creds("  Someone@Example.COM ", "password123")
            .for_register()
            .unwrap();
        assert_eq!(valid.email, "someone@example.com");
    }

    #[test]
    fn register_rejects_short_password_even_with_valid_email() {
        let errors = creds("test@example.com", "123").for_register().unwrap_err();
        assert!(errors.get("email").is_none());
        assert_eq!(
            errors.get("password").unwrap(),
            ["Password must be at least 6 characters"]
        );
    }

    #[test]
    fn register_reports_all_fields() {
        let errors = Credentials::default().for_register().unwrap_err();
        assert!(errors.get("email").is_some());
        assert!(errors.get("password").is_some());

        let errors = creds("invalid-email", "12").for_register().unwrap_err();
        assert_eq!(errors.get("email").unwrap(), ["Invalid email"]);
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn wrong_types_are_reported_per_field() {
        let credentials: Credentials =
            serde_json::from_str(r#"{ "email": 42, "password": ["nope"] }"#).unwrap();
        let errors = credentials.for_login().unwrap_err();
        assert_eq!(errors.get("email").unwrap(), ["Expected string"]);
        assert_eq!(errors.get("password").unwrap(), ["Expected string"]);
    }

    #[test]
    fn login_only_requires_some_password() {
        assert!(creds("a@b.co", "x").for_login().is_ok());
        let errors = creds("a@b.co", "").for_login().unwrap_err();
        assert_eq!(errors.get("password").unwrap(), ["Password is required"]);
    }

    #[test]
    fn public_user_serializes_without_hash() {
        let user = User {
            id: Uuid::new_v4(),
            email: "test@example.com".into(),
            password_hash: "$argon2id$secret".into(),
            created_at: OffsetDateTime::now_utc(),
        };
        let json = serde_json::to_value(PublicUser::from(user)).unwrap();
        assert_eq!(json["email"], "test@example.com");
        assert!(json.get("createdAt").is_some());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
    }
}
