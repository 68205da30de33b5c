//! Password hashing and the registration password policy.

use anyhow::anyhow;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;

pub const MIN_PASSWORD_LENGTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyViolation {
    TooShort,
    RequiresDigit,
    RequiresLower,
    RequiresUpper,
    RequiresNonAlphanumeric,
}

impl PolicyViolation {
    pub fn code(self) -> &'static str {
        match self {
            Self::TooShort => "password_too_short",
            Self::RequiresDigit => "password_requires_digit",
            Self::RequiresLower => "password_requires_lower",
            Self::RequiresUpper => "password_requires_upper",
            Self::RequiresNonAlphanumeric => "password_requires_non_alphanumeric",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Self::TooShort => "Passwords must be at least 6 characters.",
            Self::RequiresDigit => "Passwords must have at least one digit ('0'-'9').",
            Self::RequiresLower => "Passwords must have at least one lowercase ('a'-'z').",
            Self::RequiresUpper => "Passwords must have at least one uppercase ('A'-'Z').",
            Self::RequiresNonAlphanumeric => {
                "Passwords must have at least one non alphanumeric character."
            }
        }
    }
}

/// Every rule the password breaks, in a stable order.
pub fn policy_violations(password: &str) -> Vec<PolicyViolation> {
    let mut violations = Vec::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        violations.push(PolicyViolation::TooShort);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PolicyViolation::RequiresDigit);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PolicyViolation::RequiresLower);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PolicyViolation::RequiresUpper);
    }
    if password.chars().all(|c| c.is_ascii_alphanumeric()) {
        violations.push(PolicyViolation::RequiresNonAlphanumeric);
    }

    violations
}

/// Argon2id hash in PHC string format.
pub fn hash_password(password: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| anyhow!("Failed to hash password: {}", e))
}

pub fn verify_password(password: &str, stored_hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| anyhow!("Stored password hash is malformed: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}
