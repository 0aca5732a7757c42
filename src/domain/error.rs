use crate::domain::validation::PasswordRule;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid email format")]
    EmailInvalid,
    #[error("{0}")]
    PasswordWeak(PasswordRule),
    #[error("email already registered")]
    DuplicateEmail,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("Internal error: {0}")]
    Internal(String),
}
