//! Input rules applied to registration requests.
//!
//! Both checks are pure and run after the request body has been bound, so
//! the minimum password length has already been enforced by then.

use crate::domain::error::DomainError;
use std::fmt;

/// Characters accepted as the "special character" of a password.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+=-<>?|~{}";

/// A single password composition rule, in the order it is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MissingLowercase,
    MissingUppercase,
    MissingDigit,
    MissingSpecial,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PasswordRule::MissingLowercase => "password must contain at least one lowercase letter",
            PasswordRule::MissingUppercase => "password must contain at least one uppercase letter",
            PasswordRule::MissingDigit => "password must contain at least one digit",
            PasswordRule::MissingSpecial => "password must contain at least one special character",
        };
        f.write_str(msg)
    }
}

/// Checks `email` against the `local@domain.tld` shape.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(DomainError::EmailInvalid)
    }
}

fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty()
        || !local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c))
    {
        return false;
    }

    // The TLD is whatever follows the last dot; something must precede it.
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    !host.is_empty()
        && host
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// Returns the first composition rule `password` fails, if any.
pub fn validate_password(password: &str) -> Result<(), DomainError> {
    let rules: [(PasswordRule, fn(char) -> bool); 4] = [
        (PasswordRule::MissingLowercase, |c| c.is_ascii_lowercase()),
        (PasswordRule::MissingUppercase, |c| c.is_ascii_uppercase()),
        (PasswordRule::MissingDigit, |c| c.is_ascii_digit()),
        (PasswordRule::MissingSpecial, |c| SPECIAL_CHARACTERS.contains(c)),
    ];

    for (rule, matches) in rules {
        if !password.chars().any(matches) {
            return Err(DomainError::PasswordWeak(rule));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email_accepts_common_addresses() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("first.last@sub.example.co").is_ok());
        assert!(validate_email("user+tag@example.io").is_ok());
        assert!(validate_email("a_b%c-d@my-host.org").is_ok());
        assert!(validate_email("User@Example.COM").is_ok());
    }

    #[test]
    fn test_validate_email_rejects_malformed_addresses() {
        assert_eq!(validate_email(""), Err(DomainError::EmailInvalid));
        assert!(validate_email("userexample.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("user@").is_err());
        assert!(validate_email("user@example").is_err());
        assert!(validate_email("user@.com").is_err());
        assert!(validate_email("user@@example.com").is_err());
        assert!(validate_email("user@example.c").is_err());
        assert!(validate_email("user@example.c0m").is_err());
        assert!(validate_email("us er@example.com").is_err());
        assert!(validate_email("user@exa_mple.com").is_err());
    }

    #[test]
    fn test_validate_password_reports_first_failing_rule() {
        // no uppercase and no special character: uppercase is checked first
        assert_eq!(
            validate_password("abc12345"),
            Err(DomainError::PasswordWeak(PasswordRule::MissingUppercase))
        );
        assert_eq!(
            validate_password("ABC12345!"),
            Err(DomainError::PasswordWeak(PasswordRule::MissingLowercase))
        );
        assert_eq!(
            validate_password("Abcdefgh!"),
            Err(DomainError::PasswordWeak(PasswordRule::MissingDigit))
        );
        assert_eq!(
            validate_password("Abcdefg1"),
            Err(DomainError::PasswordWeak(PasswordRule::MissingSpecial))
        );
    }

    #[test]
    fn test_validate_password_accepts_strong_password() {
        assert!(validate_password("Abc123!@").is_ok());
        assert!(validate_password("xY9{zzzz").is_ok());
    }

    #[test]
    fn test_every_special_character_is_accepted() {
        for special in SPECIAL_CHARACTERS.chars() {
            let password = format!("Abc1234{}", special);
            assert!(validate_password(&password).is_ok(), "rejected {}", special);
        }
    }

    #[test]
    fn test_password_rule_messages() {
        assert_eq!(
            PasswordRule::MissingDigit.to_string(),
            "password must contain at least one digit"
        );
        assert_eq!(
            DomainError::PasswordWeak(PasswordRule::MissingSpecial).to_string(),
            "password must contain at least one special character"
        );
    }
}
