use serde::{Deserialize, Deserializer, Serialize, de};

/// Shortest password accepted when a request body is bound.
pub const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Clone)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub password_hash: String,
}

/// A user that has passed validation but has not been given an id yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateUser {
    #[serde(deserialize_with = "required")]
    pub email: String,
    #[serde(deserialize_with = "min_password_length")]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(deserialize_with = "required")]
    pub email: String,
    #[serde(deserialize_with = "min_password_length")]
    pub password: String,
}

fn required<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    if value.is_empty() {
        return Err(de::Error::custom("field must not be empty"));
    }
    Ok(value)
}

fn min_password_length<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    let length = value.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return Err(de::Error::custom(format!(
            "password must be at least {} characters (got {})",
            MIN_PASSWORD_LENGTH, length
        )));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_user_binds_complete_body() {
        let req: CreateUser =
            serde_json::from_value(json!({ "email": "a@example.com", "password": "Abc123!@" }))
                .unwrap();
        assert_eq!(req.email, "a@example.com");
        assert_eq!(req.password, "Abc123!@");
    }

    #[test]
    fn test_binding_rejects_missing_fields() {
        assert!(serde_json::from_value::<CreateUser>(json!({ "email": "a@example.com" })).is_err());
        assert!(serde_json::from_value::<LoginRequest>(json!({ "password": "Abc123!@" })).is_err());
    }

    #[test]
    fn test_binding_rejects_empty_email() {
        let result =
            serde_json::from_value::<CreateUser>(json!({ "email": "", "password": "Abc123!@" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_binding_rejects_short_password() {
        let result =
            serde_json::from_value::<LoginRequest>(json!({ "email": "a@example.com", "password": "Ab1!" }));
        let err = result.unwrap_err().to_string();
        assert!(err.contains("at least 8 characters"));
    }

    #[test]
    fn test_password_length_counts_characters_not_bytes() {
        // 7 characters, 14 bytes
        let short = "пароль1";
        assert!(
            serde_json::from_value::<CreateUser>(json!({ "email": "a@example.com", "password": short }))
                .is_err()
        );
        let long_enough = "пароль12";
        assert!(
            serde_json::from_value::<CreateUser>(json!({ "email": "a@example.com", "password": long_enough }))
                .is_ok()
        );
    }

    #[test]
    fn test_binding_rejects_wrong_types() {
        let result = serde_json::from_value::<CreateUser>(json!({ "email": 42, "password": "Abc123!@" }));
        assert!(result.is_err());
    }
}
