use crate::application::auth_service::AuthService;
use crate::data::user_repository::InMemoryUserRepository;
use crate::domain::error::DomainError;
use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError, web};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, instrument, warn};

pub const MALFORMED_INPUT_MESSAGE: &str =
    "failed to bind request data: make sure the JSON is well-formed and all fields are filled";

pub struct AppState {
    pub auth_service: Arc<AuthService<InMemoryUserRepository>>,
}

impl AppState {
    pub fn new(repository: InMemoryUserRepository) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(Arc::new(repository))),
        }
    }
}

/// Body shared by every auth endpoint, success or failure.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

impl ApiResponse {
    pub fn ok(message: impl Into<String>, user_id: u64) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
            user_id: Some(user_id),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
            user_id: None,
        }
    }
}

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("failed to bind request data: make sure the JSON is well-formed and all fields are filled")]
    MalformedInput(String),
    #[error("invalid email: {0}")]
    InvalidEmail(String),
    #[error("password does not meet security requirements: {0}")]
    WeakPassword(String),
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("internal server error")]
    Internal(String),
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MalformedInput(_)
            | AuthError::InvalidEmail(_)
            | AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_msg = self.to_string();

        match self {
            AuthError::MalformedInput(detail) => {
                warn!(detail = %detail, status = %status, "Malformed request body")
            }
            AuthError::Internal(detail) => {
                error!(detail = %detail, status = %status, "Internal error")
            }
            _ => warn!(error = %error_msg, status = %status, "Request rejected"),
        }

        let mut body = ApiResponse::failure(error_msg);
        if let AuthError::EmailTaken = self {
            body.message = body.error.clone();
        }

        HttpResponse::build(status).json(body)
    }
}

impl From<DomainError> for AuthError {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::EmailInvalid => AuthError::InvalidEmail(err.to_string()),
            DomainError::PasswordWeak(rule) => AuthError::WeakPassword(rule.to_string()),
            DomainError::DuplicateEmail => AuthError::EmailTaken,
            DomainError::InvalidCredentials => AuthError::InvalidCredentials,
            DomainError::Internal(msg) => AuthError::Internal(msg.clone()),
        }
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<DomainError>() {
            Ok(domain) => domain.into(),
            Err(other) => AuthError::Internal(other.to_string()),
        }
    }
}

/// JSON extractor settings: any binding failure becomes a 400 envelope, and
/// bodies are accepted whatever their content type.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AuthError::MalformedInput(err.to_string()).into()
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    timestamp: String,
    users: usize,
}

#[instrument(skip(state))]
pub async fn health_check(state: web::Data<AppState>) -> Result<HttpResponse, AuthError> {
    info!("Health check requested");
    let users = state.auth_service.user_count().await?;
    let response = HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        users,
    };
    Ok(HttpResponse::Ok().json(response))
}
