use crate::domain::user::{CreateUser, LoginRequest};
use crate::presentation::handlers::{ApiResponse, AppState, AuthError, json_config};
use actix_web::{HttpResponse, web};
use tracing::{info, instrument};

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<CreateUser>,
) -> Result<HttpResponse, AuthError> {
    info!("Registration request received");

    let user = state.auth_service.register_user(req.into_inner()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok("user registered successfully", user.id)))
}

#[instrument(skip(state, req), fields(email = %req.email))]
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, AuthError> {
    info!("Login request received");

    let user = state.auth_service.login(req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok("login successful", user.id)))
}

/// Mounts the `/auth` routes with the JSON binding rules installed.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .app_data(json_config())
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login)),
    );
}
