use actix_web::{App, HttpServer, web};
use auth_api::data::user_repository::InMemoryUserRepository;
use auth_api::infrastructure::config::Config;
use auth_api::infrastructure::logging::init_logging;
use auth_api::presentation::auth;
use auth_api::presentation::handlers::{AppState, health_check};
use auth_api::presentation::middleware::RequestTracing;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    init_logging(&config.log_level);
    info!(?config, "Configuration loaded");

    let state = web::Data::new(AppState::new(InMemoryUserRepository::new()));

    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(RequestTracing)
            .route("/health", web::get().to(health_check))
            .configure(auth::configure)
    });

    let bind_addr = config.bind_address();
    let server = server.bind((config.host.as_str(), config.port))?;
    info!(
        address = %bind_addr,
        routes = %"GET /health, POST /auth/register, POST /auth/login",
        "Starting HTTP server"
    );
    server.run().await?;

    info!("Server stopped");
    Ok(())
}
