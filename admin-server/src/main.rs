use admin_server::api;
use admin_server::config::Config;
use admin_server::db;
use admin_server::state::AppState;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    // Load .env file
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "admin_server=info,tower_http=info".into()),
        )
        .init();

    let config = Config::from_env()?;

    tracing::info!("Starting admin-server (env: {})", config.environment);

    let state = AppState::new(&config).await?;
    db::admin_users::ensure_seed(&state.pool).await?;

    let app = api::create_router(state);

    let http_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = tokio::net::TcpListener::bind(&http_addr).await?;
    tracing::info!("admin-server HTTP listening on {http_addr}");

    axum::serve(listener, app).await?;

    Ok(())
}
