use anyhow::Context;
use api::{auth::session_layer, routes::app};
use axum::http::{
    HeaderValue, Method,
    header::{ACCEPT, CONTENT_TYPE},
};
use migration::Migrator;
use sea_orm_migration::MigratorTrait;
use std::{net::SocketAddr, time::Duration};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_sessions::session_store::ExpiredDeletion;
use tower_sessions_sqlx_store::SqliteStore;
use tracing_appender::rolling;
use util::{config::AppConfig, state::AppState};

#[tokio::main]
async fn main() {
    let config = match AppConfig::init() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    let _log_guard = init_logging(config);

    if let Err(e) = run(config).await {
        tracing::error!(error = ?e, "server failed");
        eprintln!("Fatal: {e:#}");
        std::process::exit(1);
    }
}

async fn run(config: &'static AppConfig) -> anyhow::Result<()> {
    let db = db::connect(&config.database_path)
        .await
        .context("failed to connect to database")?;

    Migrator::up(&db, None).await.context("failed to run migrations")?;

    // Session rows share the application database.
    let session_store = SqliteStore::new(db.get_sqlite_connection_pool().clone());
    session_store
        .migrate()
        .await
        .context("failed to prepare session table")?;

    tokio::spawn(
        session_store
            .clone()
            .continuously_delete_expired(Duration::from_secs(60 * 10)),
    );

    let app_state = AppState::new(db);

    let app = app(
        app_state,
        session_layer(session_store, &config.session_secret, config.is_production()),
    )
    .layer(cors_layer(&config.cors_origins));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .with_context(|| format!("invalid listen address {}:{}", config.host, config.port))?;

    tracing::info!(env = %config.env, %addr, "starting {}", config.project_name);
    println!(
        "Starting {} on http://{}:{}",
        config.project_name, config.host, config.port
    );

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .await
        .context("server crashed")?;

    Ok(())
}

/// Allow-list CORS with credentials, so the browser sends the session cookie.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(%origin, "ignoring malformed CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT])
        .allow_credentials(true)
}

fn init_logging(config: &AppConfig) -> tracing_appender::non_blocking::WorkerGuard {
    use std::fs;
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    fs::create_dir_all("logs").ok();

    let file_appender = rolling::daily("logs", &config.log_file);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let stdout_layer = config.log_to_stdout.then(|| {
        fmt::layer()
            .with_writer(std::io::stdout)
            .with_ansi(true)
            .with_target(true)
            .with_thread_ids(true)
    });

    let env_filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("api=info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .init();

    guard
}
