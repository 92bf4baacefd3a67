use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use yam_core::roles::ROLE_ADMIN;
use yam_core::validation::normalize_email;
use yam_db::models::user::CreateUser;
use yam_db::repositories::UserRepo;
use yam_events::{EmailConfig, EventBus, LogMailer, MailTransport, SmtpMailer};

use yam_api::auth::password::hash_password;
use yam_api::background;
use yam_api::config::ServerConfig;
use yam_api::router::build_app_router;
use yam_api::state::AppState;
use yam_api::ws;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "yam_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = yam_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    yam_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    yam_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    bootstrap_admin(&pool).await;

    // --- Email ---
    let mailer: Arc<dyn MailTransport> = match EmailConfig::from_env() {
        Some(email_config) => {
            tracing::info!(host = %email_config.smtp_host, "SMTP delivery enabled");
            Arc::new(SmtpMailer::new(&email_config).expect("Invalid SMTP configuration"))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, emails will only be logged");
            Arc::new(LogMailer)
        }
    };

    // --- WebSocket push ---
    let ws_manager = Arc::new(ws::WsManager::new());
    let heartbeat_handle = ws::start_heartbeat(Arc::clone(&ws_manager));

    let event_bus = Arc::new(EventBus::default());
    let forwarder_handle = ws::start_change_forwarder(&event_bus, Arc::clone(&ws_manager));

    // --- Background jobs ---
    let cancel = CancellationToken::new();
    let mut job_handles = Vec::new();
    if config.option_expiry_interval_secs > 0 {
        job_handles.push(tokio::spawn(background::option_expiry::run(
            pool.clone(),
            Arc::clone(&event_bus),
            Duration::from_secs(config.option_expiry_interval_secs),
            cancel.clone(),
        )));
    } else {
        tracing::info!("Option expiry job disabled");
    }
    job_handles.push(tokio::spawn(background::token_cleanup::run(
        pool.clone(),
        cancel.clone(),
    )));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        ws_manager: Arc::clone(&ws_manager),
        event_bus: Arc::clone(&event_bus),
        mailer,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    cancel.cancel();
    for handle in job_handles {
        let _ = tokio::time::timeout(Duration::from_secs(5), handle).await;
    }
    tracing::info!("Background jobs stopped");

    // Last bus reference: dropping it ends the forwarder.
    drop(event_bus);
    let _ = tokio::time::timeout(Duration::from_secs(5), forwarder_handle).await;

    ws_manager.shutdown_all().await;
    heartbeat_handle.abort();

    tracing::info!("Graceful shutdown complete");
}

/// Create the first admin from `ADMIN_BOOTSTRAP_EMAIL` and
/// `ADMIN_BOOTSTRAP_PASSWORD` if no account uses that email yet.
///
/// `create-user` requires an admin, so a fresh database needs one.
async fn bootstrap_admin(pool: &yam_db::DbPool) {
    let (Ok(email), Ok(password)) = (
        std::env::var("ADMIN_BOOTSTRAP_EMAIL"),
        std::env::var("ADMIN_BOOTSTRAP_PASSWORD"),
    ) else {
        return;
    };
    let email = normalize_email(&email).expect("ADMIN_BOOTSTRAP_EMAIL must be a valid email");

    if UserRepo::find_by_email(pool, &email)
        .await
        .expect("Failed to look up bootstrap admin")
        .is_some()
    {
        tracing::debug!("Bootstrap admin already exists");
        return;
    }

    let input = CreateUser {
        email,
        password_hash: hash_password(&password).expect("Failed to hash bootstrap password"),
        nom: "Administrateur".into(),
        prenom: "YAM".into(),
        role_custom: ROLE_ADMIN.into(),
        partenaire_id: None,
        acquereur_id: None,
    };
    let user = UserRepo::create_with_profile(pool, &input)
        .await
        .expect("Failed to create bootstrap admin");
    tracing::info!(user_id = user.id, "Bootstrap admin created");
}

/// Wait for SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
