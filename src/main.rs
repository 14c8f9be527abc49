use mimalloc::MiMalloc;
use spacedock::config::{Config, config_path};
use spacedock::{SpacecraftStorage, SpacedockState, spacedock_router};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Startup failures end the process: no config, no store, no server.
    let path = config_path();
    let cfg = Config::load(&path)?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        config = %path.display(),
        database_url = %cfg.database.url,
        max_connections = cfg.database.max_connections,
        loglevel = %cfg.loglevel
    );

    let storage = SpacecraftStorage::connect(&cfg.database).await?;
    storage.init_schema().await?;

    match cfg.admin.as_ref() {
        Some(admin) => {
            storage.upsert_user(&admin.email, &admin.password).await?;
            info!(email = %admin.email, "admin credential stored");
        }
        None => warn!("no [admin] section; writes need an existing user row"),
    }

    let app = spacedock_router(SpacedockState::new(storage), &cfg.server);

    let addr = cfg.server.socket_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("HTTP server listening on {}", addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C"),
        _ = terminate => info!("received SIGTERM"),
    }
    info!("shutting down");
}
