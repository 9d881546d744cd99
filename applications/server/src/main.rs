/// Chorus Server - collaborative playlist backend
use chorus_server::{
    config::ServerConfig,
    create_router,
    services::{exports::ExportJob, AuthService, ChannelExportProducer},
    state::AppState,
};
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chorus-server")]
#[command(about = "Chorus collaborative playlist server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CHORUS_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user
    AddUser {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chorus_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => serve(config).await?,
        Commands::AddUser { username, password } => add_user(config, &username, &password).await?,
        Commands::ListUsers => list_users(config).await?,
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Chorus Server");

    let pool = chorus_storage::create_pool_with(
        &config.storage.database_url,
        config.storage.max_connections,
    )
    .await?;
    chorus_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    let cache_client = chorus_cache::create_cache(&config.cache.redis).await;
    tracing::info!(backend = cache_client.backend(), "Cache ready");

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    ));

    let (export_producer, export_jobs) =
        ChannelExportProducer::new(config.exports.queue_capacity);
    let export_worker = tokio::spawn(drain_exports(export_jobs));

    let app_state = AppState::new(
        pool.clone(),
        Arc::clone(&cache_client),
        Arc::new(export_producer),
        auth_service,
        config.cache.ttl(),
    );
    let coordinator = Arc::clone(&app_state.cache);
    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));
    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Writes are done; let their invalidations land before closing clients
    coordinator.settle().await;
    if let Err(e) = export_worker.await {
        tracing::warn!("Export worker ended abnormally: {}", e);
    }
    cache_client.close().await;
    pool.close().await;
    tracing::info!("Shutdown complete");

    Ok(())
}

/// Hand queued exports to the log until every producer is gone
async fn drain_exports(mut jobs: tokio::sync::mpsc::Receiver<ExportJob>) {
    while let Some(job) = jobs.recv().await {
        tracing::info!(queue = %job.queue, message = %job.message, "Export job published");
    }
    tracing::debug!("Export queue drained");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    tracing::info!("Shutdown signal received");
}

async fn add_user(config: ServerConfig, username: &str, password: &str) -> anyhow::Result<()> {
    let pool = chorus_storage::create_pool(&config.storage.database_url).await?;
    chorus_storage::run_migrations(&pool).await?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
        config.auth.jwt_refresh_expiration_days,
    );
    let user = auth_service.register(&pool, username, password).await?;

    println!("Created user {} ({})", user.username, user.id);
    pool.close().await;
    Ok(())
}

async fn list_users(config: ServerConfig) -> anyhow::Result<()> {
    let pool = chorus_storage::create_pool(&config.storage.database_url).await?;
    chorus_storage::run_migrations(&pool).await?;

    let users = chorus_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {}", user.id, user.username);
    }

    pool.close().await;
    Ok(())
}
