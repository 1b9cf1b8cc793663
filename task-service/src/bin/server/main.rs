use std::sync::Arc;

use auth::Authenticator;
use sqlx::postgres::PgPoolOptions;
use task_service::config::Config;
use task_service::domain::task::ports::TaskServicePort;
use task_service::domain::task::service::TaskService;
use task_service::domain::user::ports::UserServicePort;
use task_service::domain::user::service::UserService;
use task_service::inbound::http::router::create_router;
use task_service::outbound::repositories::InMemoryCredentialRepository;
use task_service::outbound::repositories::InMemoryTaskRepository;
use task_service::outbound::repositories::PostgresCredentialRepository;
use task_service::outbound::repositories::PostgresTaskRepository;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "task_service=debug,auth=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        service = "task-service",
        version = env!("CARGO_PKG_VERSION"),
        "Service starting"
    );

    let config = Config::load()?;

    tracing::info!(
        http_port = config.server.http_port,
        database = config.database.is_some(),
        "Configuration loaded"
    );

    let authenticator = Arc::new(Authenticator::new(config.jwt.secret.as_bytes())?);

    let (user_service, task_service): (Arc<dyn UserServicePort>, Arc<dyn TaskServicePort>) =
        match &config.database {
            Some(database) => {
                let pg_pool = PgPoolOptions::new()
                    .max_connections(database.max_connections)
                    .connect(&database.url)
                    .await?;
                tracing::info!(
                    max_connections = database.max_connections,
                    database = "postgresql",
                    "Database connection pool created"
                );

                sqlx::migrate!("./migrations").run(&pg_pool).await?;
                tracing::info!(database = "postgresql", "Database migrations completed");

                let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
                    Arc::new(PostgresCredentialRepository::new(pg_pool.clone())),
                    Arc::clone(&authenticator),
                ));
                let task_service: Arc<dyn TaskServicePort> = Arc::new(TaskService::new(
                    Arc::new(PostgresTaskRepository::new(pg_pool)),
                ));
                (user_service, task_service)
            }
            None => {
                tracing::warn!("No database configured, state is kept in memory");
                let user_service: Arc<dyn UserServicePort> = Arc::new(UserService::new(
                    Arc::new(InMemoryCredentialRepository::new()),
                    Arc::clone(&authenticator),
                ));
                let task_service: Arc<dyn TaskServicePort> =
                    Arc::new(TaskService::new(Arc::new(InMemoryTaskRepository::new())));
                (user_service, task_service)
            }
        };

    let http_address = format!("0.0.0.0:{}", config.server.http_port);
    let http_listener = tokio::net::TcpListener::bind(&http_address).await?;
    tracing::info!(
        address = %http_address,
        port = config.server.http_port,
        protocol = "http",
        "Http server listening"
    );

    let http_application = create_router(user_service, task_service, authenticator);
    axum::serve(http_listener, http_application).await?;

    tracing::info!("Server exited successfully");

    Ok(())
}
