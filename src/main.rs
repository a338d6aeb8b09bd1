use std::net::TcpListener;
use std::sync::Arc;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use predictor_backend::run;
use predictor_backend::config::settings::get_config;
use predictor_backend::db::standings_queries::PgStandingsRepository;
use predictor_backend::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "predictor-backend".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(
            config.database.connection_string().expose_secret()
        )
        .expect("Failed to create Postgres connection pool");

    if config.application.run_migrations {
        if let Err(e) = sqlx::migrate!("./migrations").run(&connection_pool).await {
            tracing::error!("Failed to run database migrations: {}", e);
            std::process::exit(1);
        }
        tracing::info!("Database migrations applied");
    }

    let address = config.application.address();
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Starting predictor backend on {}", address);

    let repository = Arc::new(PgStandingsRepository::new(connection_pool));
    run(listener, repository)?.await
}
