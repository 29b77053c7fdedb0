//! Server binary: reads config from env (and `.env`), prepares the store, serves the API.

use std::sync::Arc;

use student_service::sql::StudentTable;
use student_service::{
    build_router, ensure_database_exists, ensure_student_table, AppConfig, AppState,
    InMemoryStudentRepository, PgStudentRepository, StoreKind, StudentRepository, StudentService,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("student_service=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let repo: Arc<dyn StudentRepository> = match config.store {
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on shutdown");
            Arc::new(InMemoryStudentRepository::new())
        }
        StoreKind::Postgres => {
            ensure_database_exists(&config.database_url).await?;
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(&config.database_url)
                .await?;
            let table = StudentTable::new(config.schema.clone());
            ensure_student_table(&pool, &table).await?;
            Arc::new(PgStudentRepository::new(pool, table))
        }
    };

    let state = AppState::new(StudentService::new(repo));
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutting down");
}
