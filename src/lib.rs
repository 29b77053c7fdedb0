//! Student records REST service: axum routes over a PostgreSQL (or in-memory) store.

pub mod app;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod model;
pub mod openapi;
pub mod repository;
pub mod response;
pub mod routes;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use app::build_router;
pub use config::{AppConfig, StoreKind};
pub use error::{AppError, ConfigError};
pub use model::{Student, YearCount};
pub use repository::{InMemoryStudentRepository, PgStudentRepository, StudentRepository};
pub use service::StudentService;
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_student_table};
