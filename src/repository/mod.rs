//! Data access for student records.
//!
//! `StudentRepository` is the seam between the service and storage. Two
//! implementations exist: [`PgStudentRepository`] over PostgreSQL and
//! [`InMemoryStudentRepository`] for tests and database-less runs.

mod memory;
mod postgres;

pub use memory::InMemoryStudentRepository;
pub use postgres::PgStudentRepository;

use crate::error::AppError;
use crate::model::{Student, YearCount};
use async_trait::async_trait;
use chrono::NaiveDate;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// Insert when `student.id` is `None` or names no stored row; otherwise
    /// overwrite that row. Returns the stored record with its id.
    async fn save(&self, student: Student) -> Result<Student, AppError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError>;

    /// All rows ordered by id.
    async fn find_all(&self) -> Result<Vec<Student>, AppError>;

    /// Returns whether a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, AppError>;

    async fn count(&self) -> Result<i64, AppError>;

    async fn count_by_birth_year(&self) -> Result<Vec<YearCount>, AppError>;

    async fn find_by_nom(&self, nom: &str) -> Result<Vec<Student>, AppError>;

    async fn find_by_prenom(&self, prenom: &str) -> Result<Vec<Student>, AppError>;

    async fn find_by_nom_and_prenom(&self, nom: &str, prenom: &str) -> Result<Vec<Student>, AppError>;

    /// Rows born strictly after `date`.
    async fn find_born_after(&self, date: NaiveDate) -> Result<Vec<Student>, AppError>;

    /// Cheap liveness probe used by readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
