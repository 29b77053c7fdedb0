//! PostgreSQL-backed repository.

use super::StudentRepository;
use crate::error::AppError;
use crate::model::{Student, YearCount};
use crate::sql::{self, bind_as, bind_scalar, Filter, QueryBuf, StudentTable};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};

#[derive(FromRow)]
struct StudentRow {
    id: i32,
    nom: Option<String>,
    prenom: Option<String>,
    date_naissance: Option<NaiveDate>,
}

impl From<StudentRow> for Student {
    fn from(r: StudentRow) -> Self {
        Student {
            id: Some(r.id),
            nom: r.nom,
            prenom: r.prenom,
            date_naissance: r.date_naissance,
        }
    }
}

#[derive(Clone)]
pub struct PgStudentRepository {
    pool: PgPool,
    table: StudentTable,
}

impl PgStudentRepository {
    pub fn new(pool: PgPool, table: StudentTable) -> Self {
        Self { pool, table }
    }

    async fn query_one(&self, q: QueryBuf) -> Result<Option<Student>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let row = bind_as(sqlx::query_as::<_, StudentRow>(&sql), params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Student::from))
    }

    async fn query_many(&self, q: QueryBuf) -> Result<Vec<Student>, AppError> {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let rows = bind_as(sqlx::query_as::<_, StudentRow>(&sql), params)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn select(&self, filters: &[Filter]) -> Result<Vec<Student>, AppError> {
        self.query_many(sql::select_where(&self.table, filters)).await
    }
}

#[async_trait]
impl StudentRepository for PgStudentRepository {
    async fn save(&self, student: Student) -> Result<Student, AppError> {
        if let Some(id) = student.id {
            if let Some(updated) = self.query_one(sql::update(&self.table, id, &student)).await? {
                return Ok(updated);
            }
        }
        self.query_one(sql::insert(&self.table, &student))
            .await?
            .ok_or(AppError::Db(sqlx::Error::RowNotFound))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Student>, AppError> {
        self.query_one(sql::select_by_id(&self.table, id)).await
    }

    async fn find_all(&self) -> Result<Vec<Student>, AppError> {
        self.select(&[]).await
    }

    async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let q = sql::delete(&self.table, id);
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let QueryBuf { sql, params } = q;
        let removed: Option<i32> = bind_scalar(sqlx::query_scalar(&sql), params)
            .fetch_optional(&self.pool)
            .await?;
        Ok(removed.is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        let q = sql::count(&self.table);
        tracing::debug!(sql = %q.sql, "query");
        let n: i64 = sqlx::query_scalar(&q.sql).fetch_one(&self.pool).await?;
        Ok(n)
    }

    async fn count_by_birth_year(&self) -> Result<Vec<YearCount>, AppError> {
        let q = sql::count_by_birth_year(&self.table);
        tracing::debug!(sql = %q.sql, "query");
        let rows: Vec<(Option<i32>, i64)> = sqlx::query_as(&q.sql).fetch_all(&self.pool).await?;
        Ok(rows.into_iter().map(|(year, n)| YearCount(year, n)).collect())
    }

    async fn find_by_nom(&self, nom: &str) -> Result<Vec<Student>, AppError> {
        self.select(&[Filter::Eq("nom", nom.into())]).await
    }

    async fn find_by_prenom(&self, prenom: &str) -> Result<Vec<Student>, AppError> {
        self.select(&[Filter::Eq("prenom", prenom.into())]).await
    }

    async fn find_by_nom_and_prenom(&self, nom: &str, prenom: &str) -> Result<Vec<Student>, AppError> {
        self.select(&[Filter::Eq("nom", nom.into()), Filter::Eq("prenom", prenom.into())])
            .await
    }

    async fn find_born_after(&self, date: NaiveDate) -> Result<Vec<Student>, AppError> {
        self.select(&[Filter::After("date_naissance", date.into())]).await
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").fetch_optional(&self.pool).await?;
        Ok(())
    }
}
