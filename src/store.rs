//! Database bootstrap: create the database, schema, and student table when missing.

use crate::error::{AppError, ConfigError};
use crate::sql::StudentTable;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

/// Create the schema (unless `public`) and `student` table if they do not exist.
pub async fn ensure_student_table(pool: &PgPool, table: &StudentTable) -> Result<(), AppError> {
    if table.schema != "public" {
        let sql = format!("CREATE SCHEMA IF NOT EXISTS {}", quote_ident(&table.schema));
        tracing::debug!(sql = %sql, "ddl");
        sqlx::query(&sql).execute(pool).await?;
    }
    let ddl = format!(
        r#"
        CREATE TABLE IF NOT EXISTS {} (
            id SERIAL PRIMARY KEY,
            nom TEXT,
            prenom TEXT,
            date_naissance DATE
        )
        "#,
        table.qualified()
    );
    tracing::debug!(sql = %ddl, "ddl");
    sqlx::query(&ddl).execute(pool).await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url).map_err(|_| {
        ConfigError::InvalidValue {
            var: "DATABASE_URL",
            value: database_url.to_string(),
        }
    })?;
    let mut conn: sqlx::PgConnection = opts.connect().await?;
    let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
        .bind(&db_name)
        .fetch_one(&mut conn)
        .await?;
    if !exists.0 {
        tracing::info!(database = %db_name, "creating database");
        sqlx::query(&format!("CREATE DATABASE {}", quote_ident(&db_name)))
            .execute(&mut conn)
            .await?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), ConfigError> {
    let invalid = || ConfigError::InvalidValue {
        var: "DATABASE_URL",
        value: url.to_string(),
    };
    let scheme_end = url.find("://").ok_or_else(invalid)? + 3;
    let path_start = url[scheme_end..].find('/').ok_or_else(invalid)? + scheme_end + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
