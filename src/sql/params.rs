//! Values bound to student queries.

use chrono::NaiveDate;
use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::{QueryAs, QueryScalar};

/// A value bound to a positional parameter (`$n`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SqlParam {
    Int(i32),
    Text(Option<String>),
    Date(Option<NaiveDate>),
}

impl From<&str> for SqlParam {
    fn from(v: &str) -> Self {
        SqlParam::Text(Some(v.to_string()))
    }
}

impl From<NaiveDate> for SqlParam {
    fn from(v: NaiveDate) -> Self {
        SqlParam::Date(Some(v))
    }
}

/// Bind params in order to a row-returning query.
pub fn bind_as<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: Vec<SqlParam>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::Int(n) => query.bind(n),
            SqlParam::Text(s) => query.bind(s),
            SqlParam::Date(d) => query.bind(d),
        };
    }
    query
}

/// Bind params in order to a scalar query.
pub fn bind_scalar<'q, O>(
    mut query: QueryScalar<'q, Postgres, O, PgArguments>,
    params: Vec<SqlParam>,
) -> QueryScalar<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            SqlParam::Int(n) => query.bind(n),
            SqlParam::Text(s) => query.bind(s),
            SqlParam::Date(d) => query.bind(d),
        };
    }
    query
}
