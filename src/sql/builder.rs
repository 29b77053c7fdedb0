//! Builds parameterized SELECT, INSERT, UPDATE, DELETE for the student table.

use super::params::SqlParam;
use crate::model::Student;

/// Columns in the order every SELECT/RETURNING lists them.
pub const STUDENT_COLUMNS: &[&str] = &["id", "nom", "prenom", "date_naissance"];

/// Quote identifier for PostgreSQL.
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

/// Schema-qualified student table.
#[derive(Clone, Debug)]
pub struct StudentTable {
    pub schema: String,
    pub table: String,
}

impl StudentTable {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: "student".into(),
        }
    }

    pub fn qualified(&self) -> String {
        format!("{}.{}", quoted(&self.schema), quoted(&self.table))
    }
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<SqlParam>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: SqlParam) -> u32 {
        let n = self.params.len() as u32 + 1;
        self.params.push(v);
        n
    }
}

/// Comparison applied to one column in a WHERE clause.
#[derive(Clone, Debug)]
pub enum Filter {
    Eq(&'static str, SqlParam),
    After(&'static str, SqlParam),
}

fn column_list() -> String {
    STUDENT_COLUMNS
        .iter()
        .map(|c| quoted(c))
        .collect::<Vec<_>>()
        .join(", ")
}

/// SELECT rows matching every filter (AND), ordered by id. No filters selects all.
pub fn select_where(table: &StudentTable, filters: &[Filter]) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut where_parts = Vec::with_capacity(filters.len());
    for f in filters {
        let (col, op, val) = match f {
            Filter::Eq(col, val) => (col, "=", val),
            Filter::After(col, val) => (col, ">", val),
        };
        let n = q.push_param(val.clone());
        where_parts.push(format!("{} {} ${}", quoted(col), op, n));
    }
    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };
    q.sql = format!(
        "SELECT {} FROM {}{} ORDER BY \"id\"",
        column_list(),
        table.qualified(),
        where_clause
    );
    q
}

/// SELECT by primary key.
pub fn select_by_id(table: &StudentTable, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "SELECT {} FROM {} WHERE \"id\" = ${}",
        column_list(),
        table.qualified(),
        n
    );
    q
}

fn value_params(student: &Student) -> [SqlParam; 3] {
    [
        SqlParam::Text(student.nom.clone()),
        SqlParam::Text(student.prenom.clone()),
        SqlParam::Date(student.date_naissance),
    ]
}

/// INSERT the non-id fields; the id comes from the column's sequence.
pub fn insert(table: &StudentTable, student: &Student) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut placeholders = Vec::with_capacity(3);
    for p in value_params(student) {
        placeholders.push(format!("${}", q.push_param(p)));
    }
    q.sql = format!(
        "INSERT INTO {} (\"nom\", \"prenom\", \"date_naissance\") VALUES ({}) RETURNING {}",
        table.qualified(),
        placeholders.join(", "),
        column_list()
    );
    q
}

/// UPDATE every non-id field of one row. Returns no row when the id is absent.
pub fn update(table: &StudentTable, id: i32, student: &Student) -> QueryBuf {
    let mut q = QueryBuf::new();
    let mut sets = Vec::with_capacity(3);
    for (col, p) in STUDENT_COLUMNS[1..].iter().zip(value_params(student)) {
        let n = q.push_param(p);
        sets.push(format!("{} = ${}", quoted(col), n));
    }
    let id_n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "UPDATE {} SET {} WHERE \"id\" = ${} RETURNING {}",
        table.qualified(),
        sets.join(", "),
        id_n,
        column_list()
    );
    q
}

/// DELETE by primary key, returning the id when a row was removed.
pub fn delete(table: &StudentTable, id: i32) -> QueryBuf {
    let mut q = QueryBuf::new();
    let n = q.push_param(SqlParam::Int(id));
    q.sql = format!(
        "DELETE FROM {} WHERE \"id\" = ${} RETURNING \"id\"",
        table.qualified(),
        n
    );
    q
}

pub fn count(table: &StudentTable) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!("SELECT COUNT(*) FROM {}", table.qualified());
    q
}

/// Student count per birth year, aggregated by the database. The null year sorts first.
pub fn count_by_birth_year(table: &StudentTable) -> QueryBuf {
    let mut q = QueryBuf::new();
    q.sql = format!(
        "SELECT CAST(EXTRACT(YEAR FROM \"date_naissance\") AS INTEGER) AS \"year\", COUNT(*) AS \"count\" \
         FROM {} GROUP BY 1 ORDER BY 1 NULLS FIRST",
        table.qualified()
    );
    q
}
