//! Student handlers: save, update, delete, lookups, aggregates and searches.

use crate::error::AppError;
use crate::extractors::JsonBody;
use crate::model::Student;
use crate::response::{created, ok};
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;

#[utoipa::path(
    post,
    path = "/students/save",
    tag = "students",
    request_body = Student,
    responses(
        (status = 201, description = "Student created", body = Student),
        (status = 400, description = "Invalid data")
    )
)]
pub async fn save(
    State(state): State<AppState>,
    JsonBody(student): JsonBody<Student>,
) -> Result<impl IntoResponse, AppError> {
    let saved = state.students.save(student).await?;
    tracing::info!(id = ?saved.id, "student saved");
    Ok(created(saved))
}

#[utoipa::path(
    put,
    path = "/students/update/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Id of the student to update")),
    request_body = Student,
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 404, description = "Student not found")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    JsonBody(student): JsonBody<Student>,
) -> Result<impl IntoResponse, AppError> {
    let updated = state
        .students
        .update(id, student)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
    Ok(ok(updated))
}

#[utoipa::path(
    delete,
    path = "/students/delete/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Id of the student to delete")),
    responses(
        (status = 204, description = "Student deleted"),
        (status = 404, description = "Student not found")
    )
)]
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    if !state.students.delete(id).await? {
        return Err(AppError::NotFound(format!("student {}", id)));
    }
    tracing::info!(id, "student deleted");
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/students/{id}",
    tag = "students",
    params(("id" = i32, Path, description = "Id of the student")),
    responses(
        (status = 200, description = "Student found", body = Student),
        (status = 404, description = "Student not found")
    )
)]
pub async fn find_by_id(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let student = state
        .students
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
    Ok(ok(student))
}

#[utoipa::path(
    get,
    path = "/students/all",
    tag = "students",
    responses((status = 200, description = "Every student", body = Vec<Student>))
)]
pub async fn find_all(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.find_all().await?))
}

#[utoipa::path(
    get,
    path = "/students/count",
    tag = "students",
    responses((status = 200, description = "Number of students", body = i64))
)]
pub async fn count(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.count_students().await?))
}

/// Responds with `[[year, count], ...]`.
#[utoipa::path(
    get,
    path = "/students/byYear",
    tag = "students",
    responses((status = 200, description = "Array of [birth year, count] pairs"))
)]
pub async fn by_year(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.find_nbr_student_by_year().await?))
}

#[utoipa::path(
    get,
    path = "/students/search/nom/{nom}",
    tag = "students",
    params(("nom" = String, Path, description = "Last name, exact match")),
    responses((status = 200, description = "Matching students", body = Vec<Student>))
)]
pub async fn find_by_nom(
    State(state): State<AppState>,
    Path(nom): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.find_by_nom(&nom).await?))
}

#[utoipa::path(
    get,
    path = "/students/search/prenom/{prenom}",
    tag = "students",
    params(("prenom" = String, Path, description = "First name, exact match")),
    responses((status = 200, description = "Matching students", body = Vec<Student>))
)]
pub async fn find_by_prenom(
    State(state): State<AppState>,
    Path(prenom): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.find_by_prenom(&prenom).await?))
}

#[utoipa::path(
    get,
    path = "/students/search/{nom}/{prenom}",
    tag = "students",
    params(
        ("nom" = String, Path, description = "Last name, exact match"),
        ("prenom" = String, Path, description = "First name, exact match")
    ),
    responses((status = 200, description = "Matching students", body = Vec<Student>))
)]
pub async fn find_by_nom_and_prenom(
    State(state): State<AppState>,
    Path((nom, prenom)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    Ok(ok(state.students.find_by_nom_and_prenom(&nom, &prenom).await?))
}

#[utoipa::path(
    get,
    path = "/students/bornAfter/{date}",
    tag = "students",
    params(("date" = String, Path, description = "Exclusive lower bound, YYYY-MM-DD")),
    responses(
        (status = 200, description = "Students born after the date", body = Vec<Student>),
        (status = 400, description = "Unparsable date")
    )
)]
pub async fn born_after(
    State(state): State<AppState>,
    Path(date): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let date = NaiveDate::parse_from_str(&date, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("invalid date: {}", date)))?;
    Ok(ok(state.students.find_born_after(date).await?))
}
