//! OpenAPI document for the student endpoints.

use crate::handlers::student;
use crate::model::Student;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Management", description = "API for managing student records"),
    paths(
        student::save,
        student::update,
        student::delete,
        student::find_by_id,
        student::find_all,
        student::count,
        student::by_year,
        student::find_by_nom,
        student::find_by_prenom,
        student::find_by_nom_and_prenom,
        student::born_after
    ),
    components(schemas(Student)),
    tags((name = "students", description = "Student management"))
)]
pub struct ApiDoc;
