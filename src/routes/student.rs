//! Student routes under `/students`.

use crate::handlers::student::{
    born_after, by_year, count, delete as delete_handler, find_all, find_by_id, find_by_nom,
    find_by_nom_and_prenom, find_by_prenom, save, update,
};
use crate::state::AppState;
use axum::{
    routing::{delete, get, post, put},
    Router,
};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/students/save", post(save))
        .route("/students/update/:id", put(update))
        .route("/students/delete/:id", delete(delete_handler))
        .route("/students/all", get(find_all))
        .route("/students/count", get(count))
        .route("/students/byYear", get(by_year))
        .route("/students/bornAfter/:date", get(born_after))
        .route("/students/search/nom/:nom", get(find_by_nom))
        .route("/students/search/prenom/:prenom", get(find_by_prenom))
        .route("/students/search/:nom/:prenom", get(find_by_nom_and_prenom))
        .route("/students/:id", get(find_by_id))
        .with_state(state)
}
