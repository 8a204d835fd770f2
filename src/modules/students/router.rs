use crate::modules::students::controller::{
    handle_add_student, handle_get_all_students, handle_get_student_detail,
    handle_student_status, handle_update_student,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, patch},
};

pub fn init_students_router() -> Router<AppState> {
    Router::new()
        .route("/", get(handle_get_all_students).post(handle_add_student))
        .route(
            "/{id}",
            get(handle_get_student_detail)
                .put(handle_update_student)
                .patch(handle_update_student),
        )
        .route("/{id}/status", patch(handle_student_status))
}
