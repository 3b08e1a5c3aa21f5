use crate::core::checkin::{CheckInLogic, CheckInMessage};
use crate::utils::time::now;
use crate::web::error::{ApiError, ApiResult};
use crate::web::state::AppState;
use axum::{
    Form, Json,
    extract::State,
    response::{Html, IntoResponse},
};
use serde::Deserialize;
use serde_json::json;

const KIOSK_PAGE: &str = include_str!("../../static/index.html");

/// Form posted by the kiosk page. A missing field behaves like an unknown id.
#[derive(Debug, Deserialize)]
pub struct CheckInForm {
    #[serde(default)]
    pub student_id: String,
}

/// Kiosk page
pub async fn index() -> Html<&'static str> {
    Html(KIOSK_PAGE)
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
    }))
}

/// Toggle a student's attendance.
///
/// Always answers 200 with `{"message": ...}` for business outcomes, including
/// unknown ids and unsigned waivers.
pub async fn checkin(
    State(state): State<AppState>,
    Form(form): Form<CheckInForm>,
) -> ApiResult<Json<CheckInMessage>> {
    let pool = state.pool.clone();

    let outcome = tokio::task::spawn_blocking(move || {
        pool.with_conn(|conn| CheckInLogic::toggle(conn, &form.student_id, now()))
    })
    .await
    .map_err(|e| {
        tracing::error!("Check-in task failed: {}", e);
        ApiError::InternalServerError
    })?
    .map_err(|e| {
        tracing::error!("Check-in failed: {}", e);
        ApiError::Database(e)
    })?;

    Ok(Json(CheckInMessage::from(&outcome)))
}
