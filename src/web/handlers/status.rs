// GET /api/status: model name, busy flag, and the category list the page
// lays its charts out with.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;

use crate::toxicity::score::Category;
use crate::web::AppState;

pub async fn get_status(State(state): State<AppState>) -> impl IntoResponse {
    let busy = state.busy.try_lock().is_err();

    Json(serde_json::json!({
        "model": state.model.name(),
        "busy": busy,
        "categories": Category::ALL,
    }))
}
