// POST /api/analyze: score one piece of text.
//
// 200 with the analysis and chart data on success.
// 400 for blank text (the model is never called).
// 502 when the model call fails or its output can't be parsed.
// 409 if another analysis is still running.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use crate::output::charts::ChartData;
use crate::toxicity::analyzer::analyze;
use crate::toxicity::error::FailureKind;
use crate::web::{api_error, AppState};

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    text: String,
}

pub async fn analyze_text(
    State(state): State<AppState>,
    Json(body): Json<AnalyzeRequest>,
) -> Response {
    let Ok(_guard) = state.busy.try_lock() else {
        return api_error(
            StatusCode::CONFLICT,
            "busy",
            "An analysis is already running",
        );
    };

    match analyze(state.model.as_ref(), &body.text).await {
        Ok(analysis) => {
            let charts = ChartData::from_score(&analysis.scores);
            (
                StatusCode::OK,
                Json(serde_json::json!({ "analysis": analysis, "charts": charts })),
            )
                .into_response()
        }
        Err(e) => match e.kind() {
            FailureKind::EmptyInput => {
                api_error(StatusCode::BAD_REQUEST, "empty_input", &e.to_string())
            }
            FailureKind::ParseError => {
                api_error(StatusCode::BAD_GATEWAY, "parse_error", &e.to_string())
            }
        },
    }
}
