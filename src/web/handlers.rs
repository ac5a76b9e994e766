use crate::core::form::parse_submission;
use crate::web::render::{render_page, Outcome};
use crate::web::state::AppState;
use axum::{
    extract::{Form, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

/// GET /：尚未送出的表單
pub async fn index() -> Html<String> {
    Html(render_page(&HashMap::new(), None))
}

/// POST /：驗證、預測、重新繪製整頁
pub async fn submit(
    State(state): State<AppState>,
    Form(fields): Form<HashMap<String, String>>,
) -> impl IntoResponse {
    let sample = match parse_submission(&fields) {
        Ok(sample) => sample,
        Err(rejected) => {
            tracing::warn!(
                "Submission rejected: {} invalid field(s)",
                rejected.errors.len()
            );
            let html = render_page(&fields, Some(&Outcome::Rejected(&rejected)));
            return (StatusCode::BAD_REQUEST, Html(html));
        }
    };

    match state.classifier().classify(&sample) {
        Ok(prediction) => {
            tracing::info!(
                "Prediction: label {} -> {}",
                prediction.label,
                prediction.verdict
            );
            let html = render_page(&fields, Some(&Outcome::Verdict(prediction.verdict)));
            (StatusCode::OK, Html(html))
        }
        Err(e) => {
            tracing::error!(
                "❌ Prediction failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            let html = render_page(&fields, Some(&Outcome::Failed));
            (StatusCode::INTERNAL_SERVER_ERROR, Html(html))
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model: String,
    pub loaded_at: DateTime<Utc>,
}

/// GET /healthz
pub async fn healthz(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model: state.model_info().source.clone(),
        loaded_at: state.model_info().loaded_at,
    })
}
