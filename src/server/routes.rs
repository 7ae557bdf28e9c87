use crate::errors::VizError;
use crate::plot::Figure;
use crate::state::{AppState, PerfCounters};
use crate::summary::Summary;
use crate::validate::{self, FormFields, ValidationState};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

#[derive(serde::Serialize)]
struct PlotPayload<'a> {
    request_id: Uuid,
    fetched_at: DateTime<Utc>,
    figure: Figure<'a>,
    summary: &'a Summary,
    summary_html: String,
}

#[derive(serde::Serialize)]
struct InvalidPayload<'a> {
    error: String,
    validation: &'a ValidationState,
}

/// POST /api/validate -- per-field verdicts for the current form values
pub async fn post_validate(
    State(state): State<Arc<AppState>>,
    Json(form): Json<FormFields>,
) -> Json<ValidationState> {
    PerfCounters::bump(&state.counters.validations_run);
    let verdict = validate::validate(&form);
    tracing::debug!(
        submit_enabled = verdict.submit_enabled(),
        checked = verdict.verdicts.len(),
        "form validated"
    );
    Json(verdict)
}

/// POST /api/plot -- validate, price remotely, return figure + stats
pub async fn post_plot(
    State(state): State<Arc<AppState>>,
    Json(form): Json<FormFields>,
) -> Response {
    match state.session.submit(&form).await {
        Ok(outcome) => {
            PerfCounters::bump(&state.counters.submissions);
            let payload = PlotPayload {
                request_id: outcome.request_id,
                fetched_at: outcome.fetched_at,
                figure: outcome.scene.figure(),
                summary: &outcome.summary,
                summary_html: outcome.summary.render_html(),
            };
            Json(payload).into_response()
        }
        Err(e) => error_response(&state, e),
    }
}

/// GET /api/status -- busy flag and counters (lock-free reads)
pub async fn get_status(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    use portable_atomic::Ordering::Relaxed;
    Json(serde_json::json!({
        "busy": state.session.is_busy(),
        "pricing_service_url": state.config.pricing_service_url,
        "validations_run": state.counters.validations_run.load(Relaxed),
        "submissions": state.counters.submissions.load(Relaxed),
        "submissions_failed": state.counters.submissions_failed.load(Relaxed),
        "rejected_busy": state.counters.rejected_busy.load(Relaxed),
    }))
}

fn error_response(state: &AppState, e: VizError) -> Response {
    let status = match &e {
        VizError::InvalidInput(validation) => {
            let payload = InvalidPayload {
                error: e.to_string(),
                validation,
            };
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
        VizError::Busy => {
            PerfCounters::bump(&state.counters.rejected_busy);
            StatusCode::CONFLICT
        }
        VizError::Network(_)
        | VizError::Parse(_)
        | VizError::PricingService { .. } => {
            PerfCounters::bump(&state.counters.submissions_failed);
            StatusCode::BAD_GATEWAY
        }
        // The service answered, but the lattice could not be projected.
        VizError::InsufficientData(_) => {
            PerfCounters::bump(&state.counters.submissions_failed);
            StatusCode::INTERNAL_SERVER_ERROR
        }
        VizError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(serde_json::json!({ "error": e.to_string() }))).into_response()
}
