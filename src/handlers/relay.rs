use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::relay::ApplicationRequest;
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/submit",
    tag = "Form Relay",
    operation_id = "submitApplication",
    summary = "Submit an academy application",
    description = "Maps the application payload onto the external form's field identifiers \
        and forwards it as a single form-encoded POST. Fire-and-forget: the upstream \
        response body is discarded, only its status is checked, and there is no retry. \
        Public.",
    request_body = ApplicationRequest,
    responses(
        (status = 200, description = "Application forwarded", body = String),
        (status = 400, description = "Malformed payload (VALIDATION_ERROR)", body = ErrorBody),
        (status = 500, description = "Upstream form rejected the submission (INTERNAL_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(desired_game = %payload.desired_game))]
pub async fn submit_application(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ApplicationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let form = payload.entry_pairs();

    let response = state
        .http
        .post(&state.config.relay.form_url)
        .form(&form)
        .send()
        .await
        .map_err(|e| AppError::Internal(format!("Form relay request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::Internal(format!(
            "Form relay returned status {status}"
        )));
    }

    Ok((StatusCode::OK, "Application submitted"))
}
