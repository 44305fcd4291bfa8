// Car info handler
use axum::{body::Bytes, extract::State, response::Json};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::proxy::mappers::gemini::{build_payload, strip_code_fence, GenerateContentResponse};
use crate::proxy::server::AppState;

/// Inbound body for POST /api/car-info
#[derive(Debug, Deserialize)]
pub struct CarQuery {
    #[serde(rename = "userQuery")]
    pub user_query: String,
}

/// Handle POST /api/car-info
///
/// One upstream round trip per request: wrap the query with the fixed
/// instruction prompt, call generateContent, unfence and parse the reply.
/// Every failure renders as `500 {"error": <message>}` via `AppError`.
pub async fn handle_car_info(
    State(state): State<AppState>,
    body: Bytes,
) -> AppResult<Json<Value>> {
    // 1. Raw-body parse so a malformed body takes the same error path as
    // everything else instead of an extractor rejection.
    let query: CarQuery = serde_json::from_slice(&body).map_err(AppError::InvalidRequest)?;

    // 2. Credential check before any network call
    let api_key = state.api_key.as_deref().ok_or(AppError::MissingApiKey)?;

    info!("Received car info request: {}", query.user_query);

    // 3. Single upstream call, no retry
    let payload = build_payload(&query.user_query);
    let response = state
        .upstream
        .generate_content(&state.model, api_key, &payload)
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(AppError::UpstreamStatus(status));
    }

    // 4. Defensive traversal into the untrusted reply
    let reply: GenerateContentResponse = response.json().await?;
    let text = reply.first_text().ok_or(AppError::NoContent)?;

    // 5. Unfence, parse, relay verbatim
    let car_info: Value =
        serde_json::from_str(strip_code_fence(text)).map_err(AppError::PayloadParse)?;

    Ok(Json(car_info))
}
