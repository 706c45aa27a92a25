//! `GET /v1/tools` — proxies the Tool Hub schema (spec §6).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use gateway_core::clients::tools::ToolListResponse;
use gateway_core::ErrorKind;

use crate::handlers::{error_response, request_id_from_headers, ErrorBody};
use crate::state::SharedState;
use axum::http::HeaderMap;

pub async fn list_tools(
    State(state): State<SharedState>,
    headers: HeaderMap,
) -> Result<Json<ToolListResponse>, (StatusCode, Json<ErrorBody>)> {
    let request_id = request_id_from_headers(&headers);
    state
        .tools
        .list(&request_id)
        .await
        .map(Json)
        .map_err(|err| error_response(ErrorKind::UpstreamFailure(err.to_string())))
}
