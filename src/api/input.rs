//! Input file endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, AppState};

#[derive(Serialize, ToSchema)]
pub struct InputFileResponse {
    pub path: String,
    pub content: String,
}

#[derive(Deserialize, ToSchema)]
pub struct UpdateInputFile {
    pub content: String,
}

/// Current input file contents
#[utoipa::path(
    get,
    path = "/input",
    tag = "input",
    responses(
        (status = 200, description = "Input file", body = InputFileResponse),
        (status = 404, description = "Input file missing")
    )
)]
pub async fn get_input(State(state): State<AppState>) -> AppResult<Json<InputFileResponse>> {
    let content = state.services.refresh.read_input().await?;
    Ok(Json(InputFileResponse {
        path: state.services.refresh.catalog().input_file.display().to_string(),
        content,
    }))
}

/// Replace the input file contents
#[utoipa::path(
    put,
    path = "/input",
    tag = "input",
    request_body = UpdateInputFile,
    responses(
        (status = 204, description = "Input file saved")
    )
)]
pub async fn save_input(
    State(state): State<AppState>,
    Json(body): Json<UpdateInputFile>,
) -> AppResult<StatusCode> {
    state.services.refresh.save_input(&body.content).await?;
    Ok(StatusCode::NO_CONTENT)
}
