//! Prompt routes. Every handler runs behind [`crate::auth::require_user`].

use axum::extract::State;
use axum::Extension;
use orchestrator::{
    organized, CreatedPrompt, LlmRequest, ModelResult, OptPromptRequest, OptimizedPromptResult,
    PromptSummary, SideBarPromptDetail, SideBarPromptSummary, UserContext,
};
use serde::Deserialize;

use crate::error::Result;
use crate::extract::{Json, Path, Query};
use crate::state::AppState;

/// `?promptId=` query parameter.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptIdQuery {
    pub prompt_id: i64,
}

/// List sidebar entries for the caller.
pub async fn sidebar_list(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<SideBarPromptSummary>>> {
    Ok(Json(state.service.sidebar_list(&user).await?))
}

/// Sidebar detail of one prompt.
pub async fn sidebar_details(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Query(query): Query<PromptIdQuery>,
) -> Result<Json<SideBarPromptDetail>> {
    Ok(Json(state.service.sidebar_details(&user, query.prompt_id).await?))
}

/// Optimize a question and store it.
pub async fn create_best_prompt(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Json(request): Json<OptPromptRequest>,
) -> Result<Json<CreatedPrompt>> {
    Ok(Json(state.service.create_best_prompt(&user, request).await?))
}

/// Ask several models and store their answers as a new round.
pub async fn organized_answers(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Query(query): Query<PromptIdQuery>,
    Json(request): Json<LlmRequest>,
) -> Result<Json<Vec<ModelResult>>> {
    let results = state
        .service
        .organized_answers(&user, query.prompt_id, request)
        .await?;
    Ok(Json(organized(&results)))
}

pub async fn optimized_prompt_list(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<PromptSummary>>> {
    Ok(Json(state.service.optimized_prompt_list(&user).await?))
}

pub async fn crosscheck_list(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
) -> Result<Json<Vec<PromptSummary>>> {
    Ok(Json(state.service.crosscheck_list(&user).await?))
}

/// Full detail of one prompt with every stored round.
pub async fn prompt_detail(
    State(state): State<AppState>,
    Extension(user): Extension<UserContext>,
    Path(prompt_id): Path<i64>,
) -> Result<Json<OptimizedPromptResult>> {
    Ok(Json(state.service.prompt_detail(&user, prompt_id).await?))
}
