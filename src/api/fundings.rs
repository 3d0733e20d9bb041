//! Funding flow API endpoints.
//!
//! The two-step confirmation sequence: begin opens a session awaiting the
//! supporter's confirmation, confirm starts the simulated settlement,
//! cancel abandons the attempt at any point before success, dismiss closes
//! the final modal.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::flow::FlowSnapshot;
use crate::models::{BeginFundingRequest, Funding};
use crate::AppState;

/// A funding row together with its session state.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingView {
    pub funding: Funding,
    pub flow: FlowSnapshot,
}

/// POST /api/projects/:id/fundings - Begin a support attempt.
pub async fn begin_funding(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    Json(request): Json<BeginFundingRequest>,
) -> ApiResult<FundingView> {
    let supporter = request.supporter_id.as_deref().unwrap_or("anonymous");
    let funding = state
        .flow
        .begin(&project_id, request.reward_id.clone(), supporter)
        .await?;
    let flow = state.flow.snapshot(&funding.id).await?;
    success(FundingView { funding, flow })
}

/// POST /api/fundings/:id/confirm - Confirm and start settlement.
pub async fn confirm_funding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FlowSnapshot> {
    let snapshot = state.flow.confirm(&id).await?;
    success(snapshot)
}

/// POST /api/fundings/:id/cancel - Abandon the attempt; nothing is charged.
pub async fn cancel_funding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Funding> {
    let funding = state.flow.cancel(&id).await?;
    success(funding)
}

/// POST /api/fundings/:id/dismiss - Close the success (or failure) modal.
pub async fn dismiss_funding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.flow.dismiss(&id).await?;
    success(())
}

/// GET /api/fundings/:id - Funding row plus live flow state.
pub async fn get_funding(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<FundingView> {
    let funding = state
        .store
        .get_funding(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Funding {} not found", id)))?;
    let flow = state.flow.snapshot(&id).await?;
    success(FundingView { funding, flow })
}
