//! Client-facing routes.
//!
//! - `POST /v1/inode` `{"block": ContentBlock}`
//! - `POST /v1/data` `{"block": ContentBlock, "inodeHash": "..."}`
//! - `GET /health`

use crate::domain::config::GatewayConfig;
use crate::domain::error::ApiResult;
use crate::middleware::apply_stack;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use dcfs_middleware::MutationApi;
use dcfs_types::{MutateDataRequest, MutateInodeRequest, MutationResponse};
use std::sync::Arc;

type SharedApi = Arc<dyn MutationApi>;

/// Router exposing the mutation API.
pub fn mutation_router(api: SharedApi, config: &GatewayConfig) -> Router {
    let router = Router::new()
        .route("/v1/inode", post(mutate_inode))
        .route("/v1/data", post(mutate_data))
        .route("/health", get(health_check))
        .with_state(api);

    apply_stack(router, config)
}

async fn mutate_inode(
    State(api): State<SharedApi>,
    payload: Result<Json<MutateInodeRequest>, JsonRejection>,
) -> ApiResult<Json<MutationResponse>> {
    let Json(request) = payload?;
    let response = api.mutate_inode(request.block).await?;
    Ok(Json(response))
}

async fn mutate_data(
    State(api): State<SharedApi>,
    payload: Result<Json<MutateDataRequest>, JsonRejection>,
) -> ApiResult<Json<MutationResponse>> {
    let Json(request) = payload?;
    let response = api.mutate_data(request.block, request.inode_hash).await?;
    Ok(Json(response))
}

/// Health check endpoint
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "dcfs-middleware",
        "version": crate::VERSION
    }))
}
