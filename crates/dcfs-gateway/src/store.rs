//! HTTP face of the in-memory development block store.
//!
//! - `POST /put` `{"block": LedgerBlock}` → `{"success", "hash"}`
//! - `GET /blocks/:hash` → `{"block": LedgerBlock}` or 404
//! - `GET /leafs` → `{"leafIds": [...]}`

use crate::domain::config::GatewayConfig;
use crate::domain::error::{ApiError, ApiResult};
use crate::middleware::apply_stack;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use dcfs_middleware::InMemoryBlockStore;
use dcfs_types::{BlockHash, GetResponse, LeafsResponse, PutRequest, PutResponse};
use std::sync::Arc;
use tracing::{error, info};

/// Router serving `store`.
pub fn store_router(store: Arc<InMemoryBlockStore>, config: &GatewayConfig) -> Router {
    let router = Router::new()
        .route("/put", post(put_block))
        .route("/blocks/:hash", get(get_block))
        .route("/leafs", get(get_leafs))
        .with_state(store);

    apply_stack(router, config)
}

async fn put_block(
    State(store): State<Arc<InMemoryBlockStore>>,
    payload: Result<Json<PutRequest>, JsonRejection>,
) -> ApiResult<Json<PutResponse>> {
    let Json(request) = payload?;
    let response = store.insert(request.block).map_err(|e| {
        error!(error = %e, "cannot hash block");
        ApiError::internal()
    })?;
    info!(hash = %response.hash, stored = response.success, "put");
    Ok(Json(response))
}

async fn get_block(
    State(store): State<Arc<InMemoryBlockStore>>,
    Path(hash): Path<String>,
) -> ApiResult<Json<GetResponse>> {
    let hash = BlockHash::from(hash);
    store
        .block(&hash)
        .map(|block| Json(GetResponse { block }))
        .ok_or_else(|| ApiError::not_found(hash.as_str()))
}

async fn get_leafs(State(store): State<Arc<InMemoryBlockStore>>) -> Json<LeafsResponse> {
    Json(LeafsResponse {
        leaf_ids: store.leafs(),
    })
}
