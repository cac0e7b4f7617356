//! # Request Orchestrator
//!
//! Application service implementing `MutationApi`.
//!
//! Per request, in order:
//! 1. Authenticate the submitted content block (submitter identity, then
//!    block signature).
//! 2. Authorize the submitter against the referenced inode's allow-list.
//! 3. Finalize: timestamp and sign with the target store's key.
//! 4. Dispatch the ledger block to the target store.
//!
//! Steps 1 and 2 are skipped, and step 3 does not sign, when crypto is
//! disabled. Any rejection in steps 1-2 answers `success: false` with no
//! store write.

use crate::adapters::time::SystemTimeSource;
use crate::domain::acl::is_authorized;
use crate::domain::entities::{MiddlewareConfig, MutationKind, SigningKeys, StoreKind, StoreOperation};
use crate::domain::errors::{MiddlewareError, RejectionReason};
use crate::domain::finalizer::BlockFinalizer;
use crate::domain::pipeline::{PipelineStage, RequestPipeline};
use crate::ports::inbound::MutationApi;
use crate::ports::outbound::{bounded_call, BlockStoreClient, TimeSource};
use async_trait::async_trait;
use dcfs_crypto::validate_content_block;
use dcfs_types::{BlockHash, ContentBlock, LedgerBlock, MutationResponse, PutResponse};
use std::sync::Arc;
use tracing::{error, info, info_span, warn, Instrument};

/// The trust-enforcing middleware.
///
/// Holds no per-request state; any number of requests may run through one
/// instance concurrently.
pub struct MiddlewareService<I: BlockStoreClient, D: BlockStoreClient> {
    inode_store: I,
    data_store: D,
    keys: SigningKeys,
    config: MiddlewareConfig,
    finalizer: BlockFinalizer,
}

impl<I: BlockStoreClient, D: BlockStoreClient> MiddlewareService<I, D> {
    /// Service stamping blocks with the system clock.
    pub fn new(inode_store: I, data_store: D, keys: SigningKeys, config: MiddlewareConfig) -> Self {
        Self::with_time_source(
            inode_store,
            data_store,
            keys,
            config,
            Arc::new(SystemTimeSource::new()),
        )
    }

    pub fn with_time_source(
        inode_store: I,
        data_store: D,
        keys: SigningKeys,
        config: MiddlewareConfig,
        clock: Arc<dyn TimeSource>,
    ) -> Self {
        if !config.enable_crypto {
            warn!("crypto disabled: mutations are neither authenticated nor authorized");
        }
        let finalizer = BlockFinalizer::new(clock, config.enable_crypto);
        Self {
            inode_store,
            data_store,
            keys,
            config,
            finalizer,
        }
    }

    pub fn config(&self) -> &MiddlewareConfig {
        &self.config
    }

    async fn mutate(
        &self,
        kind: MutationKind,
        block: ContentBlock,
        referenced: BlockHash,
    ) -> Result<MutationResponse, MiddlewareError> {
        let span = info_span!("mutation", operation = %kind, referenced = %referenced);
        async move {
            let result = self.run_pipeline(kind, block, &referenced).await;
            if let Err(e) = &result {
                error!(error = %e, "mutation failed");
            }
            result
        }
        .instrument(span)
        .await
    }

    async fn run_pipeline(
        &self,
        kind: MutationKind,
        block: ContentBlock,
        referenced: &BlockHash,
    ) -> Result<MutationResponse, MiddlewareError> {
        let mut pipeline = RequestPipeline::new(kind);

        if self.config.enable_crypto && !validate_content_block(&block)? {
            return pipeline.reject(RejectionReason::AuthenticationFailure);
        }
        pipeline.advance(PipelineStage::SignatureChecked)?;

        if self.config.enable_crypto
            && !is_authorized(
                &block.updated_by,
                referenced,
                &self.inode_store,
                self.config.store_timeout,
            )
            .await?
        {
            return pipeline.reject(RejectionReason::AuthorizationFailure);
        }
        pipeline.advance(PipelineStage::AclChecked)?;

        let store = kind.target_store();
        let ledger = self.finalizer.finalize(block, self.keys.for_store(store))?;
        pipeline.advance(PipelineStage::Finalized)?;

        let outcome = self.dispatch(store, ledger.clone()).await?;
        pipeline.advance(PipelineStage::Dispatched)?;

        if !outcome.success {
            pipeline.advance(PipelineStage::Rejected)?;
            warn!(hash = %outcome.hash, reason = %RejectionReason::NotPersisted, "block not persisted");
            return Ok(MutationResponse::not_persisted(outcome.hash));
        }

        pipeline.advance(PipelineStage::Succeeded)?;
        info!(hash = %outcome.hash, %store, "block persisted");
        Ok(MutationResponse::accepted(outcome.hash, ledger))
    }

    async fn dispatch(&self, store: StoreKind, block: LedgerBlock) -> Result<PutResponse, MiddlewareError> {
        let timeout = self.config.store_timeout;
        match store {
            StoreKind::Inode => {
                bounded_call(store, StoreOperation::Put, timeout, self.inode_store.put(block)).await
            }
            StoreKind::Data => {
                bounded_call(store, StoreOperation::Put, timeout, self.data_store.put(block)).await
            }
        }
    }
}

#[async_trait]
impl<I: BlockStoreClient, D: BlockStoreClient> MutationApi for MiddlewareService<I, D> {
    async fn mutate_inode(&self, block: ContentBlock) -> Result<MutationResponse, MiddlewareError> {
        let referenced = block.prev_hash.clone();
        self.mutate(MutationKind::Inode, block, referenced).await
    }

    async fn mutate_data(
        &self,
        block: ContentBlock,
        inode_hash: BlockHash,
    ) -> Result<MutationResponse, MiddlewareError> {
        self.mutate(MutationKind::Data, block, inode_hash).await
    }
}
