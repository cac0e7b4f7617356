//! # Request Pipeline
//!
//! Every mutation walks the same stages, strictly forward:
//!
//! ```text
//! Received -> SignatureChecked -> AclChecked -> Finalized -> Dispatched -> Succeeded
//!     \              \                                          \
//!      +--------------+------------------> Rejected <------------+
//! ```
//!
//! `Succeeded` and `Rejected` are terminal. A block never reaches
//! `Finalized` without having passed `AclChecked`.

use crate::domain::entities::MutationKind;
use crate::domain::errors::{MiddlewareError, RejectionReason};
use dcfs_types::MutationResponse;
use tracing::debug;

/// Position of a request in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelineStage {
    Received,
    SignatureChecked,
    AclChecked,
    Finalized,
    Dispatched,
    Succeeded,
    Rejected,
}

impl PipelineStage {
    pub fn is_terminal(self) -> bool {
        matches!(self, PipelineStage::Succeeded | PipelineStage::Rejected)
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_advance_to(self, next: PipelineStage) -> bool {
        use PipelineStage::*;
        match (self, next) {
            (Received, SignatureChecked)
            | (SignatureChecked, AclChecked)
            | (AclChecked, Finalized)
            | (Finalized, Dispatched)
            | (Dispatched, Succeeded) => true,
            (Received | SignatureChecked | Dispatched, Rejected) => true,
            _ => false,
        }
    }
}

/// Stage tracker for one request.
#[derive(Debug)]
pub struct RequestPipeline {
    kind: MutationKind,
    stage: PipelineStage,
}

impl RequestPipeline {
    pub fn new(kind: MutationKind) -> Self {
        Self {
            kind,
            stage: PipelineStage::Received,
        }
    }

    pub fn kind(&self) -> MutationKind {
        self.kind
    }

    pub fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Move to `next`, refusing anything but a legal forward step.
    pub fn advance(&mut self, next: PipelineStage) -> Result<(), MiddlewareError> {
        if !self.stage.can_advance_to(next) {
            return Err(MiddlewareError::Pipeline {
                from: self.stage,
                to: next,
            });
        }
        debug!(operation = %self.kind, from = ?self.stage, to = ?next, "pipeline stage");
        self.stage = next;
        Ok(())
    }

    /// Terminate with a fail-closed rejection.
    ///
    /// The reason is logged, never returned.
    pub fn reject(&mut self, reason: RejectionReason) -> Result<MutationResponse, MiddlewareError> {
        self.advance(PipelineStage::Rejected)?;
        debug!(operation = %self.kind, %reason, "request rejected");
        Ok(MutationResponse::rejected())
    }
}
