//! Optional visual review capability.
//!
//! A reviewer may rasterize the document and ask a vision model whether
//! the required motifs are visually present. The deterministic gate has
//! zero dependency on any model service: the trait ships with a no-op
//! default, reviewer findings only ever add warnings, and a reviewer
//! failure degrades to "no additional warnings". Implementations own
//! their timeout and cancellation; the core treats a timeout as just
//! another failure.

use thiserror::Error;

use crate::document::{DesignIntent, Document};

/// Failure of a visual review backend.
#[derive(Error, Debug)]
pub enum VisualReviewError {
    /// The backend could not be reached or refused the request.
    #[error("visual review backend unavailable: {0}")]
    Unavailable(String),

    /// The backend did not answer within its deadline.
    #[error("visual review timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The backend answered with something unusable.
    #[error("visual review response unusable: {0}")]
    BadResponse(String),
}

/// A pluggable secondary check run after the deterministic gate.
///
/// Returned strings are appended to the gate's warnings; they can never
/// raise issues or change the pass/fail verdict.
pub trait VisualReview {
    /// Review the document, returning extra warnings.
    fn review(
        &self,
        document: &Document,
        intent: &DesignIntent,
    ) -> Result<Vec<String>, VisualReviewError>;
}

/// Default reviewer: adds nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReview;

impl VisualReview for NoopReview {
    fn review(
        &self,
        _document: &Document,
        _intent: &DesignIntent,
    ) -> Result<Vec<String>, VisualReviewError> {
        Ok(Vec::new())
    }
}
