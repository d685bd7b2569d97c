use axum::http::StatusCode;
use tracing::debug;

use super::mapping::MappingTable;
use crate::errors::{ErrorEnvelope, Failure};

/// A failure resolved against a mapping table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFailure {
    envelope: ErrorEnvelope,
    status: StatusCode,
    matched: Option<usize>,
}

impl ClassifiedFailure {
    pub(crate) fn new(envelope: ErrorEnvelope, status: StatusCode, matched: Option<usize>) -> Self {
        Self {
            envelope,
            status,
            matched,
        }
    }

    pub fn envelope(&self) -> &ErrorEnvelope {
        &self.envelope
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Index of the table entry that decided the status, `None` when the
    /// fallback was used.
    pub fn matched(&self) -> Option<usize> {
        self.matched
    }

    pub fn is_classified(&self) -> bool {
        self.matched.is_some()
    }

    pub fn into_parts(self) -> (StatusCode, ErrorEnvelope) {
        (self.status, self.envelope)
    }
}

/// Resolve `failure` against `table`.
///
/// The first entry whose declared kind is the failure's kind or one of its
/// ancestors decides the status; later entries are not consulted. With no
/// covering entry the table's fallback applies. The envelope always
/// describes `failure` itself.
pub fn classify<F: Failure + ?Sized>(failure: &F, table: &MappingTable) -> ClassifiedFailure {
    let thrown = failure.kind();
    let envelope = ErrorEnvelope::from_failure(failure);

    match table.first_match(&thrown) {
        Some((index, entry)) => {
            debug!(
                error_kind = %thrown,
                declared_kind = %entry.kind,
                entry = index,
                status = entry.status.as_u16(),
                "Failure classified"
            );
            ClassifiedFailure::new(envelope, entry.status, Some(index))
        }
        None => {
            debug!(
                error_kind = %thrown,
                entries = table.len(),
                status = table.fallback().as_u16(),
                "No mapping for failure, using fallback status"
            );
            ClassifiedFailure::new(envelope, table.fallback(), None)
        }
    }
}
