use axum::http::StatusCode;

use crate::errors::ErrorKind;

/// Status used when no mapping entry matches a failure
pub const DEFAULT_FALLBACK: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// One (declared kind, status) pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingEntry {
    pub kind: ErrorKind,
    pub status: StatusCode,
}

impl MappingEntry {
    pub fn new(kind: ErrorKind, status: StatusCode) -> Self {
        Self { kind, status }
    }

    /// Whether a failure of `thrown` kind is covered by this entry.
    pub fn covers(&self, thrown: &ErrorKind) -> bool {
        thrown.is_a(&self.kind)
    }
}

/// Ordered mapping of error kinds to status codes.
///
/// Order is precedence: the first covering entry wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
    fallback: StatusCode,
}

impl MappingTable {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            fallback: DEFAULT_FALLBACK,
        }
    }

    /// Append an entry after every existing one.
    pub fn map(mut self, kind: ErrorKind, status: StatusCode) -> Self {
        self.entries.push(MappingEntry::new(kind, status));
        self
    }

    /// Status used for failures no entry covers.
    pub fn with_fallback(mut self, status: StatusCode) -> Self {
        self.fallback = status;
        self
    }

    pub fn fallback(&self) -> StatusCode {
        self.fallback
    }

    pub fn entries(&self) -> &[MappingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index and entry of the first entry covering `thrown`.
    pub fn first_match(&self, thrown: &ErrorKind) -> Option<(usize, &MappingEntry)> {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| entry.covers(thrown))
    }
}

impl Default for MappingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(ErrorKind, StatusCode)> for MappingTable {
    fn from_iter<I: IntoIterator<Item = (ErrorKind, StatusCode)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |table, (kind, status)| table.map(kind, status))
    }
}

impl<const N: usize> From<[(ErrorKind, StatusCode); N]> for MappingTable {
    fn from(pairs: [(ErrorKind, StatusCode); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl From<Vec<(ErrorKind, StatusCode)>> for MappingTable {
    fn from(pairs: Vec<(ErrorKind, StatusCode)>) -> Self {
        pairs.into_iter().collect()
    }
}
