use std::fmt;

/// A named error kind with an optional parent.
///
/// Kinds form an explicit "derives-from" tree: a kind is a specialization of
/// its parent and, transitively, of every ancestor up to its root. Kinds are
/// usually declared as `const` items so the whole tree is built at compile
/// time:
///
/// ```
/// use safe_wrap::errors::{kinds, ErrorKind};
///
/// const QUOTA: ErrorKind = ErrorKind::derived("Quota", &kinds::RATE_LIMITED);
///
/// assert!(QUOTA.is_a(&kinds::INVALID_OPERATION));
/// assert!(!kinds::INVALID_OPERATION.is_a(&QUOTA));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ErrorKind {
    name: &'static str,
    parent: Option<&'static ErrorKind>,
}

impl ErrorKind {
    /// A kind with no parent
    pub const fn root(name: &'static str) -> Self {
        Self { name, parent: None }
    }

    /// A kind that specializes `parent`
    pub const fn derived(name: &'static str, parent: &'static ErrorKind) -> Self {
        Self {
            name,
            parent: Some(parent),
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static ErrorKind> {
        self.parent
    }

    /// Whether this kind is `other` itself or derives from it.
    pub fn is_a(&self, other: &ErrorKind) -> bool {
        self.lineage().any(|kind| kind == *other)
    }

    /// This kind followed by each of its ancestors, nearest first.
    pub fn lineage(&self) -> Lineage {
        Lineage { next: Some(*self) }
    }

    /// Number of ancestors between this kind and its root.
    pub fn depth(&self) -> usize {
        self.lineage().count() - 1
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// Iterator over a kind and its ancestors.
#[derive(Debug, Clone)]
pub struct Lineage {
    next: Option<ErrorKind>,
}

impl Iterator for Lineage {
    type Item = ErrorKind;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.parent.copied();
        Some(current)
    }
}

// Standard catalogue. Everything derives from ERROR so a single mapping of
// ERROR acts as a catch-all.

pub const ERROR: ErrorKind = ErrorKind::root("Error");

pub const ARGUMENT: ErrorKind = ErrorKind::derived("Argument", &ERROR);
pub const ARGUMENT_NULL: ErrorKind = ErrorKind::derived("ArgumentNull", &ARGUMENT);
pub const ARGUMENT_OUT_OF_RANGE: ErrorKind = ErrorKind::derived("ArgumentOutOfRange", &ARGUMENT);

pub const INVALID_OPERATION: ErrorKind = ErrorKind::derived("InvalidOperation", &ERROR);
pub const RATE_LIMITED: ErrorKind = ErrorKind::derived("RateLimited", &INVALID_OPERATION);
pub const OBJECT_DISPOSED: ErrorKind = ErrorKind::derived("ObjectDisposed", &INVALID_OPERATION);

pub const TIMEOUT: ErrorKind = ErrorKind::derived("Timeout", &ERROR);

pub const OPERATION_CANCELED: ErrorKind = ErrorKind::derived("OperationCanceled", &ERROR);
pub const TASK_CANCELED: ErrorKind = ErrorKind::derived("TaskCanceled", &OPERATION_CANCELED);

pub const NOT_FOUND: ErrorKind = ErrorKind::derived("NotFound", &ERROR);
pub const NOT_SUPPORTED: ErrorKind = ErrorKind::derived("NotSupported", &ERROR);
pub const UNAUTHORIZED: ErrorKind = ErrorKind::derived("Unauthorized", &ERROR);
pub const IO: ErrorKind = ErrorKind::derived("Io", &ERROR);

/// Reported for work functions that panic instead of returning an error.
pub const PANIC: ErrorKind = ErrorKind::derived("Panic", &ERROR);
