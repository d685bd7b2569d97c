use std::fmt;

use super::kinds::{self, ErrorKind};

/// A failure value that knows its own [`ErrorKind`].
///
/// The `Display` output becomes the envelope message, so implementors should
/// render the human-readable message only.
pub trait Failure: fmt::Display {
    fn kind(&self) -> ErrorKind;

    fn message(&self) -> String {
        self.to_string()
    }
}

impl<F: Failure + ?Sized> Failure for Box<F> {
    fn kind(&self) -> ErrorKind {
        (**self).kind()
    }

    fn message(&self) -> String {
        (**self).message()
    }
}

impl<F: Failure + ?Sized> Failure for &F {
    fn kind(&self) -> ErrorKind {
        (**self).kind()
    }

    fn message(&self) -> String {
        (**self).message()
    }
}

impl Failure for std::io::Error {
    fn kind(&self) -> ErrorKind {
        match std::io::Error::kind(self) {
            std::io::ErrorKind::NotFound => kinds::NOT_FOUND,
            std::io::ErrorKind::TimedOut => kinds::TIMEOUT,
            std::io::ErrorKind::PermissionDenied => kinds::UNAUTHORIZED,
            std::io::ErrorKind::InvalidInput => kinds::ARGUMENT,
            std::io::ErrorKind::Unsupported => kinds::NOT_SUPPORTED,
            _ => kinds::IO,
        }
    }
}

impl Failure for tokio::time::error::Elapsed {
    fn kind(&self) -> ErrorKind {
        kinds::TIMEOUT
    }
}

/// Ad-hoc failure carrying an explicit kind and message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Fault {
    kind: ErrorKind,
    message: String,
}

impl Fault {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn argument(message: impl Into<String>) -> Self {
        Self::new(kinds::ARGUMENT, message)
    }

    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Self::new(kinds::INVALID_OPERATION, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(kinds::TIMEOUT, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(kinds::NOT_FOUND, message)
    }
}

impl Failure for Fault {
    fn kind(&self) -> ErrorKind {
        self.kind
    }

    fn message(&self) -> String {
        self.message.clone()
    }
}
