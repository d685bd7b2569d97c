//! Run fallible work and turn its result into a response.
//!
//! ```
//! use axum::http::StatusCode;
//! use safe_wrap::errors::{kinds, Fault};
//! use safe_wrap::wrap::{MappingTable, SafeWrap};
//!
//! let table = MappingTable::from([
//!     (kinds::TIMEOUT, StatusCode::REQUEST_TIMEOUT),
//!     (kinds::ARGUMENT, StatusCode::BAD_REQUEST),
//! ]);
//!
//! let response = SafeWrap::<u32>::new()
//!     .execute(|| Err(Fault::argument("bad value")), &table);
//! assert_eq!(response.status(), StatusCode::BAD_REQUEST);
//! ```

pub mod classifier;
pub mod mapping;
pub mod outcome;

use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

use axum::response::{IntoResponse, Response};
use futures::FutureExt;
use serde::Serialize;
use tracing::warn;

use crate::errors::{kinds, ErrorEnvelope, ErrorKind, Failure};

pub use classifier::{classify, ClassifiedFailure};
pub use mapping::{MappingEntry, MappingTable, DEFAULT_FALLBACK};
pub use outcome::{Disposition, Outcome};

/// Single-use wrapper around one unit of work.
///
/// Holds nothing until an executor runs, then exactly one [`Outcome`].
/// Executors and the response conversion take the wrapper by value, so an
/// instance cannot be reused across invocations.
#[derive(Debug)]
pub struct SafeWrap<T> {
    outcome: Option<Outcome<T>>,
}

impl<T> SafeWrap<T> {
    pub fn new() -> Self {
        Self { outcome: None }
    }

    /// Run `work` immediately and keep its outcome for later conversion.
    pub fn run<F, E>(work: F, table: &MappingTable) -> Self
    where
        F: FnOnce() -> Result<T, E>,
        E: Failure,
    {
        Self {
            outcome: Some(Self::capture(work, table)),
        }
    }

    /// Async counterpart of [`SafeWrap::run`].
    pub async fn run_async<F, Fut, E>(work: F, table: &MappingTable) -> Self
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Failure,
    {
        Self {
            outcome: Some(Self::capture_async(work, table).await),
        }
    }

    /// Run `work` once and classify its error or panic, if any.
    pub fn capture<F, E>(work: F, table: &MappingTable) -> Outcome<T>
    where
        F: FnOnce() -> Result<T, E>,
        E: Failure,
    {
        settle(panic::catch_unwind(AssertUnwindSafe(work)), table)
    }

    /// Run the future produced by `work` to completion and classify any
    /// failure, including one raised after a suspension point.
    pub async fn capture_async<F, Fut, E>(work: F, table: &MappingTable) -> Outcome<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Failure,
    {
        let caught = AssertUnwindSafe(async move { work().await })
            .catch_unwind()
            .await;
        settle(caught, table)
    }

    pub fn outcome(&self) -> Option<&Outcome<T>> {
        self.outcome.as_ref()
    }

    pub fn into_outcome(self) -> Option<Outcome<T>> {
        self.outcome
    }

    pub fn is_success(&self) -> bool {
        self.outcome.as_ref().is_some_and(Outcome::is_success)
    }
}

impl<T: Serialize> SafeWrap<T> {
    /// Run `work` and build the response: 200 with the raw value, or the
    /// classified status with an [`ErrorEnvelope`].
    ///
    /// A wrapper that already holds an outcome answers with it and does not
    /// run `work`.
    pub fn execute<F, E>(self, work: F, table: &MappingTable) -> Response
    where
        F: FnOnce() -> Result<T, E>,
        E: Failure,
    {
        if self.outcome.is_some() {
            warn!("SafeWrap already holds an outcome, work was not run");
            return self.into_response();
        }
        Self::capture(work, table).into_response()
    }

    /// Async counterpart of [`SafeWrap::execute`].
    pub async fn execute_async<F, Fut, E>(self, work: F, table: &MappingTable) -> Response
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Failure,
    {
        if self.outcome.is_some() {
            warn!("SafeWrap already holds an outcome, work was not run");
            return self.into_response();
        }
        Self::capture_async(work, table).await.into_response()
    }
}

impl<T> Default for SafeWrap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Outcome<T>> for SafeWrap<T> {
    fn from(outcome: Outcome<T>) -> Self {
        Self {
            outcome: Some(outcome),
        }
    }
}

impl<T: Serialize> IntoResponse for SafeWrap<T> {
    fn into_response(self) -> Response {
        match self.outcome {
            Some(outcome) => outcome.into_response(),
            None => ErrorEnvelope::new("no outcome was recorded", kinds::ERROR).into_response(),
        }
    }
}

fn settle<T, E: Failure>(
    caught: Result<Result<T, E>, Box<dyn Any + Send>>,
    table: &MappingTable,
) -> Outcome<T> {
    match caught {
        Ok(Ok(value)) => Outcome::Success(value),
        Ok(Err(failure)) => Outcome::Failure(classify(&failure, table)),
        Err(payload) => {
            let panicked = Panicked::from_payload(payload.as_ref());
            warn!(panic_message = %panicked.message, "Work function panicked");
            Outcome::Failure(classify(&panicked, table))
        }
    }
}

/// Failure standing in for a caught panic.
#[derive(Debug)]
struct Panicked {
    message: String,
}

impl Panicked {
    fn from_payload(payload: &(dyn Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&'static str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "work function panicked".to_string()
        };
        Self { message }
    }
}

impl fmt::Display for Panicked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Failure for Panicked {
    fn kind(&self) -> ErrorKind {
        kinds::PANIC
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Fault;
    use axum::http::StatusCode;
    use std::cell::Cell;
    use std::time::Duration;

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    fn timeout_then_argument() -> MappingTable {
        MappingTable::from([
            (kinds::TIMEOUT, StatusCode::REQUEST_TIMEOUT),
            (kinds::ARGUMENT, StatusCode::BAD_REQUEST),
        ])
    }

    #[test]
    fn test_capture_success_keeps_value() {
        let outcome =
            SafeWrap::capture(|| Ok::<_, Fault>(vec![1, 2, 3, 4, 5]), &MappingTable::new());
        assert_eq!(outcome, Outcome::Success(vec![1, 2, 3, 4, 5]));
    }

    #[test]
    fn test_capture_runs_work_once() {
        let calls = Cell::new(0);
        let _ = SafeWrap::<()>::capture(
            || {
                calls.set(calls.get() + 1);
                Err(Fault::argument("nope"))
            },
            &timeout_then_argument(),
        );
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_capture_classifies_failure() {
        let outcome: Outcome<()> =
            SafeWrap::capture(|| Err(Fault::argument("bad value")), &timeout_then_argument());

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.status(), StatusCode::BAD_REQUEST);
        assert_eq!(failure.envelope().message, "bad value");
        assert_eq!(failure.envelope().error_kind, "Argument");
    }

    #[test]
    fn test_capture_catches_panic() {
        let outcome: Outcome<()> = SafeWrap::capture(
            || -> Result<(), Fault> { panic!("exploded") },
            &MappingTable::new(),
        );

        let failure = outcome.failure().unwrap();
        assert_eq!(failure.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(failure.envelope().message, "exploded");
        assert_eq!(failure.envelope().error_kind, "Panic");
    }

    #[test]
    fn test_panic_can_be_mapped_through_root_kind() {
        let table = MappingTable::from([(kinds::ERROR, StatusCode::SERVICE_UNAVAILABLE)]);
        let outcome: Outcome<()> = SafeWrap::capture(
            || -> Result<(), Fault> { panic!("{} went wrong", "something") },
            &table,
        );
        assert_eq!(outcome.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            outcome.failure().unwrap().envelope().message,
            "something went wrong"
        );
    }

    #[test]
    fn test_capture_async_from_sync_context() {
        let outcome = tokio_test::block_on(SafeWrap::capture_async(
            || async { Ok::<_, Fault>("done") },
            &MappingTable::new(),
        ));
        assert_eq!(outcome, Outcome::Success("done"));
    }

    #[tokio::test]
    async fn test_async_failure_after_suspension_matches_sync() {
        let table = timeout_then_argument();

        let sync: Outcome<()> = SafeWrap::capture(|| Err(Fault::timeout("late")), &table);
        let deferred: Outcome<()> = SafeWrap::capture_async(
            || async {
                tokio::time::sleep(Duration::from_millis(5)).await;
                Err(Fault::timeout("late"))
            },
            &table,
        )
        .await;

        assert_eq!(sync, deferred);
        assert_eq!(deferred.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_async_panic_after_suspension_is_caught() {
        let outcome: Outcome<()> = SafeWrap::capture_async(
            || async {
                tokio::task::yield_now().await;
                if true {
                    panic!("async boom");
                }
                Ok::<(), Fault>(())
            },
            &MappingTable::new(),
        )
        .await;

        assert_eq!(outcome.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(outcome.failure().unwrap().envelope().error_kind, "Panic");
    }

    #[tokio::test]
    async fn test_deadline_expiry_is_an_ordinary_failure() {
        let outcome: Outcome<()> = SafeWrap::capture_async(
            || async {
                tokio::time::timeout(
                    Duration::from_millis(1),
                    tokio::time::sleep(Duration::from_secs(5)),
                )
                .await
            },
            &timeout_then_argument(),
        )
        .await;

        assert_eq!(outcome.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(outcome.failure().unwrap().envelope().error_kind, "Timeout");
    }

    #[tokio::test]
    async fn test_execute_success_response() {
        let response =
            SafeWrap::new().execute(|| Ok::<_, Fault>(vec![1, 2, 3, 4, 5]), &MappingTable::new());

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([1, 2, 3, 4, 5]));
    }

    #[tokio::test]
    async fn test_execute_async_failure_response() {
        let response = SafeWrap::<Vec<u8>>::new()
            .execute_async(
                || async { Err(Fault::argument("bad value")) },
                &timeout_then_argument(),
            )
            .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "message": "bad value", "errorKind": "Argument" })
        );
    }

    #[tokio::test]
    async fn test_populated_wrapper_does_not_rerun_work() {
        let calls = Cell::new(0);
        let wrap = SafeWrap::run(|| Ok::<_, Fault>(7), &MappingTable::new());
        let response = wrap.execute(
            || {
                calls.set(calls.get() + 1);
                Ok::<_, Fault>(8)
            },
            &MappingTable::new(),
        );

        assert_eq!(calls.get(), 0);
        assert_eq!(body_json(response).await, serde_json::json!(7));
    }

    #[tokio::test]
    async fn test_empty_wrapper_converts_to_internal_error() {
        let response = SafeWrap::<u8>::new().into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["errorKind"], "Error");
    }

    #[tokio::test]
    async fn test_run_then_convert() {
        let wrap: SafeWrap<u8> = SafeWrap::run(
            || Err(Fault::invalid_operation("Random error")),
            &MappingTable::from([(kinds::INVALID_OPERATION, StatusCode::BAD_REQUEST)]),
        );
        assert!(!wrap.is_success());

        let response = wrap.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Random error");
    }
}
