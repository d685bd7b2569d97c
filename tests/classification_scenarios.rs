use axum::http::StatusCode;
use axum::response::Response;
use serde_json::{json, Value};
use std::time::Duration;

use safe_wrap::{kinds, ErrorKind, Fault, MappingTable, Outcome, SafeWrap};

const TIMEOUT_KIND: ErrorKind = ErrorKind::root("TimeoutKind");
const ARGUMENT_KIND: ErrorKind = ErrorKind::root("ArgumentKind");
const BASE_KIND: ErrorKind = ErrorKind::root("BaseKind");
const DERIVED_KIND: ErrorKind = ErrorKind::derived("DerivedKind", &BASE_KIND);
const LEAF_KIND: ErrorKind = ErrorKind::derived("LeafKind", &DERIVED_KIND);

async fn into_parts(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_argument_failure_skips_earlier_unrelated_entry() {
    let table = MappingTable::from([
        (TIMEOUT_KIND, StatusCode::REQUEST_TIMEOUT),
        (ARGUMENT_KIND, StatusCode::BAD_REQUEST),
    ]);

    let response = SafeWrap::<String>::new()
        .execute(|| Err(Fault::new(ARGUMENT_KIND, "bad value")), &table);
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({ "message": "bad value", "errorKind": "ArgumentKind" })
    );
}

#[tokio::test]
async fn test_empty_table_uses_internal_error() {
    let response = SafeWrap::<String>::new().execute(
        || Err(Fault::new(kinds::NOT_SUPPORTED, "not here")),
        &MappingTable::new(),
    );
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body,
        json!({ "message": "not here", "errorKind": "NotSupported" })
    );
}

#[tokio::test]
async fn test_success_returns_items_in_order() {
    let items = vec!["a", "b", "c", "d", "e"];
    let expected = items.clone();

    let response = SafeWrap::new().execute(
        move || Ok::<_, Fault>(items),
        &MappingTable::from([(kinds::ERROR, StatusCode::BAD_REQUEST)]),
    );
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!(expected));
}

#[tokio::test]
async fn test_ancestor_entry_matches_derived_failure() {
    let table = MappingTable::from([(BASE_KIND, StatusCode::BAD_REQUEST)]);

    let response = SafeWrap::<()>::new()
        .execute(|| Err(Fault::new(LEAF_KIND, "too specific")), &table);
    let (status, body) = into_parts(response).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorKind"], "LeafKind");
}

#[test]
fn test_table_order_decides_between_overlapping_entries() {
    let general_first = MappingTable::from([
        (BASE_KIND, StatusCode::CONFLICT),
        (DERIVED_KIND, StatusCode::BAD_REQUEST),
    ]);
    let specific_first = MappingTable::from([
        (DERIVED_KIND, StatusCode::BAD_REQUEST),
        (BASE_KIND, StatusCode::CONFLICT),
    ]);

    let fail = || Err::<(), _>(Fault::new(DERIVED_KIND, "overlap"));

    assert_eq!(
        SafeWrap::capture(fail, &general_first).status(),
        StatusCode::CONFLICT
    );
    assert_eq!(
        SafeWrap::capture(fail, &specific_first).status(),
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn test_async_failure_classifies_like_sync() {
    let table = MappingTable::from([
        (TIMEOUT_KIND, StatusCode::REQUEST_TIMEOUT),
        (BASE_KIND, StatusCode::UNPROCESSABLE_ENTITY),
    ]);

    for kind in [TIMEOUT_KIND, ARGUMENT_KIND, LEAF_KIND] {
        let sync: Outcome<u8> = SafeWrap::capture(|| Err(Fault::new(kind, "failed")), &table);
        let deferred: Outcome<u8> = SafeWrap::capture_async(
            || async move {
                tokio::time::sleep(Duration::from_millis(2)).await;
                Err(Fault::new(kind, "failed"))
            },
            &table,
        )
        .await;

        assert_eq!(sync, deferred, "kind {} classified differently", kind);
    }
}

#[tokio::test]
async fn test_boxed_failures_from_mixed_sources() {
    type BoxedFailure = Box<dyn safe_wrap::Failure + Send + Sync>;

    let table = MappingTable::from([
        (kinds::NOT_FOUND, StatusCode::NOT_FOUND),
        (kinds::ARGUMENT, StatusCode::BAD_REQUEST),
    ]);

    let io_failure = SafeWrap::<()>::capture(
        || -> Result<(), BoxedFailure> {
            Err(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "config.toml missing",
            )))
        },
        &table,
    );
    assert_eq!(io_failure.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        io_failure.failure().unwrap().envelope().message,
        "config.toml missing"
    );

    let fault = SafeWrap::<()>::capture(
        || -> Result<(), BoxedFailure> { Err(Box::new(Fault::argument("negative days"))) },
        &table,
    );
    assert_eq!(fault.status(), StatusCode::BAD_REQUEST);
}
