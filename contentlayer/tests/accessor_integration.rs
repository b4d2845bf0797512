//! Integration tests for the content accessor.
//!
//! These tests drive the public API with a scripted transport and verify:
//! - cache hits, coalescing and retry after failure through `get`
//! - the `list` pass-through
//! - the exact request shape sent to the transport
//!
//! Run with: `cargo test --test accessor_integration`

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde_json::{json, Value};
use tokio::sync::Notify;

use contentlayer::cache::BoxFuture;
use contentlayer::transport::Verb;
use contentlayer::{ContentAccessor, ContentError, QueryParams, Transport, TransportError};

// ============================================================================
// Scripted Transport
// ============================================================================

/// One observed transport call.
#[derive(Debug, Clone, PartialEq)]
struct Call {
    path: String,
    id: Option<String>,
    params: Option<QueryParams>,
}

/// Transport that answers from a queue of scripted results.
///
/// When the queue is empty it echoes the call. An optional gate holds every
/// response until released.
#[derive(Default)]
struct ScriptedTransport {
    script: Mutex<VecDeque<Result<Value, TransportError>>>,
    calls: Mutex<Vec<Call>>,
    count: AtomicUsize,
    gate: Option<Arc<Notify>>,
}

impl ScriptedTransport {
    fn new() -> Self {
        Self::default()
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    fn then(self, result: Result<Value, TransportError>) -> Self {
        self.script.lock().unwrap().push_back(result);
        self
    }

    fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for ScriptedTransport {
    fn request<'a>(
        &'a self,
        verb: Verb,
        path: &'a str,
        id: Option<&'a str>,
        params: Option<&'a QueryParams>,
    ) -> BoxFuture<'a, Result<Value, TransportError>> {
        assert_eq!(verb, Verb::Get);
        let call = Call {
            path: path.to_string(),
            id: id.map(str::to_string),
            params: params.cloned(),
        };
        self.count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().unwrap().push(call.clone());
        let scripted = self.script.lock().unwrap().pop_front();

        Box::pin(async move {
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            scripted.unwrap_or_else(|| Ok(json!({ "path": call.path, "id": call.id })))
        })
    }
}

fn query(value: Value) -> QueryParams {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

fn bad_gateway() -> TransportError {
    TransportError::Status {
        status: 502,
        url: "http://cms.local/content/article/1".to_string(),
    }
}

// ============================================================================
// Integration Tests
// ============================================================================

/// A second get for the same entity is answered from the cache.
#[tokio::test]
async fn test_cache_hit_avoids_fetch() {
    let transport = Arc::new(ScriptedTransport::new().then(Ok(json!({ "title": "Hello" }))));
    let accessor = ContentAccessor::new(transport.clone(), false);

    let first = accessor.get("article", "1", None).await.unwrap();
    let second = accessor.get("article", "1", None).await.unwrap();

    assert_eq!(first, json!({ "title": "Hello" }));
    assert_eq!(second, first);
    assert_eq!(transport.count(), 1);
}

/// Concurrent gets from separate tasks share one transport call.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_gets_coalesce_across_tasks() {
    let gate = Arc::new(Notify::new());
    let transport = Arc::new(
        ScriptedTransport::gated(Arc::clone(&gate)).then(Ok(json!({ "title": "Shared" }))),
    );
    let accessor = Arc::new(ContentAccessor::new(transport.clone(), false));

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let accessor = Arc::clone(&accessor);
            tokio::spawn(async move { accessor.get("article", "9", None).await })
        })
        .collect();

    // Wait until every task is attached to the single in-flight load.
    while accessor.cache_stats().misses + accessor.cache_stats().coalesced < 10 {
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    gate.notify_one();

    for task in tasks {
        assert_eq!(task.await.unwrap().unwrap(), json!({ "title": "Shared" }));
    }
    assert_eq!(transport.count(), 1);

    let stats = accessor.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.coalesced, 9);
}

/// A failed get leaves nothing cached; the next get fetches again.
#[tokio::test]
async fn test_failure_is_not_cached() {
    let transport = Arc::new(
        ScriptedTransport::new()
            .then(Err(bad_gateway()))
            .then(Ok(json!({ "title": "Recovered" }))),
    );
    let accessor = ContentAccessor::new(transport.clone(), false);

    let err = accessor.get("article", "1", None).await.unwrap_err();
    assert_eq!(err, ContentError::Transport(bad_gateway()));

    let value = accessor.get("article", "1", None).await.unwrap();
    assert_eq!(value, json!({ "title": "Recovered" }));
    assert_eq!(transport.count(), 2);

    // Now cached.
    accessor.get("article", "1", None).await.unwrap();
    assert_eq!(transport.count(), 2);
}

/// Every caller waiting on a failed load receives the failure.
#[tokio::test]
async fn test_failure_reaches_all_waiters() {
    let gate = Arc::new(Notify::new());
    let transport =
        Arc::new(ScriptedTransport::gated(Arc::clone(&gate)).then(Err(bad_gateway())));
    let accessor = ContentAccessor::new(transport.clone(), false);

    let gets = futures::future::join_all((0..5).map(|_| accessor.get("article", "1", None)));
    let release = async {
        tokio::task::yield_now().await;
        gate.notify_one();
    };
    let (results, ()) = tokio::join!(gets, release);

    assert_eq!(transport.count(), 1);
    for result in results {
        assert_eq!(result, Err(ContentError::Transport(bad_gateway())));
    }
    assert_eq!(accessor.cache_stats().entries, 0);
}

/// Same id under different types never shares an entry.
#[tokio::test]
async fn test_key_isolation_between_types() {
    let transport = Arc::new(ScriptedTransport::new());
    let accessor = ContentAccessor::new(transport.clone(), false);

    let article = accessor.get("article", "1", None).await.unwrap();
    let page = accessor.get("page", "1", None).await.unwrap();

    assert_eq!(article["path"], "/content/article");
    assert_eq!(page["path"], "/content/page");
    assert_eq!(transport.count(), 2);
}

/// List always reaches the transport, with the query untouched.
#[tokio::test]
async fn test_list_bypasses_cache() {
    let transport = Arc::new(ScriptedTransport::new());
    let accessor = ContentAccessor::new(transport.clone(), true);
    let q = query(json!({ "limit": 5 }));

    accessor.list("article", Some(&q)).await.unwrap();
    accessor.list("article", Some(&q)).await.unwrap();

    assert_eq!(transport.count(), 2);
    for call in transport.calls() {
        assert_eq!(
            call,
            Call {
                path: "/content/article".to_string(),
                id: None,
                params: Some(q.clone()),
            }
        );
    }
}

/// Preview flag is merged into get queries; caller fields are kept.
#[tokio::test]
async fn test_preview_flag_propagation() {
    let transport = Arc::new(ScriptedTransport::new());
    let accessor = ContentAccessor::new(transport.clone(), true);
    let q = query(json!({ "status": "draft" }));

    accessor.get("article", "42", Some(&q)).await.unwrap();

    assert_eq!(
        transport.calls(),
        vec![Call {
            path: "/content/article".to_string(),
            id: Some("42".to_string()),
            params: Some(query(json!({ "$preview": true, "status": "draft" }))),
        }]
    );
}

/// A caller-supplied `$preview` overrides the configured flag.
#[tokio::test]
async fn test_caller_preview_overrides_config() {
    let transport = Arc::new(ScriptedTransport::new());
    let accessor = ContentAccessor::new(transport.clone(), true);
    let q = query(json!({ "$preview": false }));

    accessor.get("page", "home", Some(&q)).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls[0].params, Some(query(json!({ "$preview": false }))));
}

/// Separate accessors keep separate caches.
#[tokio::test]
async fn test_accessors_do_not_share_cache() {
    let transport = Arc::new(ScriptedTransport::new());
    let first = ContentAccessor::new(transport.clone(), false);
    let second = ContentAccessor::new(transport.clone(), false);

    first.get("article", "1", None).await.unwrap();
    second.get("article", "1", None).await.unwrap();

    assert_eq!(transport.count(), 2);
}
