//! # Mock Clients
//!
//! Utilities for testing code that *uses* a [`ResourceClient`] without running a
//! real [`ResourceActor`](crate::ResourceActor).
//!
//! ## When to use Mocks vs Real Actors
//!
//! | Feature | MockClient | Real Actor |
//! |---------|------------|------------|
//! | **State** | None, scripted responses | Real store, real repository |
//! | **Use Case** | Logic *around* the client | The entity itself or the full system |
//! | **Error Injection** | Easy (`return_err`) | Needs a failing repository or bad state |
//!
//! ## Two styles
//!
//! - **Fluent**: [`MockClient`] queues expectations (`expect_get(id).return_ok(..)`)
//!   and answers requests in order. [`MockClient::verify`] fails the test if a
//!   request arrived out of order, hit the wrong key, or an expectation was left unused.
//! - **Manual**: [`create_mock_client`] hands back the raw receiver, and the
//!   `expect_*` helpers pull the next request off it so the test can assert on
//!   the payload and answer through the responder.
//!
//! ```rust
//! use record_actor::mock::MockClient;
//! use record_actor::{ActorEntity, FrameworkError};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Item { id: u32 }
//! #[derive(Debug)] struct ItemCreate;
//! #[derive(Debug)] struct ItemUpdate;
//! #[derive(Debug)] enum ItemAction {}
//! #[derive(Debug, thiserror::Error)] #[error("item error")] struct ItemError;
//!
//! #[async_trait]
//! impl ActorEntity for Item {
//!     type Id = u32; type Create = ItemCreate; type Update = ItemUpdate;
//!     type Action = ItemAction; type ActionResult = (); type Context = (); type Error = ItemError;
//!     fn id(&self) -> &u32 { &self.id }
//!     fn next_id<'a>(existing: impl Iterator<Item = &'a u32>) -> u32 {
//!         existing.max().map_or(1, |max| max + 1)
//!     }
//!     fn from_create_params(id: u32, _: ItemCreate) -> Result<Self, ItemError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: ItemUpdate, _: &()) -> Result<(), ItemError> { Ok(()) }
//!     async fn handle_action(&mut self, _: ItemAction, _: &()) -> Result<(), ItemError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockClient::<Item>::new();
//!     mock.expect_get(1).return_err(FrameworkError::ActorClosed);
//!
//!     let result = mock.client().get(1).await;
//!     assert!(matches!(result, Err(FrameworkError::ActorClosed)));
//!     mock.verify();
//! }
//! ```

use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::{ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request together with the response to send back.
enum Expectation<T: ActorEntity> {
    Create {
        id: Option<T::Id>,
        response: Result<T::Id, FrameworkError>,
    },
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Update {
        id: T::Id,
        response: Result<T, FrameworkError>,
    },
    Delete {
        id: T::Id,
        response: Result<(), FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

fn answer<R>(
    respond_to: Response<R>,
    response: Result<R, FrameworkError>,
    expected: String,
    actual: String,
    failures: &Mutex<Vec<String>>,
) {
    if expected != actual {
        failures
            .lock()
            .unwrap()
            .push(format!("expected {expected}, got {actual}"));
    }
    let _ = respond_to.send(response);
}

fn describe<T: ActorEntity>(request: &ResourceRequest<T>) -> String {
    match request {
        ResourceRequest::Create { id, .. } => format!("create {id:?}"),
        ResourceRequest::Get { id, .. } => format!("get {id}"),
        ResourceRequest::List { .. } => "list".to_string(),
        ResourceRequest::Update { id, .. } => format!("update {id}"),
        ResourceRequest::Delete { id, .. } => format!("delete {id}"),
        ResourceRequest::Action { id, .. } => format!("action on {id}"),
    }
}

/// A mock client with an ordered queue of expectations.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Product>::new();
/// mock.expect_get(ProductId::from("001")).return_ok(Some(product));
/// mock.expect_action(ProductId::from("001")).return_ok(ProductActionResult::Reduce(4));
///
/// let client = ProductClient::new(mock.client());
/// // Use client in tests...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    expectations: Queue<T>,
    failures: Arc<Mutex<Vec<String>>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ActorEntity> MockClient<T> {
    /// Creates a new mock client with no expectations.
    ///
    /// Must be called inside a Tokio runtime; a background task answers requests.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let failures = Arc::new(Mutex::new(Vec::new()));
        let queue = expectations.clone();
        let failed = failures.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        ResourceRequest::Create { id, respond_to, .. },
                        Some(Expectation::Create { id: expected, response }),
                    ) => answer(
                        respond_to,
                        response,
                        format!("create {expected:?}"),
                        format!("create {id:?}"),
                        &failed,
                    ),
                    (
                        ResourceRequest::Get { id, respond_to },
                        Some(Expectation::Get { id: expected, response }),
                    ) => answer(
                        respond_to,
                        response,
                        format!("get {expected}"),
                        format!("get {id}"),
                        &failed,
                    ),
                    (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
                        let _ = respond_to.send(response);
                    }
                    (
                        ResourceRequest::Update { id, respond_to, .. },
                        Some(Expectation::Update { id: expected, response }),
                    ) => answer(
                        respond_to,
                        response,
                        format!("update {expected}"),
                        format!("update {id}"),
                        &failed,
                    ),
                    (
                        ResourceRequest::Delete { id, respond_to },
                        Some(Expectation::Delete { id: expected, response }),
                    ) => answer(
                        respond_to,
                        response,
                        format!("delete {expected}"),
                        format!("delete {id}"),
                        &failed,
                    ),
                    (
                        ResourceRequest::Action { id, respond_to, .. },
                        Some(Expectation::Action { id: expected, response }),
                    ) => answer(
                        respond_to,
                        response,
                        format!("action on {expected}"),
                        format!("action on {id}"),
                        &failed,
                    ),
                    (request, _) => {
                        // Dropping the responder makes the caller see ActorDropped.
                        failed
                            .lock()
                            .unwrap()
                            .push(format!("unexpected request: {}", describe(&request)));
                    }
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            expectations,
            failures,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    fn push(&self, expectation: Expectation<T>) {
        self.expectations.lock().unwrap().push_back(expectation);
    }

    /// Expects a `create` with a generated key.
    pub fn expect_create(&mut self) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, |response| Expectation::Create { id: None, response })
    }

    /// Expects a `create_with_id` for `id`.
    pub fn expect_create_with_id(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::Id> {
        ExpectationBuilder::new(self, move |response| Expectation::Create {
            id: Some(id),
            response,
        })
    }

    /// Expects a `get` operation.
    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, Option<T>> {
        ExpectationBuilder::new(self, move |response| Expectation::Get { id, response })
    }

    /// Expects a `list` operation.
    pub fn expect_list(&mut self) -> ExpectationBuilder<'_, T, Vec<T>> {
        ExpectationBuilder::new(self, |response| Expectation::List { response })
    }

    /// Expects an `update` operation.
    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T> {
        ExpectationBuilder::new(self, move |response| Expectation::Update { id, response })
    }

    /// Expects a `delete` operation.
    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, ()> {
        ExpectationBuilder::new(self, move |response| Expectation::Delete { id, response })
    }

    /// Expects an `action` operation.
    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<'_, T, T::ActionResult> {
        ExpectationBuilder::new(self, move |response| Expectation::Action { id, response })
    }

    /// Verifies that every expectation was used, in order, with the expected key.
    pub fn verify(&self) {
        let failures = self.failures.lock().unwrap();
        if !failures.is_empty() {
            panic!("Mock expectations violated: {}", failures.join("; "));
        }
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {} remaining", remaining);
        }
    }
}

/// Builder that completes an expectation with the response to return.
pub struct ExpectationBuilder<'m, T: ActorEntity, R> {
    mock: &'m MockClient<T>,
    build: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'm>,
}

impl<'m, T: ActorEntity, R> ExpectationBuilder<'m, T, R> {
    fn new(
        mock: &'m MockClient<T>,
        build: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + 'm,
    ) -> Self {
        Self {
            mock,
            build: Box::new(build),
        }
    }

    /// Sets the expectation to return a successful result.
    pub fn return_ok(self, value: R) {
        self.mock.push((self.build)(Ok(value)));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: FrameworkError) {
        self.mock.push((self.build)(Err(error)));
    }
}

// =============================================================================
// MANUAL HELPERS
// =============================================================================

/// Creates a client and the receiver its requests arrive on.
///
/// The test plays the actor: it pulls requests off `receiver` (usually with the
/// `expect_*` helpers below), asserts on them and answers through the responder.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Create request.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(Option<T::Id>, T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create {
            id,
            params,
            respond_to,
        }) => Some((id, params, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Get request.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a List request.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an Update request.
pub async fn expect_update<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Update, Response<T>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Update {
            id,
            update,
            respond_to,
        }) => Some((id, update, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is an Action request.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action {
            id,
            action,
            respond_to,
        }) => Some((id, action, respond_to)),
        _ => None,
    }
}
