use crate::client::ResourceClient;
use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use crate::message::ResourceRequest;
use crate::repository::Repository;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that owns a collection of records.
///
/// `ResourceActor<T>` is the *server* side of the framework. It owns the in-memory
/// store for `T: ActorEntity`, an optional [`Repository`] the store is mirrored to,
/// and the receiving end of the request channel. Requests are processed one at a
/// time inside a single Tokio task, so the store needs no locking.
///
/// # Usage Pattern
///
/// 1.  **Create**: `ResourceActor::new()` (in-memory only) or
///     `ResourceActor::with_repository()` (loads existing records first).
/// 2.  **Wire**: Pass dependencies into `actor.run(context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust
/// use record_actor::{ActorEntity, ResourceActor};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Counter { id: u32, hits: u32 }
/// #[derive(Debug)] struct CounterCreate;
/// #[derive(Debug)] struct CounterUpdate;
/// #[derive(Debug)] enum CounterAction { Hit }
/// #[derive(Debug, thiserror::Error)] #[error("counter error")] struct CounterError;
///
/// #[async_trait]
/// impl ActorEntity for Counter {
///     type Id = u32;
///     type Create = CounterCreate;
///     type Update = CounterUpdate;
///     type Action = CounterAction;
///     type ActionResult = u32;
///     type Context = ();
///     type Error = CounterError;
///
///     fn id(&self) -> &u32 { &self.id }
///     fn next_id<'a>(existing: impl Iterator<Item = &'a u32>) -> u32 {
///         existing.max().map_or(1, |max| max + 1)
///     }
///     fn from_create_params(id: u32, _: CounterCreate) -> Result<Self, CounterError> {
///         Ok(Self { id, hits: 0 })
///     }
///     async fn on_update(&mut self, _: CounterUpdate, _: &()) -> Result<(), CounterError> { Ok(()) }
///     async fn handle_action(&mut self, _: CounterAction, _: &()) -> Result<u32, CounterError> {
///         self.hits += 1;
///         Ok(self.hits)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Counter>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let id = client.create(CounterCreate).await.unwrap();
///     assert_eq!(client.perform_action(id, CounterAction::Hit).await.unwrap(), 1);
/// }
/// ```
///
/// # Persistence
///
/// When a repository is attached, every successful Create, Update, Delete and
/// mutating Action is followed by a full `save` of the store in key order. A
/// failed save reverts the in-memory change and the caller receives
/// [`FrameworkError::Persistence`], so memory never runs ahead of the file.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    repository: Option<Box<dyn Repository<T>>>,
}

/// Short type name used as the `entity_type` log field (e.g. "Product").
fn entity_type<T>() -> &'static str {
    std::any::type_name::<T>()
        .split("::")
        .last()
        .unwrap_or("Unknown")
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates an in-memory `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When the channel is
    /// full, client calls wait until there is space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            repository: None,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Creates an actor backed by `repository`, loading every stored record first.
    ///
    /// # Errors
    ///
    /// - [`FrameworkError::Persistence`] if the repository cannot be read.
    /// - [`FrameworkError::AlreadyExists`] if two stored records share a key.
    pub fn with_repository(
        buffer_size: usize,
        repository: impl Repository<T>,
    ) -> Result<(Self, ResourceClient<T>), FrameworkError> {
        let entity_type = entity_type::<T>();
        let loaded = repository.load().map_err(|e| {
            warn!(entity_type, error = %e, "Load failed");
            FrameworkError::Persistence(e)
        })?;

        let (mut actor, client) = Self::new(buffer_size);
        for item in loaded {
            let id = item.id().clone();
            if actor.store.contains_key(&id) {
                warn!(entity_type, %id, "Duplicate key in repository");
                return Err(FrameworkError::AlreadyExists(id.to_string()));
            }
            actor.store.insert(id, item);
        }
        info!(entity_type, size = actor.store.len(), "Loaded");

        actor.repository = Some(Box::new(repository));
        Ok((actor, client))
    }

    /// Runs the actor's event loop, processing messages until the channel closes.
    ///
    /// # Context Injection
    /// The `context` argument is injected into every entity hook. This allows entities
    /// to access external dependencies (like other clients) that were created *after*
    /// the actor was instantiated but *before* the loop started.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = entity_type::<T>();
        info!(entity_type, size = self.store.len(), "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create {
                    id,
                    params,
                    respond_to,
                } => {
                    debug!(entity_type, ?id, ?params, "Create");
                    let result = self.create(id, params, &context).await;
                    match &result {
                        Ok(id) => info!(entity_type, %id, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let result = self.action(&id, action, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(
        &mut self,
        id: Option<T::Id>,
        params: T::Create,
        context: &T::Context,
    ) -> Result<T::Id, FrameworkError> {
        let id = id.unwrap_or_else(|| T::next_id(self.store.keys()));
        if self.store.contains_key(&id) {
            return Err(FrameworkError::AlreadyExists(id.to_string()));
        }

        let mut item = T::from_create_params(id.clone(), params)
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;
        item.on_create(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        self.store.insert(id.clone(), item);
        if let Err(e) = self.persist() {
            self.store.remove(&id);
            return Err(e);
        }
        Ok(id)
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, FrameworkError> {
        let Some(item) = self.store.get_mut(id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let before = item.clone();
        if let Err(e) = item.on_update(update, context).await {
            *item = before;
            return Err(FrameworkError::EntityError(Box::new(e)));
        }
        let after = item.clone();

        if let Err(e) = self.persist() {
            self.store.insert(id.clone(), before);
            return Err(e);
        }
        Ok(after)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), FrameworkError> {
        let Some(item) = self.store.get(id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };
        item.on_delete(context)
            .await
            .map_err(|e| FrameworkError::EntityError(Box::new(e)))?;

        let removed = self.store.remove(id);
        if let Err(e) = self.persist() {
            if let Some(item) = removed {
                self.store.insert(id.clone(), item);
            }
            return Err(e);
        }
        Ok(())
    }

    async fn action(
        &mut self,
        id: &T::Id,
        action: T::Action,
        context: &T::Context,
    ) -> Result<T::ActionResult, FrameworkError> {
        let mutating = T::is_mutating(&action);
        let Some(item) = self.store.get_mut(id) else {
            return Err(FrameworkError::NotFound(id.to_string()));
        };

        let before = mutating.then(|| item.clone());
        let result = match item.handle_action(action, context).await {
            Ok(result) => result,
            Err(e) => {
                if let Some(before) = before {
                    *item = before;
                }
                return Err(FrameworkError::EntityError(Box::new(e)));
            }
        };

        if let Some(before) = before {
            if let Err(e) = self.persist() {
                self.store.insert(id.clone(), before);
                return Err(e);
            }
        }
        Ok(result)
    }

    /// Hands the whole store, in key order, to the repository.
    fn persist(&self) -> Result<(), FrameworkError> {
        let Some(repository) = &self.repository else {
            return Ok(());
        };
        let items: Vec<&T> = self.store.values().collect();
        repository.save(&items).map_err(FrameworkError::Persistence)
    }
}
