//! # Repositories
//!
//! A [`Repository`] is where a [`ResourceActor`](crate::ResourceActor) keeps its
//! records between runs. The actor reads the repository once, before its loop
//! starts, and writes the whole store back after every successful mutation.
//!
//! Repositories are synchronous: they are called from inside the actor task,
//! which already serializes every access, and the stores they back are small
//! flat files.

use crate::entity::ActorEntity;
use crate::error::BoxError;
use std::sync::Mutex;

/// Durable storage for a collection of entities.
pub trait Repository<T: ActorEntity>: Send + Sync + 'static {
    /// Reads every stored entity. An absent store yields an empty `Vec`.
    fn load(&self) -> Result<Vec<T>, BoxError>;

    /// Replaces the stored collection with `items`, given in ascending key order.
    fn save(&self, items: &[&T]) -> Result<(), BoxError>;
}

/// Repository held entirely in memory.
///
/// Useful for tests and for seeding an actor with fixed data.
pub struct MemoryRepository<T> {
    items: Mutex<Vec<T>>,
}

impl<T> MemoryRepository<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Mutex::new(items),
        }
    }
}

impl<T> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<T: ActorEntity> MemoryRepository<T> {
    /// Returns a copy of what was last saved (or seeded).
    pub fn snapshot(&self) -> Vec<T> {
        match self.items.lock() {
            Ok(items) => items.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl<T: ActorEntity> Repository<T> for MemoryRepository<T> {
    fn load(&self) -> Result<Vec<T>, BoxError> {
        Ok(self.snapshot())
    }

    fn save(&self, items: &[&T]) -> Result<(), BoxError> {
        let mut stored = self.items.lock().map_err(|e| e.to_string())?;
        *stored = items.iter().map(|item| (*item).clone()).collect();
        Ok(())
    }
}

impl<T: ActorEntity, R: Repository<T>> Repository<T> for std::sync::Arc<R> {
    fn load(&self) -> Result<Vec<T>, BoxError> {
        (**self).load()
    }

    fn save(&self, items: &[&T]) -> Result<(), BoxError> {
        (**self).save(items)
    }
}
