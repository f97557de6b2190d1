use async_trait::async_trait;
use record_actor::{
    ActorEntity, BoxError, FrameworkError, MemoryRepository, Repository, ResourceActor,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

// --- Test Entity ---

#[derive(Clone, Debug, PartialEq)]
struct Bin {
    id: u32,
    label: String,
    count: u32,
}

#[derive(Debug)]
struct BinCreate {
    label: String,
    count: u32,
}

#[derive(Debug)]
struct BinUpdate {
    label: Option<String>,
    count: Option<u32>,
}

#[derive(Debug)]
enum BinAction {
    Peek,
    Take(u32),
}

#[derive(Debug, thiserror::Error)]
enum BinError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("only {available} left, wanted {requested}")]
    Short { requested: u32, available: u32 },
}

#[async_trait]
impl ActorEntity for Bin {
    type Id = u32;
    type Create = BinCreate;
    type Update = BinUpdate;
    type Action = BinAction;
    type ActionResult = u32;
    type Context = ();
    type Error = BinError;

    fn id(&self) -> &u32 {
        &self.id
    }

    fn next_id<'a>(existing: impl Iterator<Item = &'a u32>) -> u32 {
        existing.max().map_or(1, |max| max + 1)
    }

    fn from_create_params(id: u32, params: BinCreate) -> Result<Self, Self::Error> {
        if params.label.is_empty() {
            return Err(BinError::EmptyLabel);
        }
        Ok(Self {
            id,
            label: params.label,
            count: params.count,
        })
    }

    async fn on_update(&mut self, update: BinUpdate, _ctx: &()) -> Result<(), Self::Error> {
        // Count is applied first so a rejected label proves the rollback.
        if let Some(count) = update.count {
            self.count = count;
        }
        if let Some(label) = update.label {
            if label.is_empty() {
                return Err(BinError::EmptyLabel);
            }
            self.label = label;
        }
        Ok(())
    }

    async fn handle_action(&mut self, action: BinAction, _ctx: &()) -> Result<u32, Self::Error> {
        match action {
            BinAction::Peek => Ok(self.count),
            BinAction::Take(n) => {
                if n > self.count {
                    return Err(BinError::Short {
                        requested: n,
                        available: self.count,
                    });
                }
                self.count -= n;
                Ok(self.count)
            }
        }
    }

    fn is_mutating(action: &BinAction) -> bool {
        !matches!(action, BinAction::Peek)
    }
}

fn bin(id: u32, label: &str, count: u32) -> Bin {
    Bin {
        id,
        label: label.to_string(),
        count,
    }
}

/// Repository that counts saves and can be told to fail them.
#[derive(Default)]
struct FlakyRepository {
    inner: MemoryRepository<Bin>,
    saves: AtomicUsize,
    fail: AtomicBool,
}

impl Repository<Bin> for FlakyRepository {
    fn load(&self) -> Result<Vec<Bin>, BoxError> {
        self.inner.load()
    }

    fn save(&self, items: &[&Bin]) -> Result<(), BoxError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err("disk full".into());
        }
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.inner.save(items)
    }
}

// --- Tests ---

#[tokio::test]
async fn test_framework_full_lifecycle() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let first = client
        .create(BinCreate {
            label: "bolts".into(),
            count: 10,
        })
        .await
        .unwrap();
    let second = client
        .create(BinCreate {
            label: "nuts".into(),
            count: 4,
        })
        .await
        .unwrap();
    assert_eq!((first, second), (1, 2));

    let left = client.perform_action(first, BinAction::Take(3)).await.unwrap();
    assert_eq!(left, 7);

    let updated = client
        .update(
            second,
            BinUpdate {
                label: Some("washers".into()),
                count: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.label, "washers");

    let all = client.list().await.unwrap();
    assert_eq!(all, vec![bin(1, "bolts", 7), bin(2, "washers", 4)]);

    client.delete(first).await.unwrap();
    assert!(client.get(first).await.unwrap().is_none());
    assert!(matches!(
        client.delete(first).await,
        Err(FrameworkError::NotFound(id)) if id == "1"
    ));
}

#[tokio::test]
async fn test_create_with_existing_id_is_rejected() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client
        .create_with_id(
            5,
            BinCreate {
                label: "gears".into(),
                count: 1,
            },
        )
        .await
        .unwrap();
    assert_eq!(id, 5);

    let result = client
        .create_with_id(
            5,
            BinCreate {
                label: "other".into(),
                count: 9,
            },
        )
        .await;
    assert!(matches!(result, Err(FrameworkError::AlreadyExists(id)) if id == "5"));

    // The original record is untouched and generated keys continue past it.
    assert_eq!(client.get(5).await.unwrap(), Some(bin(5, "gears", 1)));
    let next = client
        .create(BinCreate {
            label: "cogs".into(),
            count: 2,
        })
        .await
        .unwrap();
    assert_eq!(next, 6);
}

#[tokio::test]
async fn test_failed_action_leaves_record_unchanged() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client
        .create(BinCreate {
            label: "pins".into(),
            count: 2,
        })
        .await
        .unwrap();

    let result = client.perform_action(id, BinAction::Take(3)).await;
    match result {
        Err(FrameworkError::EntityError(e)) => {
            assert_eq!(e.to_string(), "only 2 left, wanted 3");
        }
        other => panic!("expected EntityError, got {other:?}"),
    }
    assert_eq!(client.get(id).await.unwrap().unwrap().count, 2);
}

#[tokio::test]
async fn test_failed_update_discards_partial_changes() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    tokio::spawn(actor.run(()));

    let id = client
        .create(BinCreate {
            label: "clips".into(),
            count: 8,
        })
        .await
        .unwrap();

    let result = client
        .update(
            id,
            BinUpdate {
                label: Some(String::new()),
                count: Some(100),
            },
        )
        .await;
    assert!(matches!(result, Err(FrameworkError::EntityError(_))));
    assert_eq!(client.get(id).await.unwrap(), Some(bin(id, "clips", 8)));
}

#[tokio::test]
async fn test_repository_is_loaded_and_saved_on_mutation() {
    let repository = Arc::new(MemoryRepository::new(vec![
        bin(3, "springs", 5),
        bin(1, "rivets", 12),
    ]));
    let (actor, client) = ResourceActor::<Bin>::with_repository(10, repository.clone()).unwrap();
    let handle = tokio::spawn(actor.run(()));

    // Loaded records come back in key order.
    let ids: Vec<u32> = client.list().await.unwrap().iter().map(|b| b.id).collect();
    assert_eq!(ids, vec![1, 3]);

    client.perform_action(3, BinAction::Take(5)).await.unwrap();
    let id = client
        .create(BinCreate {
            label: "hooks".into(),
            count: 1,
        })
        .await
        .unwrap();
    assert_eq!(id, 4);

    assert_eq!(
        repository.snapshot(),
        vec![bin(1, "rivets", 12), bin(3, "springs", 0), bin(4, "hooks", 1)]
    );

    drop(client);
    handle.await.unwrap();
}

#[tokio::test]
async fn test_read_only_action_does_not_save() {
    let repository = Arc::new(FlakyRepository::default());
    let (actor, client) = ResourceActor::<Bin>::with_repository(10, repository.clone()).unwrap();
    tokio::spawn(actor.run(()));

    let id = client
        .create(BinCreate {
            label: "studs".into(),
            count: 3,
        })
        .await
        .unwrap();
    assert_eq!(repository.saves.load(Ordering::SeqCst), 1);

    assert_eq!(client.perform_action(id, BinAction::Peek).await.unwrap(), 3);
    client.get(id).await.unwrap();
    client.list().await.unwrap();
    assert_eq!(repository.saves.load(Ordering::SeqCst), 1);

    client.perform_action(id, BinAction::Take(1)).await.unwrap();
    assert_eq!(repository.saves.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_failed_save_reverts_memory() {
    let repository = Arc::new(FlakyRepository::default());
    let (actor, client) = ResourceActor::<Bin>::with_repository(10, repository.clone()).unwrap();
    tokio::spawn(actor.run(()));

    let id = client
        .create(BinCreate {
            label: "tacks".into(),
            count: 6,
        })
        .await
        .unwrap();

    repository.fail.store(true, Ordering::SeqCst);

    let take = client.perform_action(id, BinAction::Take(2)).await;
    assert!(matches!(take, Err(FrameworkError::Persistence(_))));

    let create = client
        .create(BinCreate {
            label: "brads".into(),
            count: 1,
        })
        .await;
    assert!(matches!(create, Err(FrameworkError::Persistence(_))));

    let delete = client.delete(id).await;
    assert!(matches!(delete, Err(FrameworkError::Persistence(_))));

    assert_eq!(client.list().await.unwrap(), vec![bin(id, "tacks", 6)]);
}

#[tokio::test]
async fn test_duplicate_keys_in_repository_fail_startup() {
    let repository = MemoryRepository::new(vec![bin(1, "a", 1), bin(1, "b", 2)]);
    let result = ResourceActor::<Bin>::with_repository(10, repository);
    assert!(matches!(result, Err(FrameworkError::AlreadyExists(id)) if id == "1"));
}

#[tokio::test]
async fn test_client_reports_closed_actor() {
    let (actor, client) = ResourceActor::<Bin>::new(10);
    drop(actor);
    assert!(matches!(client.get(1).await, Err(FrameworkError::ActorClosed)));
}
