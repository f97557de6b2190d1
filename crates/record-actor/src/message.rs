use crate::entity::ActorEntity;
use crate::error::FrameworkError;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Internal message type sent to the actor to request operations.
///
/// The variants map to the CRUD lifecycle of a record plus `List` for whole-store
/// scans and `Action` for record-specific logic that doesn't fit the CRUD model.
///
/// - **Create**: Uses [`ActorEntity::Create`]. `id` is `None` when the entity
///   should pick its own key via [`ActorEntity::next_id`].
/// - **Get**: Fetches the current state of one record.
/// - **List**: Fetches every record in ascending key order.
/// - **Update**: Uses [`ActorEntity::Update`] to modify an existing record.
/// - **Delete**: Removes the record.
/// - **Action**: Executes a custom [`ActorEntity::Action`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        id: Option<T::Id>,
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
