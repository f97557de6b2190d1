/// Boxed error used to carry entity and repository failures through the actor.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur within the actor framework itself.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Entity error: {0}")]
    EntityError(BoxError),
    #[error("Persistence error: {0}")]
    Persistence(BoxError),
}
