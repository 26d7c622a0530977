use super::domain::{Exercise, SafetyProfile, UserId};

/// Source of fully-populated safety profiles.
pub trait ProfileStore: Send + Sync {
    fn fetch(&self, user_id: &UserId) -> Result<Option<SafetyProfile>, StoreError>;
}

/// Source of the candidate exercise pool, already filtered for equipment and goal.
pub trait ExerciseCatalog: Send + Sync {
    fn exercises(&self) -> Result<Vec<Exercise>, StoreError>;
}

/// Error enumeration for collaborator failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
