use std::sync::Arc;

use chrono::NaiveDate;
use tracing::warn;

use super::domain::{Exercise, SafetyProfile, UserId};
use super::engine::SafetyEngine;
use super::repository::{ExerciseCatalog, ProfileStore, StoreError};
use super::result::EvaluationResult;

/// Service composing the profile store, exercise catalog, and safety engine.
///
/// All collaborator I/O happens before the engine runs; the engine itself
/// only sees materialized snapshots.
pub struct SafetyEvaluationService<P, C> {
    profiles: Arc<P>,
    catalog: Arc<C>,
    engine: Arc<SafetyEngine>,
}

impl<P, C> SafetyEvaluationService<P, C>
where
    P: ProfileStore + 'static,
    C: ExerciseCatalog + 'static,
{
    pub fn new(profiles: Arc<P>, catalog: Arc<C>, engine: SafetyEngine) -> Self {
        Self {
            profiles,
            catalog,
            engine: Arc::new(engine),
        }
    }

    pub fn engine(&self) -> &SafetyEngine {
        &self.engine
    }

    /// Evaluate a stored profile against the catalog as of `now`.
    pub fn evaluate_user(
        &self,
        user_id: &UserId,
        now: NaiveDate,
    ) -> Result<EvaluationResult, SafetyServiceError> {
        let profile = self
            .profiles
            .fetch(user_id)?
            .ok_or_else(|| SafetyServiceError::ProfileNotFound(user_id.clone()))?;
        let exercises = self.catalog.exercises()?;
        Ok(self.engine.evaluate(&profile, &exercises, now))
    }

    /// Evaluate a caller-supplied profile. Without an explicit pool the catalog is used.
    pub fn evaluate_profile(
        &self,
        profile: &SafetyProfile,
        exercises: Option<Vec<Exercise>>,
        now: NaiveDate,
    ) -> Result<EvaluationResult, SafetyServiceError> {
        let exercises = match exercises {
            Some(exercises) => exercises,
            None => self.catalog.exercises().map_err(|err| {
                warn!(error = %err, "exercise catalog unavailable");
                err
            })?,
        };
        Ok(self.engine.evaluate(profile, &exercises, now))
    }
}

/// Error raised by the evaluation service.
#[derive(Debug, thiserror::Error)]
pub enum SafetyServiceError {
    #[error("no safety profile on file for user `{0}`")]
    ProfileNotFound(UserId),
    #[error(transparent)]
    Store(#[from] StoreError),
}
