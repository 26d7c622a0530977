use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};

use tracing::info;
use transfit_safety::catalog::{ExerciseCatalogImporter, ExerciseLibrary};
use transfit_safety::config::CatalogConfig;
use transfit_safety::error::AppError;
use transfit_safety::safety::{ProfileStore, SafetyProfile, StoreError, UserId};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
}

#[derive(Default)]
pub(crate) struct InMemoryProfileStore {
    profiles: RwLock<HashMap<UserId, SafetyProfile>>,
}

impl InMemoryProfileStore {
    pub(crate) fn with_profiles(profiles: Vec<SafetyProfile>) -> Self {
        let profiles = profiles
            .into_iter()
            .map(|profile| (profile.user_id.clone(), profile))
            .collect();
        Self {
            profiles: RwLock::new(profiles),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.profiles.read().map_or(0, |guard| guard.len())
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn fetch(&self, user_id: &UserId) -> Result<Option<SafetyProfile>, StoreError> {
        let guard = self
            .profiles
            .read()
            .map_err(|_| StoreError::Unavailable("profile store lock poisoned".to_string()))?;
        Ok(guard.get(user_id).cloned())
    }
}

/// Exercise pool for the service: an explicit path wins over the configured one.
pub(crate) fn load_catalog(
    explicit: Option<&Path>,
    config: &CatalogConfig,
) -> Result<ExerciseLibrary, AppError> {
    let path: Option<PathBuf> = explicit
        .map(Path::to_path_buf)
        .or_else(|| config.exercise_library.clone());

    match path {
        Some(path) => Ok(ExerciseCatalogImporter::from_path(path)?),
        None => {
            info!("no exercise library configured; evaluations need explicit exercises");
            Ok(ExerciseLibrary::default())
        }
    }
}

/// Profiles are stored as a JSON array of safety profiles.
pub(crate) fn load_profiles(path: Option<&Path>) -> Result<Vec<SafetyProfile>, AppError> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&raw)?)
        }
        None => Ok(Vec::new()),
    }
}

pub(crate) fn read_profile(path: &Path) -> Result<SafetyProfile, AppError> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}
