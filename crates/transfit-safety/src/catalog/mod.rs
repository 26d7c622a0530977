//! Exercise-library CSV import.

mod parser;

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::info;

use crate::safety::domain::{Exercise, ExerciseId};
use crate::safety::repository::{ExerciseCatalog, StoreError};

#[derive(Debug)]
pub enum CatalogImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: &'static str },
    DuplicateExercise(ExerciseId),
}

impl std::fmt::Display for CatalogImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogImportError::Io(err) => write!(f, "failed to read exercise library: {}", err),
            CatalogImportError::Csv(err) => write!(f, "invalid exercise library CSV: {}", err),
            CatalogImportError::InvalidRow { line, reason } => {
                write!(f, "exercise library line {}: {}", line, reason)
            }
            CatalogImportError::DuplicateExercise(id) => {
                write!(f, "exercise `{}` appears more than once", id)
            }
        }
    }
}

impl std::error::Error for CatalogImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogImportError::Io(err) => Some(err),
            CatalogImportError::Csv(err) => Some(err),
            CatalogImportError::InvalidRow { .. } | CatalogImportError::DuplicateExercise(_) => {
                None
            }
        }
    }
}

impl From<std::io::Error> for CatalogImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for CatalogImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct ExerciseCatalogImporter;

impl ExerciseCatalogImporter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<ExerciseLibrary, CatalogImportError> {
        let file = std::fs::File::open(path.as_ref())?;
        let library = Self::from_reader(file)?;
        info!(
            path = %path.as_ref().display(),
            exercises = library.len(),
            "exercise library loaded"
        );
        Ok(library)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<ExerciseLibrary, CatalogImportError> {
        let mut seen = HashSet::new();
        let mut exercises = Vec::new();

        for record in parser::parse_rows(reader)? {
            let line = record.line;
            let exercise = record
                .row
                .into_exercise()
                .map_err(|reason| CatalogImportError::InvalidRow { line, reason })?;

            if !seen.insert(exercise.id.clone()) {
                return Err(CatalogImportError::DuplicateExercise(exercise.id));
            }
            exercises.push(exercise);
        }

        Ok(ExerciseLibrary::new(exercises))
    }
}

/// Immutable exercise pool held in memory.
#[derive(Debug, Clone, Default)]
pub struct ExerciseLibrary {
    exercises: Vec<Exercise>,
}

impl ExerciseLibrary {
    pub fn new(exercises: Vec<Exercise>) -> Self {
        Self { exercises }
    }

    pub fn as_slice(&self) -> &[Exercise] {
        &self.exercises
    }

    pub fn get(&self, id: &ExerciseId) -> Option<&Exercise> {
        self.exercises.iter().find(|exercise| &exercise.id == id)
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }
}

impl ExerciseCatalog for ExerciseLibrary {
    fn exercises(&self) -> Result<Vec<Exercise>, StoreError> {
        Ok(self.exercises.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const HEADER: &str = "id,slug,name,pattern,goal,target_muscles,secondary_muscles,binder_aware,heavy_binding_safe,pelvic_floor_safe,contraindications,dysphoria_tags,post_op_safe_weeks\n";

    fn import(rows: &str) -> Result<ExerciseLibrary, CatalogImportError> {
        let csv = format!("{HEADER}{rows}");
        ExerciseCatalogImporter::from_reader(Cursor::new(csv.into_bytes()))
    }

    #[test]
    fn imports_safety_flags_and_lists() {
        let library = import(
            "1,goblet-squat,Goblet Squat,squat,strength,\"['quads', 'glutes']\",['Core'],TRUE,TRUE,FALSE,['knee_injury'],\"['crowded_spaces', 'mirror']\",8\n",
        )
        .expect("library imports");

        let exercise = library
            .get(&ExerciseId("goblet-squat".to_string()))
            .expect("exercise present");
        assert_eq!(exercise.name, "Goblet Squat");
        assert!(exercise.works_muscle_group("quads"));
        assert!(exercise.works_muscle_group("core"));
        assert!(exercise.binder_aware);
        assert!(exercise.heavy_binding_safe);
        assert!(!exercise.pelvic_floor_safe);
        assert!(exercise.has_contraindication("knee_injury"));
        assert!(exercise.has_dysphoria_tag("crowded_spaces"));
        assert!(exercise.requires_mirror);
        assert!(!exercise.requires_partner);
        assert_eq!(exercise.post_op_safe_weeks, Some(8));
    }

    #[test]
    fn falls_back_to_numeric_id_without_slug() {
        let library = import("42,,Plank,core,stability,['abs'],,,,,,,\n").expect("library imports");
        let exercise = library
            .get(&ExerciseId("42".to_string()))
            .expect("numeric id used");
        assert!(!exercise.binder_aware);
        assert_eq!(exercise.post_op_safe_weeks, None);
    }

    #[test]
    fn rejects_rows_without_pattern() {
        let err = import("7,dead-bug,Dead Bug,,stability,['abs'],,TRUE,TRUE,TRUE,,,\n")
            .expect_err("pattern is required");
        assert!(matches!(err, CatalogImportError::InvalidRow { line: 2, .. }));
    }

    #[test]
    fn rejects_duplicate_exercise_ids() {
        let err = import(
            "1,push-up,Push-Up,push,strength,['pectorals'],,TRUE,FALSE,TRUE,,,\n2,push-up,Push-Up Again,push,strength,['pectorals'],,TRUE,FALSE,TRUE,,,\n",
        )
        .expect_err("duplicate slug rejected");
        assert!(matches!(err, CatalogImportError::DuplicateExercise(id) if id.0 == "push-up"));
    }
}
