use chrono::NaiveDate;
use transfit_safety::catalog::{CatalogImportError, ExerciseCatalogImporter};
use transfit_safety::safety::{
    ExerciseCatalog, ExerciseId, SafetyEngine, SafetyProfile, Surgery, SurgeryType,
};

fn library_path() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("exercise_library.csv")
}

fn exercise_id(value: &str) -> ExerciseId {
    ExerciseId(value.to_string())
}

#[test]
fn sample_library_imports_every_row() {
    let library = ExerciseCatalogImporter::from_path(library_path()).expect("library imports");

    assert_eq!(library.len(), 16);

    let bench = library
        .get(&exercise_id("dumbbell-bench-press"))
        .expect("bench press present");
    assert!(bench.works_muscle_group("pectorals"));
    assert!(bench.works_muscle_group("delts"));
    assert!(!bench.binder_aware);
    assert!(!bench.heavy_binding_safe);
    assert!(bench.has_dysphoria_tag("looking_at_chest"));
    assert_eq!(bench.post_op_safe_weeks, Some(12));
}

#[test]
fn dysphoria_tags_derive_hard_exclusion_flags() {
    let data = include_bytes!("../exercise_library.csv");
    let library = ExerciseCatalogImporter::from_reader(&data[..]).expect("library imports");

    let flow = library
        .get(&exercise_id("mirror-mobility-flow"))
        .expect("flow present");
    assert!(flow.requires_mirror);
    assert_eq!(flow.post_op_safe_weeks, None);

    let stretch = library
        .get(&exercise_id("partner-hamstring-stretch"))
        .expect("stretch present");
    assert!(stretch.requires_partner);
    assert!(!stretch.requires_mirror);

    let jog = library.get(&exercise_id("aqua-jog")).expect("jog present");
    assert!(jog.is_aquatic);
}

#[test]
fn missing_library_file_is_an_io_error() {
    let error = ExerciseCatalogImporter::from_path("does/not/exist.csv")
        .expect_err("missing file");

    assert!(matches!(error, CatalogImportError::Io(_)));
    assert!(error.to_string().contains("failed to read exercise library"));
}

#[test]
fn imported_library_feeds_the_engine() {
    let data = include_bytes!("../exercise_library.csv");
    let library = ExerciseCatalogImporter::from_reader(&data[..]).expect("library imports");
    let now = NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date");
    let profile = SafetyProfile {
        surgeries: vec![Surgery {
            surgery_type: SurgeryType::TopSurgery,
            date: Some(NaiveDate::from_ymd_opt(2025, 6, 9).expect("valid date").into()),
            fully_healed: false,
        }],
        surgeon_cleared: true,
        ..SafetyProfile::default()
    };

    let exercises = library.exercises().expect("in-memory catalog");
    let result = SafetyEngine::standard()
        .expect("standard registry")
        .evaluate(&profile, &exercises, now);

    for blocked in [
        "dumbbell-bench-press",
        "incline-push-up",
        "seated-cable-row",
        "half-kneeling-landmine-press",
        "banded-pull-apart",
    ] {
        assert!(result.is_excluded(&exercise_id(blocked)), "{blocked}");
    }
    assert!(!result.is_excluded(&exercise_id("incline-treadmill-walk")));
    assert!(!result.is_excluded(&exercise_id("mirror-mobility-flow")));
}
