use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{Duration, NaiveDate};
use serde_json::Value;

use crate::safety::domain::{
    BinderType, BindingFrequency, Exercise, ExerciseId, HrtType, SafetyProfile, Surgery,
    SurgeryType, UserId,
};
use crate::safety::engine::SafetyEngine;
use crate::safety::repository::{ExerciseCatalog, ProfileStore, StoreError};
use crate::safety::result::EvaluationResult;
use crate::safety::service::SafetyEvaluationService;
use crate::safety::temporal::EventDate;

pub(super) fn now() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
}

pub(super) fn weeks_ago(weeks: i64) -> EventDate {
    EventDate::from(now() - Duration::weeks(weeks))
}

pub(super) fn days_ago(days: i64) -> EventDate {
    EventDate::from(now() - Duration::days(days))
}

pub(super) fn engine() -> SafetyEngine {
    SafetyEngine::standard().expect("standard registry is valid")
}

pub(super) fn evaluate(profile: &SafetyProfile) -> EvaluationResult {
    engine().evaluate(profile, &pool(), now())
}

pub(super) fn profile() -> SafetyProfile {
    SafetyProfile {
        user_id: UserId("user-1".to_string()),
        ..SafetyProfile::default()
    }
}

pub(super) fn binding_profile(hours: Option<f32>, binder: Option<BinderType>) -> SafetyProfile {
    SafetyProfile {
        binds_chest: true,
        binding_frequency: BindingFrequency::Sometimes,
        binding_duration_hours: hours,
        binder_type: binder,
        ..profile()
    }
}

pub(super) fn hrt_profile(hrt_type: HrtType, start: Option<EventDate>) -> SafetyProfile {
    SafetyProfile {
        on_hrt: true,
        hrt_type: Some(hrt_type),
        hrt_start_date: start,
        ..profile()
    }
}

pub(super) fn surgery(surgery_type: SurgeryType, date: Option<EventDate>, fully_healed: bool) -> Surgery {
    Surgery {
        surgery_type,
        date,
        fully_healed,
    }
}

pub(super) fn post_op_profile(surgeries: Vec<Surgery>) -> SafetyProfile {
    SafetyProfile {
        surgeries,
        surgeon_cleared: true,
        ..profile()
    }
}

pub(super) fn id(value: &str) -> ExerciseId {
    ExerciseId(value.to_string())
}

pub(super) fn exercise(exercise_id: &str, pattern: &str, muscle_groups: &[&str]) -> Exercise {
    Exercise {
        id: id(exercise_id),
        name: exercise_id.replace('-', " "),
        pattern: pattern.to_string(),
        muscle_groups: muscle_groups.iter().map(|group| group.to_string()).collect(),
        binder_aware: true,
        heavy_binding_safe: true,
        pelvic_floor_safe: true,
        contraindications: BTreeSet::new(),
        requires_mirror: false,
        requires_partner: false,
        is_aquatic: false,
        post_op_safe_weeks: None,
        dysphoria_tags: BTreeSet::new(),
    }
}

/// Mixed pool touching every rule category.
pub(super) fn pool() -> Vec<Exercise> {
    let mut bench_press = exercise("bench-press", "horizontal_push", &["pectorals", "triceps"]);
    bench_press.binder_aware = false;
    bench_press.heavy_binding_safe = false;

    let lat_pulldown = exercise("lat-pulldown", "vertical_pull", &["lats", "biceps"]);
    let overhead_press = exercise("overhead-press", "overhead", &["delts"]);

    let mut goblet_squat = exercise("goblet-squat", "squat", &["quads", "glutes"]);
    goblet_squat.pelvic_floor_safe = false;

    let romanian_deadlift = exercise("romanian-deadlift", "hinge", &["hamstrings", "glutes"]);
    let glute_bridge = exercise("glute-bridge", "bridge", &["glutes"]);
    let farmer_carry = exercise("farmer-carry", "carry", &["forearms", "traps"]);

    let mut mirror_flow = exercise("mirror-flow", "mobility", &["hips"]);
    mirror_flow.requires_mirror = true;

    let mut partner_stretch = exercise("partner-stretch", "mobility", &["hamstrings"]);
    partner_stretch.requires_partner = true;

    let mut pool_jog = exercise("pool-jog", "cardio", &["calves"]);
    pool_jog.is_aquatic = true;

    let mut incline_walk = exercise("incline-walk", "gait", &["calves"]);
    incline_walk.dysphoria_tags.insert("crowded_spaces".to_string());

    let mut box_jump = exercise("box-jump", "plyometric", &["quads"]);
    box_jump.post_op_safe_weeks = Some(12);

    let dead_bug = exercise("dead-bug", "core", &["abs"]);

    vec![
        bench_press,
        lat_pulldown,
        overhead_press,
        goblet_squat,
        romanian_deadlift,
        glute_bridge,
        farmer_carry,
        mirror_flow,
        partner_stretch,
        pool_jog,
        incline_walk,
        box_jump,
        dead_bug,
    ]
}

#[derive(Default)]
pub(super) struct MemoryProfiles {
    profiles: Mutex<HashMap<UserId, SafetyProfile>>,
}

impl MemoryProfiles {
    pub(super) fn with(profiles: Vec<SafetyProfile>) -> Self {
        let store = Self::default();
        {
            let mut guard = store.profiles.lock().expect("profile mutex poisoned");
            for profile in profiles {
                guard.insert(profile.user_id.clone(), profile);
            }
        }
        store
    }
}

impl ProfileStore for MemoryProfiles {
    fn fetch(&self, user_id: &UserId) -> Result<Option<SafetyProfile>, StoreError> {
        let guard = self.profiles.lock().expect("profile mutex poisoned");
        Ok(guard.get(user_id).cloned())
    }
}

pub(super) struct MemoryCatalog(pub(super) Vec<Exercise>);

impl ExerciseCatalog for MemoryCatalog {
    fn exercises(&self) -> Result<Vec<Exercise>, StoreError> {
        Ok(self.0.clone())
    }
}

pub(super) struct UnavailableCatalog;

impl ExerciseCatalog for UnavailableCatalog {
    fn exercises(&self) -> Result<Vec<Exercise>, StoreError> {
        Err(StoreError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) fn build_service(
    profiles: Vec<SafetyProfile>,
) -> SafetyEvaluationService<MemoryProfiles, MemoryCatalog> {
    SafetyEvaluationService::new(
        Arc::new(MemoryProfiles::with(profiles)),
        Arc::new(MemoryCatalog(pool())),
        engine(),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
