use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{Exercise, ExerciseId};
use super::parameters::{ModifiedParameters, ParameterKey, ParameterValue};
use super::rules::{RuleCategory, Severity};
use super::surgery::ActiveSurgery;

/// Trail entry for a rule whose predicate matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedRule {
    pub rule_id: String,
    pub category: RuleCategory,
    pub severity: Severity,
    pub user_message: String,
}

/// Non-overridable removal of every exercise matching a pattern or muscle group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriticalBlock {
    pub patterns: Vec<String>,
    pub muscle_groups: Vec<String>,
}

impl CriticalBlock {
    pub fn new(patterns: &[&str], muscle_groups: &[&str]) -> Self {
        Self {
            patterns: patterns.iter().map(|value| value.to_string()).collect(),
            muscle_groups: muscle_groups.iter().map(|value| value.to_string()).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty() && self.muscle_groups.is_empty()
    }

    pub fn matches(&self, exercise: &Exercise) -> bool {
        self.patterns
            .iter()
            .any(|pattern| exercise.has_pattern(pattern))
            || self
                .muscle_groups
                .iter()
                .any(|group| exercise.works_muscle_group(group))
    }
}

/// Declarative exercise property used by exclusions and soft filters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum ExerciseCriterion {
    RequiresMirror,
    RequiresPartner,
    IsAquatic,
    NotBinderAware,
    NotHeavyBindingSafe,
    NotPelvicFloorSafe,
    Pattern(String),
    MuscleGroup(String),
    DysphoriaTag(String),
    /// Label of a context-aware predicate the engine already applied to the pool.
    Custom(String),
}

impl ExerciseCriterion {
    pub fn matches(&self, exercise: &Exercise) -> bool {
        match self {
            Self::RequiresMirror => exercise.requires_mirror,
            Self::RequiresPartner => exercise.requires_partner,
            Self::IsAquatic => exercise.is_aquatic,
            Self::NotBinderAware => !exercise.binder_aware,
            Self::NotHeavyBindingSafe => !exercise.heavy_binding_safe,
            Self::NotPelvicFloorSafe => !exercise.pelvic_floor_safe,
            Self::Pattern(pattern) => exercise.has_pattern(pattern),
            Self::MuscleGroup(group) => exercise.works_muscle_group(group),
            Self::DysphoriaTag(tag) => exercise.has_dysphoria_tag(tag),
            Self::Custom(_) => false,
        }
    }
}

/// Ranking penalty: deprioritize matching exercises without removing them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoftFilter {
    pub criteria: Vec<ExerciseCriterion>,
    pub weight: f32,
}

impl SoftFilter {
    pub fn matches(&self, exercise: &Exercise) -> bool {
        self.criteria.iter().any(|criterion| criterion.matches(exercise))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckpointKind {
    BinderBreak,
    BinderRemoval,
    BreathingCheck,
    ScarCare,
    PelvicFloorCheck,
    WarmUp,
    SymptomCheck,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(tag = "on", rename_all = "camelCase")]
pub enum CheckpointTrigger {
    SessionStart,
    EveryMinutes { minutes: u32 },
    BetweenSets,
    PostWorkout,
}

/// Scheduled in-session reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkpoint {
    #[serde(rename = "type")]
    pub kind: CheckpointKind,
    pub trigger: CheckpointTrigger,
    pub message: String,
    pub severity: Severity,
}

/// Safety decision for one profile against one exercise pool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    pub rules_applied: Vec<AppliedRule>,
    pub critical_blocks: Vec<CriticalBlock>,
    pub modified_parameters: ModifiedParameters,
    pub required_checkpoints: Vec<Checkpoint>,
    pub soft_filters: Vec<SoftFilter>,
    pub exclusion_criteria: Vec<ExerciseCriterion>,
    pub active_surgeries: Vec<ActiveSurgery>,
    pub excluded_exercises: Vec<ExerciseId>,
    pub soft_filter_penalties: BTreeMap<ExerciseId, f32>,
}

impl EvaluationResult {
    pub fn parameter(&self, key: ParameterKey) -> Option<&ParameterValue> {
        self.modified_parameters.get(&key)
    }

    pub fn applied(&self, rule_id: &str) -> bool {
        self.rules_applied.iter().any(|rule| rule.rule_id == rule_id)
    }

    pub fn rules_in(&self, category: RuleCategory) -> impl Iterator<Item = &AppliedRule> {
        self.rules_applied
            .iter()
            .filter(move |rule| rule.category == category)
    }

    pub fn is_excluded(&self, exercise_id: &ExerciseId) -> bool {
        self.excluded_exercises.binary_search(exercise_id).is_ok()
    }

    pub fn penalty_for(&self, exercise_id: &ExerciseId) -> f32 {
        self.soft_filter_penalties
            .get(exercise_id)
            .copied()
            .unwrap_or(0.0)
    }

    /// Human-readable adjustment summary, one line per applied rule.
    pub fn summary_lines(&self) -> Vec<String> {
        self.rules_applied
            .iter()
            .map(|rule| format!("[{}] {}", rule.severity.label(), rule.user_message))
            .collect()
    }
}
