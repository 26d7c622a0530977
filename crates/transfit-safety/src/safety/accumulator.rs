use std::collections::{BTreeMap, BTreeSet};

use super::context::EvaluationContext;
use super::domain::{BinderType, ExerciseId};
use super::parameters::{merge, ModifiedParameters, ParameterKey, ParameterValue};
use super::result::{
    AppliedRule, Checkpoint, CriticalBlock, EvaluationResult, ExerciseCriterion, SoftFilter,
};
use super::rules::RuleAction;

/// Beyond this reduction a session is no longer viable, only emptier.
pub const MAX_VOLUME_REDUCTION_PERCENT: i32 = 60;
/// Lowest set ceiling any combination of rules may produce.
pub const MIN_SETS: i32 = 2;
/// Hard session ceiling for ACE bandage and DIY binders.
pub const UNSAFE_BINDER_SESSION_MINUTES: i32 = 30;

/// Folds matched rule actions into a draft result.
#[derive(Debug, Default)]
pub(crate) struct Accumulator {
    critical_blocks: Vec<CriticalBlock>,
    exclusion_criteria: Vec<ExerciseCriterion>,
    custom_exclusions: BTreeSet<ExerciseId>,
    parameters: ModifiedParameters,
    checkpoints: Vec<Checkpoint>,
    soft_filters: Vec<SoftFilter>,
}

impl Accumulator {
    pub(crate) fn apply(&mut self, action: &RuleAction, context: &EvaluationContext<'_>) {
        match action {
            RuleAction::CriticalBlock(block) => {
                if !self.critical_blocks.contains(block) {
                    self.critical_blocks.push(block.clone());
                }
            }
            RuleAction::ExcludeExercises { criteria, custom } => {
                for criterion in criteria {
                    self.add_exclusion_criterion(criterion.clone());
                }
                if let Some(custom) = custom {
                    self.add_exclusion_criterion(ExerciseCriterion::Custom(custom.label.to_string()));
                    self.custom_exclusions.extend(
                        context
                            .exercise_pool
                            .iter()
                            .filter(|exercise| (custom.predicate)(context, exercise))
                            .map(|exercise| exercise.id.clone()),
                    );
                }
            }
            RuleAction::ModifyParameters(deltas) => {
                for (key, value) in deltas {
                    self.merge_parameter(*key, value.clone());
                }
            }
            RuleAction::InjectCheckpoint(checkpoint) => self.add_checkpoint(checkpoint),
            RuleAction::SoftFilter(filter) => {
                match self
                    .soft_filters
                    .iter_mut()
                    .find(|existing| existing.criteria == filter.criteria)
                {
                    Some(existing) => existing.weight += filter.weight,
                    None => self.soft_filters.push(filter.clone()),
                }
            }
        }
    }

    fn add_exclusion_criterion(&mut self, criterion: ExerciseCriterion) {
        if !self.exclusion_criteria.contains(&criterion) {
            self.exclusion_criteria.push(criterion);
        }
    }

    fn merge_parameter(&mut self, key: ParameterKey, value: ParameterValue) {
        let merged = match self.parameters.remove(&key) {
            Some(current) => merge(key, current, value),
            None => value,
        };
        self.parameters.insert(key, merged);
    }

    /// Reminders dedupe on (type, trigger); the duplicate keeps the higher severity.
    fn add_checkpoint(&mut self, checkpoint: &Checkpoint) {
        match self.checkpoints.iter_mut().find(|existing| {
            existing.kind == checkpoint.kind && existing.trigger == checkpoint.trigger
        }) {
            Some(existing) => existing.severity = existing.severity.max(checkpoint.severity),
            None => self.checkpoints.push(checkpoint.clone()),
        }
    }

    /// Apply the safety clamps and resolve the draft against the exercise pool.
    ///
    /// Runs after every rule has been folded, so no rule order can bypass it.
    pub(crate) fn finalize(
        mut self,
        rules_applied: Vec<AppliedRule>,
        context: &EvaluationContext<'_>,
    ) -> EvaluationResult {
        if let Some(ParameterValue::Amount(reduction)) =
            self.parameters.get_mut(&ParameterKey::VolumeReductionPercent)
        {
            *reduction = (*reduction).clamp(0, MAX_VOLUME_REDUCTION_PERCENT);
        }

        if let Some(ParameterValue::Amount(sets)) = self.parameters.get_mut(&ParameterKey::MaxSets) {
            *sets = (*sets).max(MIN_SETS);
        }

        if context
            .profile
            .binder_type
            .is_some_and(BinderType::is_unsafe)
        {
            self.parameters.insert(
                ParameterKey::MaxWorkoutMinutes,
                ParameterValue::Amount(UNSAFE_BINDER_SESSION_MINUTES),
            );
        }

        let mut excluded = self.custom_exclusions;
        excluded.extend(
            context
                .exercise_pool
                .iter()
                .filter(|exercise| {
                    self.critical_blocks.iter().any(|block| block.matches(exercise))
                        || self
                            .exclusion_criteria
                            .iter()
                            .any(|criterion| criterion.matches(exercise))
                })
                .map(|exercise| exercise.id.clone()),
        );

        let mut soft_filter_penalties = BTreeMap::new();
        for exercise in context.exercise_pool {
            if excluded.contains(&exercise.id) {
                continue;
            }
            let penalty: f32 = self
                .soft_filters
                .iter()
                .filter(|filter| filter.matches(exercise))
                .map(|filter| filter.weight)
                .sum();
            if penalty > 0.0 {
                *soft_filter_penalties
                    .entry(exercise.id.clone())
                    .or_insert(0.0) += penalty;
            }
        }

        EvaluationResult {
            rules_applied,
            critical_blocks: self.critical_blocks,
            modified_parameters: self.parameters,
            required_checkpoints: self.checkpoints,
            soft_filters: self.soft_filters,
            exclusion_criteria: self.exclusion_criteria,
            active_surgeries: context.active_surgeries.to_vec(),
            excluded_exercises: excluded.into_iter().collect(),
            soft_filter_penalties,
        }
    }
}
