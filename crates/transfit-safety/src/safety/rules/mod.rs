//! Declarative rule tables and the registry that validates them.
//!
//! Each rule pairs a predicate over the [`EvaluationContext`] with exactly one
//! [`RuleAction`]. Rules never depend on each other; the accumulator owns all
//! merging. Malformed tables are rejected when the registry is built so that
//! a broken rule cannot silently fail to apply during evaluation.

mod binding;
mod dysphoria;
mod hrt;
mod post_op;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::context::EvaluationContext;
use super::domain::Exercise;
use super::parameters::{ParameterKey, ParameterValue};
use super::result::{
    Checkpoint, CheckpointKind, CheckpointTrigger, CriticalBlock, ExerciseCriterion, SoftFilter,
};

const SURGEON_CLEARANCE_CAUTION: &str =
    "Surgeon clearance is not on file; confirm with your surgical team before progressing.";

pub type Predicate = fn(&EvaluationContext<'_>) -> bool;
pub type ExercisePredicate = fn(&EvaluationContext<'_>, &Exercise) -> bool;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleCategory {
    Binding,
    PostOp,
    Hrt,
    Dysphoria,
}

impl RuleCategory {
    pub const fn ordered() -> [Self; 4] {
        [Self::Binding, Self::PostOp, Self::Hrt, Self::Dysphoria]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Binding => "Binding Safety",
            Self::PostOp => "Post-Operative Recovery",
            Self::Hrt => "Hormone Therapy",
            Self::Dysphoria => "Dysphoria Support",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Severity {
    Low,
    High,
    Critical,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Context-aware exclusion that cannot be expressed as an [`ExerciseCriterion`].
#[derive(Clone, Copy)]
pub struct CustomExclusion {
    pub label: &'static str,
    pub predicate: ExercisePredicate,
}

impl fmt::Debug for CustomExclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomExclusion")
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Closed set of outcomes a rule can produce.
#[derive(Debug, Clone)]
pub enum RuleAction {
    CriticalBlock(CriticalBlock),
    ExcludeExercises {
        criteria: Vec<ExerciseCriterion>,
        custom: Option<CustomExclusion>,
    },
    ModifyParameters(BTreeMap<ParameterKey, ParameterValue>),
    InjectCheckpoint(Checkpoint),
    SoftFilter(SoftFilter),
}

impl RuleAction {
    pub fn block(patterns: &[&str], muscle_groups: &[&str]) -> Self {
        Self::CriticalBlock(CriticalBlock::new(patterns, muscle_groups))
    }

    pub fn exclude(criteria: Vec<ExerciseCriterion>) -> Self {
        Self::ExcludeExercises {
            criteria,
            custom: None,
        }
    }

    pub fn exclude_with(label: &'static str, predicate: ExercisePredicate) -> Self {
        Self::ExcludeExercises {
            criteria: Vec::new(),
            custom: Some(CustomExclusion { label, predicate }),
        }
    }

    pub fn modify(deltas: Vec<(ParameterKey, ParameterValue)>) -> Self {
        Self::ModifyParameters(deltas.into_iter().collect())
    }

    pub fn checkpoint(
        kind: CheckpointKind,
        trigger: CheckpointTrigger,
        message: &str,
        severity: Severity,
    ) -> Self {
        Self::InjectCheckpoint(Checkpoint {
            kind,
            trigger,
            message: message.to_string(),
            severity,
        })
    }

    pub fn soft_filter(criteria: Vec<ExerciseCriterion>, weight: f32) -> Self {
        Self::SoftFilter(SoftFilter { criteria, weight })
    }
}

/// Immutable rule definition.
#[derive(Clone)]
pub struct Rule {
    pub id: &'static str,
    pub category: RuleCategory,
    pub severity: Severity,
    pub message: &'static str,
    pub predicate: Predicate,
    pub action: RuleAction,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("severity", &self.severity)
            .field("action", &self.action)
            .finish_non_exhaustive()
    }
}

impl Rule {
    pub fn matches(&self, context: &EvaluationContext<'_>) -> bool {
        (self.predicate)(context)
    }

    /// Message shown to the user when the rule fires.
    pub fn user_message(&self, context: &EvaluationContext<'_>) -> String {
        if self.category == RuleCategory::PostOp && !context.profile.surgeon_cleared {
            format!("{} {}", self.message, SURGEON_CLEARANCE_CAUTION)
        } else {
            self.message.to_string()
        }
    }

    fn validate(&self) -> Result<(), RegistryError> {
        let rule_id = self.id.to_string();
        match &self.action {
            RuleAction::CriticalBlock(block) if block.is_empty() => {
                Err(RegistryError::EmptyCriticalBlock { rule_id })
            }
            RuleAction::ExcludeExercises { criteria, custom }
                if criteria.is_empty() && custom.is_none() =>
            {
                Err(RegistryError::EmptyExclusion { rule_id })
            }
            RuleAction::ModifyParameters(deltas) if deltas.is_empty() => {
                Err(RegistryError::EmptyModification { rule_id })
            }
            RuleAction::ModifyParameters(deltas) => {
                match deltas.iter().find(|(key, value)| key.kind() != value.kind()) {
                    Some((key, _)) => Err(RegistryError::ParameterKindMismatch { rule_id, key: *key }),
                    None => Ok(()),
                }
            }
            RuleAction::InjectCheckpoint(checkpoint) if checkpoint.message.trim().is_empty() => {
                Err(RegistryError::EmptyCheckpointMessage { rule_id })
            }
            RuleAction::SoftFilter(filter)
                if filter.criteria.is_empty() || !(filter.weight.is_finite() && filter.weight > 0.0) =>
            {
                Err(RegistryError::InvalidSoftFilter {
                    rule_id,
                    weight: filter.weight,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Configuration errors detected while building a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("rule id `{0}` is registered more than once")]
    DuplicateRuleId(String),
    #[error("rule `{rule_id}` blocks no patterns and no muscle groups")]
    EmptyCriticalBlock { rule_id: String },
    #[error("rule `{rule_id}` excludes exercises without criteria or predicate")]
    EmptyExclusion { rule_id: String },
    #[error("rule `{rule_id}` modifies no parameters")]
    EmptyModification { rule_id: String },
    #[error("rule `{rule_id}` sets {key:?} with a value of the wrong kind")]
    ParameterKindMismatch { rule_id: String, key: ParameterKey },
    #[error("rule `{rule_id}` has an unusable soft filter (weight {weight})")]
    InvalidSoftFilter { rule_id: String, weight: f32 },
    #[error("rule `{rule_id}` injects a checkpoint without a message")]
    EmptyCheckpointMessage { rule_id: String },
}

/// Validated, immutable collection of rules.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    pub fn new(rules: Vec<Rule>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id) {
                return Err(RegistryError::DuplicateRuleId(rule.id.to_string()));
            }
            rule.validate()?;
        }

        debug!(rules = rules.len(), "safety rule registry built");
        Ok(Self { rules })
    }

    /// Binding, post-operative, hormone-therapy and dysphoria tables.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut rules = binding::rules();
        rules.extend(post_op::rules());
        rules.extend(hrt::rules());
        rules.extend(dysphoria::rules());
        Self::new(rules)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rules_in(&self, category: RuleCategory) -> impl Iterator<Item = &Rule> {
        self.rules
            .iter()
            .filter(move |rule| rule.category == category)
    }

    pub fn get(&self, rule_id: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.id == rule_id)
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
