//! Workout parameter adjustments and the single policy used to merge them.
//!
//! Every key carries a fixed value kind and merge policy. Sums and min/max
//! folds are commutative and associative, so rule order cannot change a
//! numeric outcome. Text keys have no numeric reading and fall back to last
//! match wins in registry order; they are the only order-sensitive keys.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Adjustment keys the plan builder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterKey {
    VolumeReductionPercent,
    RestSecondsIncrease,
    MaxSets,
    MaxOverheadSets,
    MaxWorkoutMinutes,
    ProgressionCeilingPercent,
    RecoveryMultiplier,
    MaxWeight,
    RepRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterKind {
    Amount,
    Factor,
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// Additive penalties stack.
    Sum,
    /// Ceilings: the stricter (smaller) value wins.
    Min,
    /// Multipliers on recovery: the more conservative (larger) value wins.
    Max,
    /// Descriptive text with no numeric representation.
    LastWins,
}

impl ParameterKey {
    pub const fn kind(self) -> ParameterKind {
        match self {
            Self::VolumeReductionPercent
            | Self::RestSecondsIncrease
            | Self::MaxSets
            | Self::MaxOverheadSets
            | Self::MaxWorkoutMinutes
            | Self::ProgressionCeilingPercent => ParameterKind::Amount,
            Self::RecoveryMultiplier => ParameterKind::Factor,
            Self::MaxWeight | Self::RepRange => ParameterKind::Text,
        }
    }

    pub const fn policy(self) -> MergePolicy {
        match self {
            Self::VolumeReductionPercent | Self::RestSecondsIncrease => MergePolicy::Sum,
            Self::MaxSets
            | Self::MaxOverheadSets
            | Self::MaxWorkoutMinutes
            | Self::ProgressionCeilingPercent => MergePolicy::Min,
            Self::RecoveryMultiplier => MergePolicy::Max,
            Self::MaxWeight | Self::RepRange => MergePolicy::LastWins,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterValue {
    Amount(i32),
    Factor(f32),
    Text(String),
}

impl ParameterValue {
    pub fn text(value: &str) -> Self {
        Self::Text(value.to_string())
    }

    pub const fn kind(&self) -> ParameterKind {
        match self {
            Self::Amount(_) => ParameterKind::Amount,
            Self::Factor(_) => ParameterKind::Factor,
            Self::Text(_) => ParameterKind::Text,
        }
    }

    pub fn as_amount(&self) -> Option<i32> {
        match self {
            Self::Amount(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_factor(&self) -> Option<f32> {
        match self {
            Self::Factor(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Final adjustments keyed by parameter.
pub type ModifiedParameters = BTreeMap<ParameterKey, ParameterValue>;

/// Fold `incoming` into `current` according to the key's policy.
///
/// The registry rejects values of the wrong kind, so mismatched pairs only
/// reach this point from hand-built registries; the existing value is kept.
pub(crate) fn merge(
    key: ParameterKey,
    current: ParameterValue,
    incoming: ParameterValue,
) -> ParameterValue {
    use ParameterValue::{Amount, Factor};

    match (key.policy(), current, incoming) {
        (MergePolicy::LastWins, current, incoming) => {
            if current.kind() == incoming.kind() {
                incoming
            } else {
                current
            }
        }
        (MergePolicy::Sum, Amount(a), Amount(b)) => Amount(a.saturating_add(b)),
        (MergePolicy::Sum, Factor(a), Factor(b)) => Factor(a + b),
        (MergePolicy::Min, Amount(a), Amount(b)) => Amount(a.min(b)),
        (MergePolicy::Min, Factor(a), Factor(b)) => Factor(a.min(b)),
        (MergePolicy::Max, Amount(a), Amount(b)) => Amount(a.max(b)),
        (MergePolicy::Max, Factor(a), Factor(b)) => Factor(a.max(b)),
        (_, current, _) => current,
    }
}
