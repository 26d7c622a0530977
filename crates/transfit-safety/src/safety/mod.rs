//! Safety policy engine.
//!
//! A profile and an exercise pool go in; an [`EvaluationResult`] comes out.
//! Surgeries are normalized by the resolver, every registered rule is tested
//! against a read-only [`EvaluationContext`], and matched actions are folded
//! by the accumulator before the final clamps apply. The engine reads no
//! clock and holds no state, so evaluations can run concurrently.

pub(crate) mod accumulator;
pub mod context;
pub mod domain;
pub mod engine;
pub mod parameters;
pub mod repository;
pub mod result;
pub mod router;
pub mod rules;
pub mod service;
pub mod surgery;
pub mod temporal;

#[cfg(test)]
mod tests;

pub use accumulator::{MAX_VOLUME_REDUCTION_PERCENT, MIN_SETS, UNSAFE_BINDER_SESSION_MINUTES};
pub use context::{EvaluationContext, ASSUMED_BINDING_HOURS};
pub use domain::{
    BinderType, BindingFrequency, DysphoriaTrigger, Exercise, ExerciseId, HrtType, SafetyProfile,
    Surgery, SurgeryType, UserId,
};
pub use engine::SafetyEngine;
pub use parameters::{MergePolicy, ModifiedParameters, ParameterKey, ParameterKind, ParameterValue};
pub use repository::{ExerciseCatalog, ProfileStore, StoreError};
pub use result::{
    AppliedRule, Checkpoint, CheckpointKind, CheckpointTrigger, CriticalBlock, EvaluationResult,
    ExerciseCriterion, SoftFilter,
};
pub use router::{resolve_as_of, safety_router, EvaluateRequest, RuleView};
pub use rules::{
    CustomExclusion, RegistryError, Rule, RuleAction, RuleCategory, RuleRegistry, Severity,
};
pub use service::{SafetyEvaluationService, SafetyServiceError};
pub use surgery::{resolve_active_surgeries, ActiveSurgery};
pub use temporal::{months_since, weeks_since, EventDate};
