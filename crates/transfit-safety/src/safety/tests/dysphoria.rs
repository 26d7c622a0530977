use super::common::*;
use crate::safety::domain::{BinderType, DysphoriaTrigger, SafetyProfile};
use crate::safety::result::ExerciseCriterion;
use crate::safety::rules::RuleCategory;

fn with_triggers(triggers: &[DysphoriaTrigger]) -> SafetyProfile {
    let mut profile = profile();
    profile.dysphoria_triggers = triggers.iter().copied().collect();
    profile
}

#[test]
fn mirror_trigger_excludes_mirror_exercises() {
    let result = evaluate(&with_triggers(&[DysphoriaTrigger::Mirrors]));

    assert_eq!(
        result.exclusion_criteria,
        vec![ExerciseCriterion::RequiresMirror]
    );
    assert!(result.is_excluded(&id("mirror-flow")));
    assert!(!result.is_excluded(&id("partner-stretch")));
}

#[test]
fn many_triggers_leave_at_most_three_hard_exclusions() {
    let triggers = [
        DysphoriaTrigger::LookingAtChest,
        DysphoriaTrigger::Mirrors,
        DysphoriaTrigger::BodyContact,
        DysphoriaTrigger::CrowdedSpaces,
        DysphoriaTrigger::TightClothing,
        DysphoriaTrigger::Photos,
        DysphoriaTrigger::Swimming,
        DysphoriaTrigger::FormFocused,
    ];

    let result = evaluate(&with_triggers(&triggers));

    assert!(result.exclusion_criteria.len() <= 3);
    assert!(result.exclusion_criteria.contains(&ExerciseCriterion::RequiresPartner));
    assert!(result.exclusion_criteria.contains(&ExerciseCriterion::IsAquatic));
    assert_eq!(result.soft_filters.len(), 5);
    assert!(result.critical_blocks.is_empty());
    assert_eq!(result.excluded_exercises.len(), 3);
    assert!(pool().len() > result.excluded_exercises.len());
    assert_eq!(result.rules_in(RuleCategory::Dysphoria).count(), 8);
}

#[test]
fn chest_trigger_deprioritizes_without_removing() {
    let result = evaluate(&with_triggers(&[
        DysphoriaTrigger::LookingAtChest,
        DysphoriaTrigger::CrowdedSpaces,
    ]));

    assert!(!result.is_excluded(&id("bench-press")));
    assert!((result.penalty_for(&id("bench-press")) - 0.6).abs() < 1e-6);
    assert!((result.penalty_for(&id("incline-walk")) - 0.3).abs() < 1e-6);
    assert_eq!(result.penalty_for(&id("glute-bridge")), 0.0);
}

#[test]
fn penalties_from_different_triggers_sum_per_exercise() {
    let mut profile = binding_profile(Some(4.0), Some(BinderType::Commercial));
    profile.dysphoria_triggers = [DysphoriaTrigger::LookingAtChest].into_iter().collect();

    let result = evaluate(&profile);

    assert!((result.penalty_for(&id("bench-press")) - 1.0).abs() < 1e-6);
}

#[test]
fn unrecognized_triggers_have_no_effect() {
    let profile: SafetyProfile = serde_json::from_value(serde_json::json!({
        "userId": "user-2",
        "dysphoriaTriggers": ["gymSelfies"],
    }))
    .expect("profile deserializes");
    assert!(profile
        .dysphoria_triggers
        .contains(&DysphoriaTrigger::Unrecognized));

    let result = evaluate(&profile);

    assert!(result.rules_applied.is_empty());
    assert!(result.soft_filter_penalties.is_empty());
}
