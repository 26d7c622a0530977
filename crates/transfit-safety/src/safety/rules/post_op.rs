use super::{Rule, RuleAction, RuleCategory, Severity};
use crate::safety::domain::SurgeryType;
use crate::safety::parameters::{ParameterKey, ParameterValue};
use crate::safety::result::{CheckpointKind, CheckpointTrigger, ExerciseCriterion};

const LIGHT_LOAD: &str = "light (5-15 lbs)";
const LOWER_BODY_PATTERNS: [&str; 4] = ["squat", "hinge", "lunge", "core"];
const LOWER_BODY_GROUPS: [&str; 2] = ["adductors", "abs"];

pub(super) fn rules() -> Vec<Rule> {
    let mut rules = upper_body_rules();
    rules.extend(lower_body_rules());
    rules.extend(other_rules());
    rules
}

fn upper_body_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "top_surgery_early_block",
            category: RuleCategory::PostOp,
            severity: Severity::Critical,
            message: "Under 6 weeks after top surgery: pushing, pulling and overhead work are blocked to protect incisions.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::TopSurgery, 0, 6),
            action: RuleAction::block(&["push", "pull", "overhead"], &["pectorals", "lats", "delts"]),
        },
        Rule {
            id: "top_surgery_return_to_load",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Weeks 6-12 after top surgery: upper-body loading returns with light weights, 2 sets and longer rest.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::TopSurgery, 6, 12),
            action: RuleAction::modify(vec![
                (ParameterKey::MaxWeight, ParameterValue::text(LIGHT_LOAD)),
                (ParameterKey::MaxSets, ParameterValue::Amount(2)),
                (ParameterKey::RepRange, ParameterValue::text("12-15")),
                (ParameterKey::RestSecondsIncrease, ParameterValue::Amount(30)),
            ]),
        },
        Rule {
            id: "top_surgery_scar_care",
            category: RuleCategory::PostOp,
            severity: Severity::Low,
            message: "Scar care after top surgery: moisturize and massage scars once cleared.",
            predicate: |ctx| ctx.weeks_post_op(SurgeryType::TopSurgery).is_some_and(|weeks| weeks >= 6),
            action: RuleAction::checkpoint(
                CheckpointKind::ScarCare,
                CheckpointTrigger::PostWorkout,
                "Scar care: check your scars for irritation and keep them moisturized.",
                Severity::Low,
            ),
        },
        Rule {
            id: "breast_augmentation_early_block",
            category: RuleCategory::PostOp,
            severity: Severity::Critical,
            message: "Under 6 weeks after breast augmentation: chest pressing is blocked while implants settle.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::BreastAugmentation, 0, 6),
            action: RuleAction::block(&["push"], &["pectorals"]),
        },
        Rule {
            id: "breast_augmentation_return_to_load",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Weeks 6-12 after breast augmentation: chest work returns light, capped at 3 sets.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::BreastAugmentation, 6, 12),
            action: RuleAction::modify(vec![
                (ParameterKey::MaxSets, ParameterValue::Amount(3)),
                (ParameterKey::MaxWeight, ParameterValue::text(LIGHT_LOAD)),
            ]),
        },
        Rule {
            id: "breast_augmentation_scar_care",
            category: RuleCategory::PostOp,
            severity: Severity::Low,
            message: "Scar care after breast augmentation: watch for irritation around incisions.",
            predicate: |ctx| {
                ctx.weeks_post_op(SurgeryType::BreastAugmentation)
                    .is_some_and(|weeks| weeks >= 6)
            },
            action: RuleAction::checkpoint(
                CheckpointKind::ScarCare,
                CheckpointTrigger::PostWorkout,
                "Scar care: check your scars for irritation and keep them moisturized.",
                Severity::Low,
            ),
        },
        Rule {
            id: "ffs_early_block",
            category: RuleCategory::PostOp,
            severity: Severity::Critical,
            message: "Under 4 weeks after facial surgery: jumping and inverted positions are blocked to limit swelling.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Ffs, 0, 4),
            action: RuleAction::block(&["plyometric", "inversion"], &[]),
        },
        Rule {
            id: "ffs_return_to_load",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Weeks 4-8 after facial surgery: intensity stays reduced with longer rest.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Ffs, 4, 8),
            action: RuleAction::modify(vec![
                (ParameterKey::VolumeReductionPercent, ParameterValue::Amount(20)),
                (ParameterKey::RestSecondsIncrease, ParameterValue::Amount(30)),
            ]),
        },
    ]
}

fn lower_body_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "vaginoplasty_early_block",
            category: RuleCategory::PostOp,
            severity: Severity::Critical,
            message: "Under 12 weeks after vaginoplasty: squats, hinges, lunges and core loading are blocked.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Vaginoplasty, 0, 12),
            action: RuleAction::block(&LOWER_BODY_PATTERNS, &LOWER_BODY_GROUPS),
        },
        Rule {
            id: "vaginoplasty_pelvic_floor_exclusion",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Under 24 weeks after vaginoplasty: only pelvic-floor-safe exercises are offered.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Vaginoplasty, 0, 24),
            action: RuleAction::exclude(vec![ExerciseCriterion::NotPelvicFloorSafe]),
        },
        Rule {
            id: "vaginoplasty_return_to_load",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Weeks 12-24 after vaginoplasty: lower-body volume returns gradually, capped at 3 sets.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Vaginoplasty, 12, 24),
            action: RuleAction::modify(vec![
                (ParameterKey::VolumeReductionPercent, ParameterValue::Amount(30)),
                (ParameterKey::MaxSets, ParameterValue::Amount(3)),
            ]),
        },
        Rule {
            id: "vaginoplasty_pelvic_floor_check",
            category: RuleCategory::PostOp,
            severity: Severity::Low,
            message: "Plan sessions around your dilation schedule and stop at any pelvic pressure.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Vaginoplasty, 0, 24),
            action: RuleAction::checkpoint(
                CheckpointKind::PelvicFloorCheck,
                CheckpointTrigger::BetweenSets,
                "Pelvic floor check: stop if you notice pressure, pain or bleeding.",
                Severity::High,
            ),
        },
        Rule {
            id: "phalloplasty_early_block",
            category: RuleCategory::PostOp,
            severity: Severity::Critical,
            message: "Under 12 weeks after phalloplasty: squats, hinges, lunges and core loading are blocked.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Phalloplasty, 0, 12),
            action: RuleAction::block(&LOWER_BODY_PATTERNS, &LOWER_BODY_GROUPS),
        },
        Rule {
            id: "phalloplasty_donor_site_block",
            category: RuleCategory::PostOp,
            severity: Severity::Critical,
            message: "Under 8 weeks after phalloplasty: gripping and carrying are blocked to protect the donor site.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Phalloplasty, 0, 8),
            action: RuleAction::block(&["carry"], &["forearms"]),
        },
        Rule {
            id: "phalloplasty_pelvic_floor_exclusion",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Under 24 weeks after phalloplasty: only pelvic-floor-safe exercises are offered.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Phalloplasty, 0, 24),
            action: RuleAction::exclude(vec![ExerciseCriterion::NotPelvicFloorSafe]),
        },
        Rule {
            id: "phalloplasty_return_to_load",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Weeks 12-24 after phalloplasty: lower-body volume returns gradually, capped at 3 sets.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Phalloplasty, 12, 24),
            action: RuleAction::modify(vec![
                (ParameterKey::VolumeReductionPercent, ParameterValue::Amount(30)),
                (ParameterKey::MaxSets, ParameterValue::Amount(3)),
            ]),
        },
        Rule {
            id: "metoidioplasty_early_block",
            category: RuleCategory::PostOp,
            severity: Severity::Critical,
            message: "Under 6 weeks after metoidioplasty: squats, hinges and lunges are blocked.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Metoidioplasty, 0, 6),
            action: RuleAction::block(&["squat", "hinge", "lunge"], &["adductors"]),
        },
        Rule {
            id: "metoidioplasty_pelvic_floor_exclusion",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Under 12 weeks after metoidioplasty: only pelvic-floor-safe exercises are offered.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Metoidioplasty, 0, 12),
            action: RuleAction::exclude(vec![ExerciseCriterion::NotPelvicFloorSafe]),
        },
        Rule {
            id: "metoidioplasty_return_to_load",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Weeks 6-12 after metoidioplasty: lower-body volume stays reduced.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Metoidioplasty, 6, 12),
            action: RuleAction::modify(vec![(
                ParameterKey::VolumeReductionPercent,
                ParameterValue::Amount(20),
            )]),
        },
        Rule {
            id: "orchiectomy_early_block",
            category: RuleCategory::PostOp,
            severity: Severity::Critical,
            message: "Under 2 weeks after orchiectomy: squats and hinges are blocked.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Orchiectomy, 0, 2),
            action: RuleAction::block(&["squat", "hinge"], &["adductors"]),
        },
        Rule {
            id: "orchiectomy_return_to_load",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Weeks 2-6 after orchiectomy: volume stays reduced.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Orchiectomy, 2, 6),
            action: RuleAction::modify(vec![(
                ParameterKey::VolumeReductionPercent,
                ParameterValue::Amount(15),
            )]),
        },
        Rule {
            id: "hysterectomy_early_block",
            category: RuleCategory::PostOp,
            severity: Severity::Critical,
            message: "Under 8 weeks after hysterectomy: hinging and core loading are blocked.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Hysterectomy, 0, 8),
            action: RuleAction::block(&["hinge", "core"], &["abs"]),
        },
        Rule {
            id: "hysterectomy_pelvic_floor_exclusion",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Under 12 weeks after hysterectomy: only pelvic-floor-safe exercises are offered.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Hysterectomy, 0, 12),
            action: RuleAction::exclude(vec![ExerciseCriterion::NotPelvicFloorSafe]),
        },
        Rule {
            id: "hysterectomy_return_to_load",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Weeks 8-12 after hysterectomy: volume stays reduced with longer rest.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Hysterectomy, 8, 12),
            action: RuleAction::modify(vec![
                (ParameterKey::VolumeReductionPercent, ParameterValue::Amount(20)),
                (ParameterKey::RestSecondsIncrease, ParameterValue::Amount(30)),
            ]),
        },
    ]
}

fn other_rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "other_surgery_recovery",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Under 6 weeks after surgery: overall volume is reduced until your surgeon clears you.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Other, 0, 6),
            action: RuleAction::modify(vec![(
                ParameterKey::VolumeReductionPercent,
                ParameterValue::Amount(30),
            )]),
        },
        Rule {
            id: "other_surgery_symptom_check",
            category: RuleCategory::PostOp,
            severity: Severity::Low,
            message: "Check in with how your recovery feels before each session.",
            predicate: |ctx| ctx.post_op_within(SurgeryType::Other, 0, 6),
            action: RuleAction::checkpoint(
                CheckpointKind::SymptomCheck,
                CheckpointTrigger::SessionStart,
                "Recovery check: skip today if you have new pain, swelling or fever.",
                Severity::High,
            ),
        },
        Rule {
            id: "post_op_exercise_clearance",
            category: RuleCategory::PostOp,
            severity: Severity::High,
            message: "Exercises not yet cleared for your recovery stage are removed.",
            predicate: |ctx| ctx.shortest_recovery_weeks().is_some(),
            action: RuleAction::exclude_with(
                "postOpSafeWeeks beyond current recovery",
                |ctx, exercise| match (exercise.post_op_safe_weeks, ctx.shortest_recovery_weeks()) {
                    (Some(required), Some(elapsed)) => elapsed < required,
                    _ => false,
                },
            ),
        },
    ]
}
