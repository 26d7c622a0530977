use super::{Rule, RuleAction, RuleCategory, Severity};
use crate::safety::domain::HrtType;
use crate::safety::parameters::{ParameterKey, ParameterValue};
use crate::safety::result::{CheckpointKind, CheckpointTrigger};

pub(super) fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "testosterone_early_tendon_protection",
            category: RuleCategory::Hrt,
            severity: Severity::High,
            message: "First months on testosterone: strength rises faster than tendons adapt, so volume is reduced.",
            predicate: |ctx| ctx.may_be_on_hrt(HrtType::Testosterone) && ctx.hrt_months() <= 3,
            action: RuleAction::modify(vec![(
                ParameterKey::VolumeReductionPercent,
                ParameterValue::Amount(20),
            )]),
        },
        Rule {
            id: "testosterone_tendon_warmup",
            category: RuleCategory::Hrt,
            severity: Severity::Low,
            message: "Use a longer warm-up while your tendons catch up with new strength.",
            predicate: |ctx| ctx.may_be_on_hrt(HrtType::Testosterone) && ctx.hrt_months() < 6,
            action: RuleAction::checkpoint(
                CheckpointKind::WarmUp,
                CheckpointTrigger::SessionStart,
                "Warm-up: add two lighter ramp-up sets before your first working set.",
                Severity::Low,
            ),
        },
        Rule {
            id: "testosterone_progression_window",
            category: RuleCategory::Hrt,
            severity: Severity::Low,
            message: "Months 6-12 on testosterone: load can progress a little faster.",
            predicate: |ctx| {
                ctx.on_hrt(HrtType::Testosterone) && (6..=12).contains(&ctx.hrt_months())
            },
            action: RuleAction::modify(vec![(
                ParameterKey::ProgressionCeilingPercent,
                ParameterValue::Amount(10),
            )]),
        },
        Rule {
            id: "estrogen_recovery_baseline",
            category: RuleCategory::Hrt,
            severity: Severity::High,
            message: "On estrogen: recovery between sessions is extended rather than cutting volume.",
            predicate: |ctx| ctx.may_be_on_hrt(HrtType::Estrogen),
            action: RuleAction::modify(vec![(
                ParameterKey::RecoveryMultiplier,
                ParameterValue::Factor(1.1),
            )]),
        },
        Rule {
            id: "estrogen_recovery_early",
            category: RuleCategory::Hrt,
            severity: Severity::High,
            message: "First 6 months on estrogen: recovery time is extended further while muscle mass shifts.",
            predicate: |ctx| ctx.may_be_on_hrt(HrtType::Estrogen) && ctx.hrt_months() < 6,
            action: RuleAction::modify(vec![(
                ParameterKey::RecoveryMultiplier,
                ParameterValue::Factor(1.2),
            )]),
        },
    ]
}
