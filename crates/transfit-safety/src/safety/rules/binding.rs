use super::{Rule, RuleAction, RuleCategory, Severity};
use crate::safety::parameters::{ParameterKey, ParameterValue};
use crate::safety::result::{CheckpointKind, CheckpointTrigger, ExerciseCriterion};

const EXTENDED_BINDING_HOURS: f32 = 8.0;
const PROLONGED_BINDING_HOURS: f32 = 10.0;
const BINDER_BREAK_MINUTES: u32 = 20;

pub(super) fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "binding_break_reminder",
            category: RuleCategory::Binding,
            severity: Severity::Low,
            message: "Take a short binder break every 20 minutes to let your ribs fully expand.",
            predicate: |ctx| ctx.binds_chest(),
            action: RuleAction::checkpoint(
                CheckpointKind::BinderBreak,
                CheckpointTrigger::EveryMinutes {
                    minutes: BINDER_BREAK_MINUTES,
                },
                "Binder break: loosen or lift your binder and take five slow, deep breaths.",
                Severity::Low,
            ),
        },
        Rule {
            id: "binding_post_workout_removal",
            category: RuleCategory::Binding,
            severity: Severity::High,
            message: "Remove your binder after training so your chest and skin can recover.",
            predicate: |ctx| ctx.binds_chest(),
            action: RuleAction::checkpoint(
                CheckpointKind::BinderRemoval,
                CheckpointTrigger::PostWorkout,
                "Workout done: take your binder off and give your ribs a rest.",
                Severity::High,
            ),
        },
        Rule {
            id: "binding_prefer_binder_aware",
            category: RuleCategory::Binding,
            severity: Severity::Low,
            message: "Exercises designed around binding are ranked first.",
            predicate: |ctx| ctx.binds_chest(),
            action: RuleAction::soft_filter(vec![ExerciseCriterion::NotBinderAware], 0.4),
        },
        Rule {
            id: "binding_daily_breathing_check",
            category: RuleCategory::Binding,
            severity: Severity::Low,
            message: "Daily binding limits breathing capacity; check your breath between sets.",
            predicate: |ctx| ctx.binds_chest() && ctx.profile.binding_frequency.is_daily(),
            action: RuleAction::checkpoint(
                CheckpointKind::BreathingCheck,
                CheckpointTrigger::BetweenSets,
                "Breathing check: if you can't take a full breath, rest longer before the next set.",
                Severity::Low,
            ),
        },
        Rule {
            id: "binding_extended_duration",
            category: RuleCategory::Binding,
            severity: Severity::High,
            message: "Binding 8+ hours a day: volume is reduced and rest periods are extended.",
            predicate: |ctx| ctx.binds_chest() && ctx.binding_hours() >= EXTENDED_BINDING_HOURS,
            action: RuleAction::modify(vec![
                (ParameterKey::VolumeReductionPercent, ParameterValue::Amount(15)),
                (ParameterKey::RestSecondsIncrease, ParameterValue::Amount(30)),
            ]),
        },
        Rule {
            id: "binding_heavy_load_exclusion",
            category: RuleCategory::Binding,
            severity: Severity::High,
            message: "Heavy compressive loading is removed while binding for long days or with an unverified binder.",
            predicate: |ctx| {
                ctx.binds_chest()
                    && (ctx.binding_hours() >= EXTENDED_BINDING_HOURS
                        || ctx.binds_with_unverified_binder())
            },
            action: RuleAction::exclude(vec![ExerciseCriterion::NotHeavyBindingSafe]),
        },
        Rule {
            id: "binding_overhead_volume_cap",
            category: RuleCategory::Binding,
            severity: Severity::High,
            message: "Binding 10+ hours a day: overhead work is capped at 2 sets.",
            predicate: |ctx| ctx.binds_chest() && ctx.binding_hours() >= PROLONGED_BINDING_HOURS,
            action: RuleAction::modify(vec![(
                ParameterKey::MaxOverheadSets,
                ParameterValue::Amount(2),
            )]),
        },
        Rule {
            id: "binding_unsafe_binder",
            category: RuleCategory::Binding,
            severity: Severity::Critical,
            message: "ACE bandages, DIY and unverified binders restrict breathing; sessions are capped at 30 minutes.",
            predicate: |ctx| ctx.binds_with_unverified_binder(),
            action: RuleAction::modify(vec![(
                ParameterKey::MaxWorkoutMinutes,
                ParameterValue::Amount(30),
            )]),
        },
    ]
}
