//! Dysphoria triggers map to hard exclusions only where the exercise itself
//! cannot be done without the trigger (mirror, partner, water). Everything
//! else deprioritizes so that many triggers still leave a usable pool.

use super::{Rule, RuleAction, RuleCategory, Severity};
use crate::safety::domain::DysphoriaTrigger;
use crate::safety::result::ExerciseCriterion;

fn tag(trigger: DysphoriaTrigger) -> ExerciseCriterion {
    ExerciseCriterion::DysphoriaTag(trigger.tag().to_string())
}

pub(super) fn rules() -> Vec<Rule> {
    vec![
        Rule {
            id: "dysphoria_mirror_exclusion",
            category: RuleCategory::Dysphoria,
            severity: Severity::High,
            message: "Exercises that need a mirror are removed.",
            predicate: |ctx| ctx.has_trigger(DysphoriaTrigger::Mirrors),
            action: RuleAction::exclude(vec![ExerciseCriterion::RequiresMirror]),
        },
        Rule {
            id: "dysphoria_partner_exclusion",
            category: RuleCategory::Dysphoria,
            severity: Severity::High,
            message: "Partner and contact exercises are removed.",
            predicate: |ctx| ctx.has_trigger(DysphoriaTrigger::BodyContact),
            action: RuleAction::exclude(vec![ExerciseCriterion::RequiresPartner]),
        },
        Rule {
            id: "dysphoria_aquatic_exclusion",
            category: RuleCategory::Dysphoria,
            severity: Severity::High,
            message: "Pool and aquatic exercises are removed.",
            predicate: |ctx| ctx.has_trigger(DysphoriaTrigger::Swimming),
            action: RuleAction::exclude(vec![ExerciseCriterion::IsAquatic]),
        },
        Rule {
            id: "dysphoria_chest_focus_filter",
            category: RuleCategory::Dysphoria,
            severity: Severity::Low,
            message: "Chest-focused exercises are ranked lower.",
            predicate: |ctx| ctx.has_trigger(DysphoriaTrigger::LookingAtChest),
            action: RuleAction::soft_filter(
                vec![
                    ExerciseCriterion::MuscleGroup("pectorals".to_string()),
                    tag(DysphoriaTrigger::LookingAtChest),
                ],
                0.6,
            ),
        },
        Rule {
            id: "dysphoria_crowded_spaces_filter",
            category: RuleCategory::Dysphoria,
            severity: Severity::Low,
            message: "Exercises that usually need a busy gym floor are ranked lower.",
            predicate: |ctx| ctx.has_trigger(DysphoriaTrigger::CrowdedSpaces),
            action: RuleAction::soft_filter(vec![tag(DysphoriaTrigger::CrowdedSpaces)], 0.3),
        },
        Rule {
            id: "dysphoria_tight_clothing_filter",
            category: RuleCategory::Dysphoria,
            severity: Severity::Low,
            message: "Exercises that typically call for fitted clothing are ranked lower.",
            predicate: |ctx| ctx.has_trigger(DysphoriaTrigger::TightClothing),
            action: RuleAction::soft_filter(vec![tag(DysphoriaTrigger::TightClothing)], 0.4),
        },
        Rule {
            id: "dysphoria_photos_filter",
            category: RuleCategory::Dysphoria,
            severity: Severity::Low,
            message: "Exercises that rely on photo or video form checks are ranked lower.",
            predicate: |ctx| ctx.has_trigger(DysphoriaTrigger::Photos),
            action: RuleAction::soft_filter(vec![tag(DysphoriaTrigger::Photos)], 0.2),
        },
        Rule {
            id: "dysphoria_form_focus_filter",
            category: RuleCategory::Dysphoria,
            severity: Severity::Low,
            message: "Exercises that demand close attention to body shape are ranked lower.",
            predicate: |ctx| ctx.has_trigger(DysphoriaTrigger::FormFocused),
            action: RuleAction::soft_filter(vec![tag(DysphoriaTrigger::FormFocused)], 0.3),
        },
        Rule {
            id: "dysphoria_locker_room_filter",
            category: RuleCategory::Dysphoria,
            severity: Severity::Low,
            message: "Exercises that usually involve changing at the gym are ranked lower.",
            predicate: |ctx| ctx.has_trigger(DysphoriaTrigger::LockerRooms),
            action: RuleAction::soft_filter(vec![tag(DysphoriaTrigger::LockerRooms)], 0.2),
        },
    ]
}
