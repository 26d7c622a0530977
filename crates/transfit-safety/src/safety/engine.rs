use chrono::NaiveDate;
use tracing::{debug, info};

use super::accumulator::Accumulator;
use super::context::EvaluationContext;
use super::domain::{Exercise, SafetyProfile};
use super::result::{AppliedRule, EvaluationResult};
use super::rules::{RegistryError, RuleCategory, RuleRegistry};
use super::surgery::resolve_active_surgeries;

/// Pure evaluator: the same profile, pool and date always produce the same result.
#[derive(Debug, Clone)]
pub struct SafetyEngine {
    registry: RuleRegistry,
}

impl SafetyEngine {
    pub fn new(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    pub fn standard() -> Result<Self, RegistryError> {
        RuleRegistry::standard().map(Self::new)
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Evaluate `profile` against `exercises` as of `now`.
    ///
    /// Categories run in a fixed order and rules keep registry order within
    /// a category, so last-wins parameters resolve deterministically.
    pub fn evaluate(
        &self,
        profile: &SafetyProfile,
        exercises: &[Exercise],
        now: NaiveDate,
    ) -> EvaluationResult {
        let active_surgeries = resolve_active_surgeries(&profile.surgeries, now);
        let context = EvaluationContext::new(profile, &active_surgeries, exercises, now);

        let mut accumulator = Accumulator::default();
        let mut rules_applied = Vec::new();

        for category in RuleCategory::ordered() {
            for rule in self.registry.rules_in(category) {
                if !rule.matches(&context) {
                    continue;
                }

                debug!(rule_id = rule.id, category = category.label(), "safety rule matched");
                accumulator.apply(&rule.action, &context);
                rules_applied.push(AppliedRule {
                    rule_id: rule.id.to_string(),
                    category: rule.category,
                    severity: rule.severity,
                    user_message: rule.user_message(&context),
                });
            }
        }

        let result = accumulator.finalize(rules_applied, &context);

        info!(
            user_id = %profile.user_id,
            %now,
            rules_applied = result.rules_applied.len(),
            critical_blocks = result.critical_blocks.len(),
            excluded_exercises = result.excluded_exercises.len(),
            pool = exercises.len(),
            "safety evaluation complete"
        );

        result
    }
}
