use chrono::NaiveDate;

use super::domain::{DysphoriaTrigger, Exercise, HrtType, SafetyProfile, SurgeryType};
use super::surgery::ActiveSurgery;
use super::temporal::months_since;

/// Binding hours assumed when a binding profile omits its daily duration.
pub const ASSUMED_BINDING_HOURS: f32 = 8.0;

/// Read-only view handed to every rule predicate.
#[derive(Debug, Clone, Copy)]
pub struct EvaluationContext<'a> {
    pub profile: &'a SafetyProfile,
    pub active_surgeries: &'a [ActiveSurgery],
    pub exercise_pool: &'a [Exercise],
    pub now: NaiveDate,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(
        profile: &'a SafetyProfile,
        active_surgeries: &'a [ActiveSurgery],
        exercise_pool: &'a [Exercise],
        now: NaiveDate,
    ) -> Self {
        Self {
            profile,
            active_surgeries,
            exercise_pool,
            now,
        }
    }

    pub fn binds_chest(&self) -> bool {
        self.profile.binds_chest
    }

    /// Daily binding hours, or the lowest escalation tier when unreported.
    /// Non-finite or negative reports count as unreported.
    pub fn binding_hours(&self) -> f32 {
        self.profile
            .binding_duration_hours
            .filter(|hours| hours.is_finite() && *hours >= 0.0)
            .unwrap_or(ASSUMED_BINDING_HOURS)
    }

    /// Binds with a binder that is not known to be a purpose-built one.
    pub fn binds_with_unverified_binder(&self) -> bool {
        self.binds_chest()
            && self
                .profile
                .binder_type
                .map_or(true, |binder| !binder.is_verified())
    }

    /// Weeks since the controlling record of `surgery_type`, if one is active.
    pub fn weeks_post_op(&self, surgery_type: SurgeryType) -> Option<u32> {
        self.active_surgeries
            .iter()
            .find(|surgery| surgery.controlling && surgery.surgery_type == surgery_type)
            .map(|surgery| surgery.weeks_post_op)
    }

    pub fn post_op_within(&self, surgery_type: SurgeryType, from_week: u32, until_week: u32) -> bool {
        self.weeks_post_op(surgery_type)
            .is_some_and(|weeks| weeks >= from_week && weeks < until_week)
    }

    /// Most recent recovery across all controlling surgeries.
    pub fn shortest_recovery_weeks(&self) -> Option<u32> {
        self.active_surgeries
            .iter()
            .filter(|surgery| surgery.controlling)
            .map(|surgery| surgery.weeks_post_op)
            .min()
    }

    pub fn on_hrt(&self, hrt_type: HrtType) -> bool {
        self.profile.on_hrt && self.profile.hrt_type == Some(hrt_type)
    }

    /// Like [`on_hrt`](Self::on_hrt), but an unrecognized regimen also counts.
    /// Only protective rules use this.
    pub fn may_be_on_hrt(&self, hrt_type: HrtType) -> bool {
        self.on_hrt(hrt_type) || self.on_hrt(HrtType::Unrecognized)
    }

    /// Months on HRT; missing or malformed start dates read as just started.
    pub fn hrt_months(&self) -> u32 {
        months_since(self.profile.hrt_start_date.as_ref(), self.now)
    }

    pub fn has_trigger(&self, trigger: DysphoriaTrigger) -> bool {
        self.profile.dysphoria_triggers.contains(&trigger)
    }
}
