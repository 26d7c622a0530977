use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::temporal::EventDate;

/// Identifier wrapper for the user a profile belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier wrapper for catalog exercises.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ExerciseId(pub String);

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Medical and physiological safety profile supplied whole for every evaluation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyProfile {
    #[serde(default)]
    pub user_id: UserId,
    #[serde(default)]
    pub binds_chest: bool,
    #[serde(default)]
    pub binding_frequency: BindingFrequency,
    #[serde(default)]
    pub binding_duration_hours: Option<f32>,
    #[serde(default)]
    pub binder_type: Option<BinderType>,
    #[serde(default)]
    pub on_hrt: bool,
    #[serde(default)]
    pub hrt_type: Option<HrtType>,
    #[serde(default)]
    pub hrt_start_date: Option<EventDate>,
    #[serde(default)]
    pub surgeries: Vec<Surgery>,
    #[serde(default)]
    pub dysphoria_triggers: BTreeSet<DysphoriaTrigger>,
    #[serde(default)]
    pub surgeon_cleared: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BindingFrequency {
    #[default]
    Never,
    Sometimes,
    Daily,
    #[serde(other)]
    Unrecognized,
}

impl BindingFrequency {
    /// Unrecognized frequencies read as daily binding.
    pub const fn is_daily(self) -> bool {
        matches!(self, Self::Daily | Self::Unrecognized)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BinderType {
    Commercial,
    SportsBinder,
    AceBandage,
    Diy,
    #[serde(other)]
    Unrecognized,
}

impl BinderType {
    /// Binders that compress without distributing load across the ribcage.
    pub const fn is_unsafe(self) -> bool {
        matches!(self, Self::AceBandage | Self::Diy)
    }

    /// Purpose-built binders; anything else is treated as unverified.
    pub const fn is_verified(self) -> bool {
        matches!(self, Self::Commercial | Self::SportsBinder)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HrtType {
    Testosterone,
    Estrogen,
    /// Regimen the engine does not know. Receives the protective rules of
    /// every known regimen and none of the progression allowances.
    #[serde(other)]
    Unrecognized,
}

/// A recorded surgery. Several records of one type may coexist (original and revision).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surgery {
    #[serde(rename = "type")]
    pub surgery_type: SurgeryType,
    #[serde(default)]
    pub date: Option<EventDate>,
    #[serde(default)]
    pub fully_healed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurgeryType {
    TopSurgery,
    #[serde(alias = "bottomSurgery")]
    Vaginoplasty,
    Phalloplasty,
    Metoidioplasty,
    Orchiectomy,
    Ffs,
    BreastAugmentation,
    Hysterectomy,
    #[serde(other)]
    Other,
}

impl SurgeryType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::TopSurgery => "top surgery",
            Self::Vaginoplasty => "vaginoplasty",
            Self::Phalloplasty => "phalloplasty",
            Self::Metoidioplasty => "metoidioplasty",
            Self::Orchiectomy => "orchiectomy",
            Self::Ffs => "facial feminization surgery",
            Self::BreastAugmentation => "breast augmentation",
            Self::Hysterectomy => "hysterectomy",
            Self::Other => "surgery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DysphoriaTrigger {
    LookingAtChest,
    Mirrors,
    BodyContact,
    CrowdedSpaces,
    TightClothing,
    Photos,
    Swimming,
    FormFocused,
    LockerRooms,
    #[serde(other)]
    Unrecognized,
}

impl DysphoriaTrigger {
    /// Catalog tag that marks exercises touching this trigger.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::LookingAtChest => "looking_at_chest",
            Self::Mirrors => "mirrors",
            Self::BodyContact => "body_contact",
            Self::CrowdedSpaces => "crowded_spaces",
            Self::TightClothing => "tight_clothing",
            Self::Photos => "photos",
            Self::Swimming => "swimming",
            Self::FormFocused => "form_focused",
            Self::LockerRooms => "locker_rooms",
            Self::Unrecognized => "unrecognized",
        }
    }
}

/// Candidate exercise as supplied by the catalog. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: ExerciseId,
    #[serde(default)]
    pub name: String,
    pub pattern: String,
    #[serde(default)]
    pub muscle_groups: BTreeSet<String>,
    #[serde(default)]
    pub binder_aware: bool,
    #[serde(default)]
    pub heavy_binding_safe: bool,
    #[serde(default)]
    pub pelvic_floor_safe: bool,
    #[serde(default)]
    pub contraindications: BTreeSet<String>,
    #[serde(default)]
    pub requires_mirror: bool,
    #[serde(default)]
    pub requires_partner: bool,
    #[serde(default)]
    pub is_aquatic: bool,
    #[serde(default)]
    pub post_op_safe_weeks: Option<u32>,
    #[serde(default)]
    pub dysphoria_tags: BTreeSet<String>,
}

impl Exercise {
    /// True when any word segment of the movement pattern equals `token`.
    pub fn has_pattern(&self, token: &str) -> bool {
        self.pattern
            .split(|c: char| !c.is_ascii_alphanumeric())
            .any(|segment| !segment.is_empty() && segment.eq_ignore_ascii_case(token))
    }

    pub fn works_muscle_group(&self, group: &str) -> bool {
        self.muscle_groups
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(group))
    }

    pub fn has_contraindication(&self, label: &str) -> bool {
        self.contraindications
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(label))
    }

    pub fn has_dysphoria_tag(&self, tag: &str) -> bool {
        self.dysphoria_tags
            .iter()
            .any(|candidate| candidate.eq_ignore_ascii_case(tag))
    }
}
