use std::collections::BTreeSet;
use std::io::Read;

use serde::{Deserialize, Deserializer};

use crate::safety::domain::{Exercise, ExerciseId};

#[derive(Debug)]
pub(crate) struct LibraryRecord {
    pub(crate) line: u64,
    pub(crate) row: LibraryRow,
}

pub(crate) fn parse_rows<R: Read>(reader: R) -> Result<Vec<LibraryRecord>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut records = Vec::new();

    for (index, record) in csv_reader.deserialize::<LibraryRow>().enumerate() {
        let row = record?;
        // Header occupies line 1.
        let line = index as u64 + 2;
        records.push(LibraryRecord { line, row });
    }

    Ok(records)
}

/// Exercise-library columns the safety engine reads. Other columns are ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct LibraryRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    slug: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    name: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pattern: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    target_muscles: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    secondary_muscles: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    binder_aware: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    heavy_binding_safe: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pelvic_floor_safe: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    contraindications: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    dysphoria_tags: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    post_op_safe_weeks: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    requires_mirror: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    requires_partner: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    is_aquatic: Option<String>,
}

impl LibraryRow {
    /// Slug first, numeric id as fallback.
    pub(crate) fn exercise_id(&self) -> Option<ExerciseId> {
        self.slug
            .as_ref()
            .or(self.id.as_ref())
            .map(|value| ExerciseId(value.clone()))
    }

    pub(crate) fn into_exercise(self) -> Result<Exercise, &'static str> {
        let id = self.exercise_id().ok_or("row has neither slug nor id")?;
        let pattern = self.pattern.clone().ok_or("row has no movement pattern")?;

        let mut muscle_groups: BTreeSet<String> = parse_list(self.target_muscles.as_deref())
            .into_iter()
            .map(|muscle| muscle.to_lowercase())
            .collect();
        muscle_groups.extend(
            parse_list(self.secondary_muscles.as_deref())
                .into_iter()
                .map(|muscle| muscle.to_lowercase()),
        );

        let dysphoria_tags: BTreeSet<String> = parse_list(self.dysphoria_tags.as_deref())
            .into_iter()
            .map(|tag| normalize_tag(&tag))
            .collect();

        let requires_mirror =
            parse_bool(self.requires_mirror.as_deref()) || dysphoria_tags.contains("mirror");
        let requires_partner =
            parse_bool(self.requires_partner.as_deref()) || dysphoria_tags.contains("partner");
        let is_aquatic =
            parse_bool(self.is_aquatic.as_deref()) || dysphoria_tags.contains("aquatic");

        Ok(Exercise {
            name: self.name.unwrap_or_else(|| id.0.clone()),
            id,
            pattern,
            muscle_groups,
            binder_aware: parse_bool(self.binder_aware.as_deref()),
            heavy_binding_safe: parse_bool(self.heavy_binding_safe.as_deref()),
            pelvic_floor_safe: parse_bool(self.pelvic_floor_safe.as_deref()),
            contraindications: parse_list(self.contraindications.as_deref())
                .into_iter()
                .map(|label| label.to_lowercase())
                .collect(),
            requires_mirror,
            requires_partner,
            is_aquatic,
            post_op_safe_weeks: parse_u32(self.post_op_safe_weeks.as_deref()),
            dysphoria_tags,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

/// Accepts `['a', 'b']`, `["a"]`, `[]` and plain `a, b`.
pub(crate) fn parse_list(value: Option<&str>) -> Vec<String> {
    let Some(value) = value.map(str::trim) else {
        return Vec::new();
    };
    let inner = value
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(value);

    inner
        .split(',')
        .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').trim())
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Safety flags are opt-in: anything but TRUE/1/YES reads as false.
pub(crate) fn parse_bool(value: Option<&str>) -> bool {
    value.is_some_and(|value| {
        matches!(
            value.trim().to_ascii_uppercase().as_str(),
            "TRUE" | "1" | "YES"
        )
    })
}

pub(crate) fn parse_u32(value: Option<&str>) -> Option<u32> {
    value.and_then(|value| value.trim().parse().ok())
}

fn normalize_tag(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
