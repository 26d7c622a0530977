use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{Surgery, SurgeryType};
use super::temporal::{weeks_since, EventDate};

/// Surgery record that still imposes restrictions at evaluation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSurgery {
    #[serde(rename = "type")]
    pub surgery_type: SurgeryType,
    pub weeks_post_op: u32,
    pub controlling: bool,
}

/// Normalize surgery records into the per-type view consumed by post-op rules.
///
/// Healed records are dropped. Within each type the record with the latest
/// effective date controls (missing, unparsable and future dates count as
/// `now`); on equal dates the later list entry wins. Remaining unhealed
/// records of that type are reported with `controlling: false`. Output is
/// ordered by surgery type, controlling record first.
pub fn resolve_active_surgeries(surgeries: &[Surgery], now: NaiveDate) -> Vec<ActiveSurgery> {
    let mut by_type: BTreeMap<SurgeryType, Vec<(usize, &Surgery)>> = BTreeMap::new();
    for (position, surgery) in surgeries.iter().enumerate() {
        if surgery.fully_healed {
            continue;
        }
        by_type
            .entry(surgery.surgery_type)
            .or_default()
            .push((position, surgery));
    }

    let mut active = Vec::new();
    for (surgery_type, mut records) in by_type {
        records.sort_by_key(|(position, surgery)| {
            (EventDate::effective(surgery.date.as_ref(), now), *position)
        });

        for (rank, (_, surgery)) in records.iter().rev().enumerate() {
            active.push(ActiveSurgery {
                surgery_type,
                weeks_post_op: weeks_since(surgery.date.as_ref(), now),
                controlling: rank == 0,
            });
        }
    }

    active
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 30).expect("valid date")
    }

    fn surgery(surgery_type: SurgeryType, weeks_ago: Option<i64>, fully_healed: bool) -> Surgery {
        Surgery {
            surgery_type,
            date: weeks_ago.map(|weeks| EventDate::from(now() - chrono::Duration::weeks(weeks))),
            fully_healed,
        }
    }

    #[test]
    fn healed_records_never_control() {
        let records = vec![
            surgery(SurgeryType::TopSurgery, Some(52), true),
            surgery(SurgeryType::TopSurgery, Some(3), false),
        ];

        let active = resolve_active_surgeries(&records, now());

        assert_eq!(
            active,
            vec![ActiveSurgery {
                surgery_type: SurgeryType::TopSurgery,
                weeks_post_op: 3,
                controlling: true,
            }]
        );
    }

    #[test]
    fn fully_healed_type_contributes_nothing() {
        let records = vec![
            surgery(SurgeryType::Hysterectomy, Some(2), true),
            surgery(SurgeryType::Hysterectomy, None, true),
        ];

        assert!(resolve_active_surgeries(&records, now()).is_empty());
    }

    #[test]
    fn most_recent_unhealed_record_controls_and_older_ones_are_kept() {
        let records = vec![
            surgery(SurgeryType::Phalloplasty, Some(3), false),
            surgery(SurgeryType::Phalloplasty, Some(30), false),
        ];

        let active = resolve_active_surgeries(&records, now());

        assert_eq!(active.len(), 2);
        assert!(active[0].controlling);
        assert_eq!(active[0].weeks_post_op, 3);
        assert!(!active[1].controlling);
        assert_eq!(active[1].weeks_post_op, 30);
    }

    #[test]
    fn undated_record_is_treated_as_most_recent() {
        let records = vec![
            surgery(SurgeryType::TopSurgery, None, false),
            surgery(SurgeryType::TopSurgery, Some(10), false),
        ];

        let active = resolve_active_surgeries(&records, now());

        let controlling = active.iter().find(|entry| entry.controlling).expect("controller");
        assert_eq!(controlling.weeks_post_op, 0);
    }

    #[test]
    fn equal_dates_prefer_the_later_registered_record() {
        let mut first = surgery(SurgeryType::Ffs, None, false);
        first.date = Some(EventDate::new("not a date"));
        let second = surgery(SurgeryType::Ffs, Some(0), false);

        let active = resolve_active_surgeries(&[first, second], now());

        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|entry| entry.weeks_post_op == 0));
        assert_eq!(active.iter().filter(|entry| entry.controlling).count(), 1);
    }

    #[test]
    fn every_type_keeps_its_own_controller() {
        let records = vec![
            surgery(SurgeryType::TopSurgery, Some(20), false),
            surgery(SurgeryType::Hysterectomy, Some(4), false),
        ];

        let active = resolve_active_surgeries(&records, now());

        assert_eq!(active.len(), 2);
        assert!(active.iter().all(|entry| entry.controlling));
        assert_eq!(active[0].surgery_type, SurgeryType::TopSurgery);
        assert_eq!(active[1].surgery_type, SurgeryType::Hysterectomy);
    }
}
