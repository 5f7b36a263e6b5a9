use serde::Serialize;

/// One recurring weekly slot of a scheduled class section
///
/// All fields are optional because crawled schedules are frequently
/// incomplete. Every derived display propagates the gaps: a missing or zero
/// upstream field yields an absent result, never a malformed string.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct MeetingSlot {
    pub weekday: Option<i32>,
    pub begin_hour: Option<i32>,
    pub num_hours: Option<i32>,
    pub location: Option<String>,
    pub note: Option<String>,
}

impl MeetingSlot {
    /// The occupied hour slots, empty when the begin hour or duration is
    /// unset or zero
    pub fn hours(&self) -> Vec<i32> {
        match (self.begin_hour, self.num_hours) {
            (Some(begin), Some(count)) if begin > 0 && count > 0 => {
                (begin..begin + count).collect()
            }
            _ => Vec::new(),
        }
    }

    /// Compact "weekday(h1,h2,...)" form
    pub fn time_display(&self) -> Option<String> {
        let weekday = self.weekday.filter(|day| *day > 0)?;
        let hours = self.hours();
        if hours.is_empty() {
            return None;
        }

        let list = hours
            .iter()
            .map(i32::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Some(format!("{weekday}({list})"))
    }

    /// "room: weekday(h1,h2,...)" form
    pub fn time_location_display(&self) -> Option<String> {
        let location = self.location.as_deref().filter(|room| !room.is_empty())?;
        let time = self.time_display()?;
        Some(format!("{location}: {time}"))
    }
}

/// Joined display over all of a section's slots, skipping incomplete ones
pub fn slots_display(slots: &[MeetingSlot]) -> String {
    slots
        .iter()
        .filter_map(MeetingSlot::time_location_display)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slot(weekday: i32, begin: i32, count: i32, location: &str) -> MeetingSlot {
        MeetingSlot {
            weekday: Some(weekday),
            begin_hour: Some(begin),
            num_hours: Some(count),
            location: Some(location.to_string()),
            note: None,
        }
    }

    #[test]
    fn test_hours_expansion() {
        assert_eq!(slot(1, 3, 2, "A101").hours(), vec![3, 4]);
        assert_eq!(slot(1, 7, 1, "A101").hours(), vec![7]);
    }

    #[test]
    fn test_unset_or_zero_hours_are_empty() {
        let mut incomplete = slot(1, 3, 2, "A101");
        incomplete.num_hours = None;
        assert!(incomplete.hours().is_empty());

        let zero = slot(1, 0, 2, "A101");
        assert!(zero.hours().is_empty());
        assert_eq!(zero.time_display(), None);
    }

    #[test]
    fn test_time_display() {
        assert_eq!(slot(3, 6, 2, "B204").time_display(), Some("3(6,7)".to_string()));

        let mut no_weekday = slot(3, 6, 2, "B204");
        no_weekday.weekday = None;
        assert_eq!(no_weekday.time_display(), None);
    }

    #[test]
    fn test_time_location_display() {
        assert_eq!(
            slot(3, 6, 2, "B204").time_location_display(),
            Some("B204: 3(6,7)".to_string())
        );

        let mut no_room = slot(3, 6, 2, "");
        no_room.location = Some(String::new());
        assert_eq!(no_room.time_location_display(), None);
    }

    #[test]
    fn test_slots_display_skips_incomplete() {
        let mut broken = slot(2, 1, 2, "C3");
        broken.begin_hour = None;

        let slots = vec![slot(1, 3, 2, "A101"), broken, slot(5, 9, 1, "B2")];
        assert_eq!(slots_display(&slots), "A101: 1(3,4); B2: 5(9)");
        assert_eq!(slots_display(&[]), "");
    }
}
