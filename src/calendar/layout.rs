use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use super::event::Event;

/// The portion of an event visible within a single calendar day.
///
/// `start`/`end` are clipped to the day: intermediate days of a
/// multi-day event run 00:00 to 23:59 (minute granularity, matching
/// the form inputs). `is_continuation` is true on every day after the
/// event's first, so the views can restyle carried-over fragments.
#[derive(Debug, Clone, PartialEq)]
pub struct EventFragment {
    pub event: Event,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub is_continuation: bool,
}

/// One grid position in the month view: leading padding before the
/// first of the month, or a date with its event fragments.
#[derive(Debug, Clone, PartialEq)]
pub enum DayCell {
    Blank,
    Day {
        date: NaiveDate,
        fragments: Vec<EventFragment>,
    },
}

impl DayCell {
    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            DayCell::Blank => None,
            DayCell::Day { date, .. } => Some(*date),
        }
    }
}

/// Lay out the month containing `reference` as an ordered cell
/// sequence: blanks aligning day 1 to its weekday column (weeks start
/// on Sunday), then one cell per day of the month.
///
/// Every event whose day-span covers a date contributes exactly one
/// fragment to that date's cell, in input order. Pure and total: an
/// event with `end.date() < start.date()` covers no date and is
/// silently dropped rather than rejected.
pub fn layout_month(reference: NaiveDate, events: &[Event]) -> Vec<DayCell> {
    let first = reference.with_day(1).unwrap();
    let blanks = first.weekday().num_days_from_sunday() as usize;
    let days = days_in_month(first.year(), first.month());

    let mut cells = Vec::with_capacity(blanks + days as usize);
    for _ in 0..blanks {
        cells.push(DayCell::Blank);
    }

    for day in 1..=days {
        let date = first.with_day(day).unwrap();
        let fragments = events
            .iter()
            .filter(|e| covers(e, date))
            .map(|e| clip_to_day(e, date))
            .collect();
        cells.push(DayCell::Day { date, fragments });
    }

    cells
}

fn covers(event: &Event, date: NaiveDate) -> bool {
    event.start.date() <= date && date <= event.end.date()
}

fn clip_to_day(event: &Event, date: NaiveDate) -> EventFragment {
    let start = if date == event.start.date() {
        event.start
    } else {
        date.and_time(NaiveTime::MIN)
    };
    let end = if date == event.end.date() {
        event.end
    } else {
        date.and_hms_opt(23, 59, 0).unwrap()
    };
    EventFragment {
        event: event.clone(),
        start,
        end,
        is_continuation: date != event.start.date(),
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .unwrap()
    .signed_duration_since(NaiveDate::from_ymd_opt(year, month, 1).unwrap())
    .num_days() as u32
}

#[cfg(test)]
mod tests {
    use chrono::Weekday;

    use super::super::event::EventCategory;
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, day).unwrap()
    }

    fn at(day: u32, hour: u32, min: u32) -> NaiveDateTime {
        date(day).and_hms_opt(hour, min, 0).unwrap()
    }

    fn event(name: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::new(name, start, end, EventCategory::work())
    }

    fn day_cells(cells: &[DayCell]) -> Vec<(NaiveDate, &[EventFragment])> {
        cells
            .iter()
            .filter_map(|c| match c {
                DayCell::Blank => None,
                DayCell::Day { date, fragments } => Some((*date, fragments.as_slice())),
            })
            .collect()
    }

    #[test]
    fn leap_february_2024_has_four_blanks_and_29_days() {
        // Feb 1, 2024 is a Thursday.
        assert_eq!(date(1).weekday(), Weekday::Thu);

        let cells = layout_month(date(15), &[]);
        assert_eq!(cells.len(), 33);
        assert_eq!(cells.iter().filter(|c| **c == DayCell::Blank).count(), 4);
        assert!(cells[..4].iter().all(|c| *c == DayCell::Blank));
        assert_eq!(cells[4].date(), Some(date(1)));
        assert_eq!(cells[32].date(), Some(date(29)));
    }

    #[test]
    fn blank_count_matches_weekday_of_first() {
        for (y, m, expected) in [
            (2024, 9, 0), // Sep 1, 2024 is a Sunday
            (2024, 1, 1), // Jan 1, 2024 is a Monday
            (2024, 6, 6), // Jun 1, 2024 is a Saturday
        ] {
            let reference = NaiveDate::from_ymd_opt(y, m, 10).unwrap();
            let cells = layout_month(reference, &[]);
            let blanks = cells.iter().filter(|c| **c == DayCell::Blank).count();
            assert_eq!(blanks, expected, "{y}-{m}");
            assert_eq!(
                cells.len() - blanks,
                days_in_month(y, m) as usize,
                "{y}-{m}"
            );
        }
    }

    #[test]
    fn no_two_cells_share_a_date() {
        let cells = layout_month(date(1), &[]);
        let mut dates: Vec<_> = cells.iter().filter_map(DayCell::date).collect();
        let before = dates.len();
        dates.dedup();
        assert_eq!(dates.len(), before);
    }

    #[test]
    fn single_day_event_yields_one_unclipped_fragment() {
        let e = event("Dentist", at(5, 14, 30), at(5, 15, 30));
        let cells = layout_month(date(1), &[e.clone()]);

        let with_fragments: Vec<_> = day_cells(&cells)
            .into_iter()
            .filter(|(_, f)| !f.is_empty())
            .collect();
        assert_eq!(with_fragments.len(), 1);

        let (d, fragments) = with_fragments[0];
        assert_eq!(d, date(5));
        assert_eq!(fragments.len(), 1);
        let frag = &fragments[0];
        assert_eq!(frag.start, e.start);
        assert_eq!(frag.end, e.end);
        assert!(!frag.is_continuation);
        assert_eq!(frag.event, e);
    }

    #[test]
    fn multi_day_event_is_clipped_per_day() {
        let e = event("Trip", at(10, 9, 0), at(12, 17, 0));
        let cells = layout_month(date(15), &[e]);

        let fragments: Vec<_> = day_cells(&cells)
            .into_iter()
            .filter(|(_, f)| !f.is_empty())
            .collect();
        let dates: Vec<_> = fragments.iter().map(|(d, _)| *d).collect();
        assert_eq!(dates, vec![date(10), date(11), date(12)]);

        let (_, first) = fragments[0];
        assert_eq!(first[0].start, at(10, 9, 0));
        assert_eq!(first[0].end, at(10, 23, 59));
        assert!(!first[0].is_continuation);

        let (_, middle) = fragments[1];
        assert_eq!(middle[0].start, at(11, 0, 0));
        assert_eq!(middle[0].end, at(11, 23, 59));
        assert!(middle[0].is_continuation);

        let (_, last) = fragments[2];
        assert_eq!(last[0].start, at(12, 0, 0));
        assert_eq!(last[0].end, at(12, 17, 0));
        assert!(last[0].is_continuation);
    }

    #[test]
    fn event_spanning_month_edges_is_clipped_to_the_grid() {
        // Runs Jan 30 to Feb 2; only the February days land in this grid.
        let e = event(
            "Conference",
            NaiveDate::from_ymd_opt(2024, 1, 30)
                .unwrap()
                .and_hms_opt(8, 0, 0)
                .unwrap(),
            at(2, 12, 0),
        );
        let cells = layout_month(date(15), &[e]);
        let covered: Vec<_> = day_cells(&cells)
            .into_iter()
            .filter(|(_, f)| !f.is_empty())
            .map(|(d, f)| (d, f[0].is_continuation))
            .collect();
        assert_eq!(covered, vec![(date(1), true), (date(2), true)]);
    }

    #[test]
    fn zero_duration_event_produces_a_point_fragment() {
        let e = event("Ping", at(7, 12, 0), at(7, 12, 0));
        let cells = layout_month(date(1), &[e.clone()]);
        let fragments: Vec<_> = day_cells(&cells)
            .into_iter()
            .flat_map(|(_, f)| f.to_vec())
            .collect();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].start, e.start);
        assert_eq!(fragments[0].end, e.start);
    }

    #[test]
    fn inverted_event_is_silently_dropped() {
        let e = event("Backwards", at(12, 9, 0), at(10, 9, 0));
        let cells = layout_month(date(1), &[e]);
        assert!(day_cells(&cells).iter().all(|(_, f)| f.is_empty()));
    }

    #[test]
    fn fragments_keep_input_order() {
        let later = event("Later", at(5, 18, 0), at(5, 19, 0));
        let earlier = event("Earlier", at(5, 8, 0), at(5, 9, 0));
        let cells = layout_month(date(1), &[later, earlier]);

        let names: Vec<_> = day_cells(&cells)
            .into_iter()
            .flat_map(|(_, f)| f.iter().map(|frag| frag.event.name.clone()).collect::<Vec<_>>())
            .collect();
        assert_eq!(names, vec!["Later", "Earlier"]);
    }

    #[test]
    fn layout_is_pure_and_repeatable() {
        let events = vec![
            event("Trip", at(10, 9, 0), at(12, 17, 0)),
            event("Dentist", at(5, 14, 30), at(5, 15, 30)),
        ];
        let snapshot = events.clone();
        let a = layout_month(date(15), &events);
        let b = layout_month(date(15), &events);
        assert_eq!(a, b);
        assert_eq!(events, snapshot);
    }

    #[test]
    fn days_in_month_handles_leap_years_and_december() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }
}
