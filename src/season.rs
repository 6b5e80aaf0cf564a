//! NFL season calendar: maps calendar dates to fantasy weeks.
//!
//! Each regular-season week runs Thursday through Monday; the Tuesday and
//! Wednesday between windows belong to the week that most recently started.

use chrono::{Datelike, Duration, Local, NaiveDate};

/// 2025 regular season week start dates (Thursdays), weeks 1-18.
const SEASON_2025_STARTS: [(u8, i32, u32, u32); 18] = [
    (1, 2025, 9, 4),
    (2, 2025, 9, 11),
    (3, 2025, 9, 18),
    (4, 2025, 9, 25),
    (5, 2025, 10, 2),
    (6, 2025, 10, 9),
    (7, 2025, 10, 16),
    (8, 2025, 10, 23),
    (9, 2025, 10, 30),
    (10, 2025, 11, 6),
    (11, 2025, 11, 13),
    (12, 2025, 11, 20),
    (13, 2025, 11, 27),
    (14, 2025, 12, 4),
    (15, 2025, 12, 11),
    (16, 2025, 12, 18),
    (17, 2025, 12, 25),
    (18, 2026, 1, 1),
];

/// One scheduled week: Thursday start through Monday end, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    pub week: u8,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

fn schedule() -> impl Iterator<Item = WeekWindow> {
    SEASON_2025_STARTS.iter().map(|&(week, y, m, d)| {
        // Table entries are verified calendar dates
        let start = NaiveDate::from_ymd_opt(y, m, d).expect("valid schedule date");
        WeekWindow {
            week,
            start,
            end: start + Duration::days(4),
        }
    })
}

/// The fantasy week containing `date`.
///
/// Inside a Thursday-Monday window the window's week is returned; before the
/// season it is week 1; in the Tuesday/Wednesday gap it is the most recently
/// started week.
pub fn current_week_on(date: NaiveDate) -> u8 {
    if let Some(w) = schedule().find(|w| date >= w.start && date <= w.end) {
        return w.week;
    }

    let first_start = schedule().next().map(|w| w.start);
    if matches!(first_start, Some(start) if date < start) {
        return 1;
    }

    schedule()
        .filter(|w| date >= w.start)
        .last()
        .map(|w| w.week)
        .unwrap_or(1)
}

/// The fantasy week for today.
pub fn current_week() -> u8 {
    current_week_on(Local::now().date_naive())
}

/// Season year the schedule covers.
pub fn current_season() -> u16 {
    2025
}

/// Start and end dates for a week, if it exists in the schedule.
pub fn week_dates(week: u8) -> Option<WeekWindow> {
    schedule().find(|w| w.week == week)
}

/// Whether the week's Monday has fully passed as of `date`.
pub fn is_week_completed_on(week: u8, date: NaiveDate) -> bool {
    week_dates(week).map(|w| date > w.end).unwrap_or(false)
}

pub fn is_week_completed(week: u8) -> bool {
    is_week_completed_on(week, Local::now().date_naive())
}

/// Most recent week whose window has fully passed as of `date`; 0 if none.
pub fn last_completed_week_on(date: NaiveDate) -> u8 {
    schedule()
        .filter(|w| date > w.end)
        .last()
        .map(|w| w.week)
        .unwrap_or(0)
}

pub fn last_completed_week() -> u8 {
    last_completed_week_on(Local::now().date_naive())
}

/// Day-of-week label for display.
pub fn weekday_name(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Mon",
        chrono::Weekday::Tue => "Tue",
        chrono::Weekday::Wed => "Wed",
        chrono::Weekday::Thu => "Thu",
        chrono::Weekday::Fri => "Fri",
        chrono::Weekday::Sat => "Sat",
        chrono::Weekday::Sun => "Sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_inside_window_returns_that_week() {
        // Week 1: Thu Sep 4 - Mon Sep 8
        assert_eq!(current_week_on(date(2025, 9, 4)), 1);
        assert_eq!(current_week_on(date(2025, 9, 7)), 1);
        assert_eq!(current_week_on(date(2025, 9, 8)), 1);
    }

    #[test]
    fn test_before_season_is_week_one() {
        assert_eq!(current_week_on(date(2025, 8, 1)), 1);
        assert_eq!(current_week_on(date(2025, 9, 3)), 1);
    }

    #[test]
    fn test_tuesday_gap_keeps_previous_week() {
        // Tue Sep 9 and Wed Sep 10 sit between week 1 and week 2
        assert_eq!(current_week_on(date(2025, 9, 9)), 1);
        assert_eq!(current_week_on(date(2025, 9, 10)), 1);
        // Thursday flips to week 2
        assert_eq!(current_week_on(date(2025, 9, 11)), 2);
    }

    #[test]
    fn test_after_season_sticks_to_last_week() {
        assert_eq!(current_week_on(date(2026, 2, 1)), 18);
    }

    #[test]
    fn test_week_dates() {
        let w = week_dates(10).unwrap();
        assert_eq!(w.start, date(2025, 11, 6));
        assert_eq!(w.end, date(2025, 11, 10));
        assert!(week_dates(19).is_none());
        assert!(week_dates(0).is_none());
    }

    #[test]
    fn test_week_completion() {
        // Week 1 ends Mon Sep 8
        assert!(!is_week_completed_on(1, date(2025, 9, 8)));
        assert!(is_week_completed_on(1, date(2025, 9, 9)));
        // Unknown weeks are never completed
        assert!(!is_week_completed_on(42, date(2026, 6, 1)));
    }

    #[test]
    fn test_last_completed_week() {
        assert_eq!(last_completed_week_on(date(2025, 9, 1)), 0);
        assert_eq!(last_completed_week_on(date(2025, 9, 9)), 1);
        assert_eq!(last_completed_week_on(date(2025, 11, 12)), 10);
        assert_eq!(last_completed_week_on(date(2026, 3, 1)), 18);
    }

    #[test]
    fn test_windows_are_thursday_to_monday() {
        for w in schedule() {
            assert_eq!(w.start.weekday(), chrono::Weekday::Thu);
            assert_eq!(w.end.weekday(), chrono::Weekday::Mon);
        }
    }
}
