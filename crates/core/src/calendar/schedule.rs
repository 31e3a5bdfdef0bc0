//! Collection schedule date generation.
//!
//! Produces the ordered list of collection days shown as sheet columns for a
//! month. The generator knows nothing about transactions; it only encodes the
//! collector's visiting rhythm and the weekly closure day.

use chrono::{Datelike, NaiveDate, Weekday};

use super::CalendarError;

/// Friday is the weekly holiday in Bangladesh; no collections happen then.
const WEEKLY_CLOSURE: Weekday = Weekday::Fri;

/// A collector's visiting rhythm for a member group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleMode {
    /// Every day of the month except the weekly closure day.
    Daily,
    /// Every occurrence of the given weekday in the month.
    Weekly(Weekday),
    /// One collection day at the opening of the month.
    Monthly,
}

/// Generates the ordered, de-duplicated collection days for one month.
///
/// Daily mode excludes Fridays. Weekly mode includes every occurrence of the
/// chosen weekday. Monthly mode yields the first day of the month, pushed to
/// the following day when that first day is a Friday.
///
/// # Errors
///
/// Returns `CalendarError::InvalidMonth` when `year`/`month` does not name a
/// real month.
pub fn collection_dates(
    mode: ScheduleMode,
    year: i32,
    month: u32,
) -> Result<Vec<NaiveDate>, CalendarError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(CalendarError::InvalidMonth { year, month })?;

    let month_days = first.iter_days().take_while(|d| d.month() == month);

    let dates = match mode {
        ScheduleMode::Daily => month_days
            .filter(|d| d.weekday() != WEEKLY_CLOSURE)
            .collect(),
        ScheduleMode::Weekly(weekday) => {
            month_days.filter(|d| d.weekday() == weekday).collect()
        }
        ScheduleMode::Monthly => {
            let day = if first.weekday() == WEEKLY_CLOSURE {
                first
                    .succ_opt()
                    .ok_or(CalendarError::InvalidMonth { year, month })?
            } else {
                first
            };
            vec![day]
        }
    };

    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_daily_excludes_fridays() {
        // April 2026 has 30 days and exactly four Fridays (3, 10, 17, 24).
        let dates = collection_dates(ScheduleMode::Daily, 2026, 4).unwrap();

        assert_eq!(dates.len(), 26);
        assert!(dates.iter().all(|d| d.weekday() != Weekday::Fri));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_weekly_every_occurrence() {
        // Mondays of April 2026: 6, 13, 20, 27.
        let dates = collection_dates(ScheduleMode::Weekly(Weekday::Mon), 2026, 4).unwrap();

        let expected: Vec<NaiveDate> = [6, 13, 20, 27]
            .into_iter()
            .map(|day| NaiveDate::from_ymd_opt(2026, 4, day).unwrap())
            .collect();
        assert_eq!(dates, expected);
    }

    #[test]
    fn test_weekly_friday_is_allowed_when_requested() {
        // Weekly mode follows the requested weekday even if it is a Friday;
        // only daily mode carries the closure rule.
        let dates = collection_dates(ScheduleMode::Weekly(Weekday::Fri), 2026, 4).unwrap();
        assert_eq!(dates.len(), 4);
    }

    #[test]
    fn test_monthly_opening_day() {
        let dates = collection_dates(ScheduleMode::Monthly, 2026, 4).unwrap();
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2026, 4, 1).unwrap()]);
    }

    #[test]
    fn test_monthly_skips_friday_opening() {
        // 2026-05-01 is a Friday.
        let dates = collection_dates(ScheduleMode::Monthly, 2026, 5).unwrap();
        assert_eq!(dates, vec![NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()]);
    }

    #[rstest]
    #[case(2026, 0)]
    #[case(2026, 13)]
    fn test_invalid_month(#[case] year: i32, #[case] month: u32) {
        assert!(matches!(
            collection_dates(ScheduleMode::Daily, year, month),
            Err(CalendarError::InvalidMonth { .. })
        ));
    }

    #[test]
    fn test_february_length() {
        let dates = collection_dates(ScheduleMode::Daily, 2026, 2).unwrap();
        // February 2026 has 28 days and four Fridays (6, 13, 20, 27).
        assert_eq!(dates.len(), 24);
    }
}
