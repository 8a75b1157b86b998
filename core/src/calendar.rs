//! Calendar primitives: canonical date keys and the 42-cell month grid.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of cells in a rendered month grid (6 rows of 7 days).
///
/// The grid is always padded to this size so 4-, 5-, and 6-row months
/// render through the same layout.
pub const GRID_CELLS: usize = 42;

/// Canonical `YYYY-MM-DD` form of a calendar date, used as a mapping key.
///
/// Built from the date's local calendar year, month, and day with
/// zero-padded month and day — the same shape the original widgets
/// persist under, so stored state stays readable across ports.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Builds the key for a calendar date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the key back into the date it was built from.
    #[must_use]
    pub fn to_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.0, "%Y-%m-%d").ok()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self::from_date(date)
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Error parsing a [`DateKey`] from a string.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("not a YYYY-MM-DD date key: {0:?}")]
pub struct DateKeyError(String);

impl FromStr for DateKey {
    type Err = DateKeyError;

    /// Strict parse: the input must already be in canonical zero-padded
    /// form, so parsing round-trips byte-for-byte.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| DateKeyError(s.to_owned()))?;
        let key = Self::from_date(date);
        if key.as_str() == s {
            Ok(key)
        } else {
            Err(DateKeyError(s.to_owned()))
        }
    }
}

/// A (year, month) anchor identifying which month a grid renders.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridMonth {
    year: i32,
    month0: u32,
}

impl GridMonth {
    /// Builds an anchor from a year and a zero-based month index.
    ///
    /// Out-of-range months carry into adjacent years the way date
    /// arithmetic rolls over: month 12 is January of `year + 1`, month
    /// -1 is December of `year - 1`.
    #[must_use]
    #[allow(clippy::cast_sign_loss)] // rem_euclid(12) is always 0..=11
    pub const fn new(year: i32, month: i32) -> Self {
        Self {
            year: year + month.div_euclid(12),
            month0: month.rem_euclid(12) as u32,
        }
    }

    /// The anchor for the month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Zero-based month index (0 = January).
    #[must_use]
    pub const fn month0(self) -> u32 {
        self.month0
    }

    /// The previous calendar month.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // month0 is 0..=11
    pub const fn prev(self) -> Self {
        Self::new(self.year, self.month0 as i32 - 1)
    }

    /// The next calendar month.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)] // month0 is 0..=11
    pub const fn next(self) -> Self {
        Self::new(self.year, self.month0 as i32 + 1)
    }

    /// Whether `date` falls inside this month.
    #[must_use]
    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month0() == self.month0
    }

    /// First day of the month, clamped at the edge of chrono's range.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or(NaiveDate::MIN)
    }
}

/// A single cell of the 42-cell month grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCell {
    /// The calendar date the cell shows.
    pub date: NaiveDate,
    /// True for the leading/trailing spillover days of adjacent months.
    pub other_month: bool,
}

/// Computes the month grid: the previous month's trailing days back to
/// the nearest Sunday, every day of the month itself, then the following
/// month's leading days, padded to exactly [`GRID_CELLS`] consecutive
/// cells.
#[must_use]
pub fn month_grid(month: GridMonth) -> Vec<GridCell> {
    let first = month.first_day();
    let lead = u64::from(first.weekday().num_days_from_sunday());
    let start = first.checked_sub_days(Days::new(lead)).unwrap_or(first);

    start
        .iter_days()
        .take(GRID_CELLS)
        .map(|date| GridCell {
            date,
            other_month: !month.contains(date),
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn date_key_zero_pads_month_and_day() {
        assert_eq!(DateKey::from_date(ymd(2025, 6, 5)).as_str(), "2025-06-05");
        assert_eq!(
            DateKey::from_date(ymd(2025, 11, 30)).as_str(),
            "2025-11-30"
        );
    }

    #[test]
    fn date_key_parse_rejects_non_canonical_input() {
        assert!("not a date".parse::<DateKey>().is_err());
        assert!("2025-13-01".parse::<DateKey>().is_err());
        assert!("2025-6-5".parse::<DateKey>().is_err());
    }

    #[test]
    fn month_carry_rolls_over_years() {
        assert_eq!(GridMonth::new(2025, 12), GridMonth::new(2026, 0));
        assert_eq!(GridMonth::new(2025, -1), GridMonth::new(2024, 11));
        assert_eq!(GridMonth::new(2025, 25), GridMonth::new(2027, 1));
        assert_eq!(GridMonth::new(2025, 3).next(), GridMonth::new(2025, 4));
        assert_eq!(GridMonth::new(2025, 0).prev(), GridMonth::new(2024, 11));
    }

    #[test]
    fn may_2025_grid_layout() {
        // May 1st 2025 is a Thursday: four April days lead the grid.
        let cells = month_grid(GridMonth::new(2025, 4));

        assert_eq!(cells.len(), GRID_CELLS);
        assert_eq!(cells[0].date, ymd(2025, 4, 27));
        assert!(cells[0].other_month);
        assert_eq!(cells[4].date, ymd(2025, 5, 1));
        assert!(!cells[4].other_month);
        assert_eq!(cells[34].date, ymd(2025, 5, 31));
        assert!(!cells[34].other_month);
        assert_eq!(cells[41].date, ymd(2025, 6, 7));
        assert!(cells[41].other_month);
    }

    #[test]
    fn sunday_first_month_has_no_leading_cells() {
        // June 1st 2025 is a Sunday.
        let cells = month_grid(GridMonth::new(2025, 5));
        assert!(!cells[0].other_month);
        assert_eq!(cells[0].date, ymd(2025, 6, 1));
    }

    proptest! {
        #[test]
        fn grid_is_42_consecutive_cells(year in 1900i32..2200, month in -24i32..36) {
            let cells = month_grid(GridMonth::new(year, month));
            prop_assert_eq!(cells.len(), GRID_CELLS);
            for pair in cells.windows(2) {
                prop_assert_eq!(pair[0].date.succ_opt(), Some(pair[1].date));
            }
        }

        #[test]
        fn grid_starts_on_sunday_and_flags_spillover(
            year in 1900i32..2200,
            month in 0i32..12,
        ) {
            let anchor = GridMonth::new(year, month);
            let cells = month_grid(anchor);

            prop_assert_eq!(cells[0].date.weekday().num_days_from_sunday(), 0);

            let in_month = cells.iter().filter(|c| !c.other_month).count();
            let last_day = anchor.next().first_day().pred_opt().unwrap();
            prop_assert_eq!(in_month, last_day.day() as usize);
        }

        #[test]
        fn date_key_round_trips(year in 1i32..=9999, ordinal in 1u32..=365) {
            let date = NaiveDate::from_yo_opt(year, ordinal).unwrap();
            let key = DateKey::from_date(date);

            prop_assert_eq!(key.to_date(), Some(date));
            let reparsed: DateKey = key.as_str().parse().unwrap();
            prop_assert_eq!(reparsed, key);
        }
    }
}
