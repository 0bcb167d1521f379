//! Month-grid construction for the calendar view.
//!
//! A grid is a flat sequence of day cells, Sunday first, always a multiple of
//! seven long. Cells before the 1st and after the last day of the month belong
//! to the neighbouring months and carry no events.

use chrono::{Datelike, Months, NaiveDate};
use std::collections::HashMap;
use thiserror::Error;

use crate::models::Event;

/// Maximum number of events drawn inside a single day cell
pub const CELL_EVENT_LIMIT: usize = 3;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Month out of range (expected 0-11): {0}")]
    InvalidMonth(u32),
    #[error("Year out of range: {0}")]
    InvalidYear(i32),
}

/// One square of the month grid
#[derive(Debug, Clone, PartialEq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub in_current_month: bool,
    pub is_today: bool,
    pub events: Vec<Event>,
}

impl DayCell {
    fn outside(date: NaiveDate) -> Self {
        Self {
            date,
            in_current_month: false,
            is_today: false,
            events: Vec::new(),
        }
    }

    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// `YYYY-MM-DD` key used to match event dates
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Events beyond `CELL_EVENT_LIMIT`, shown as "+N more"
    pub fn overflow(&self) -> usize {
        self.events.len().saturating_sub(CELL_EVENT_LIMIT)
    }
}

/// Number of days in a zero-based month (last day = day 0 of the next month)
pub fn days_in_month(year: i32, month0: u32) -> Result<u32, CalendarError> {
    let first = first_of_month(year, month0)?;
    let next = first
        .checked_add_months(Months::new(1))
        .ok_or(CalendarError::InvalidYear(year))?;
    next.pred_opt()
        .map(|last| last.day())
        .ok_or(CalendarError::InvalidYear(year))
}

fn first_of_month(year: i32, month0: u32) -> Result<NaiveDate, CalendarError> {
    if month0 > 11 {
        return Err(CalendarError::InvalidMonth(month0));
    }
    NaiveDate::from_ymd_opt(year, month0 + 1, 1).ok_or(CalendarError::InvalidYear(year))
}

/// Build the day cells for `month0` (0 = January) of `year`.
///
/// Events are bucketed by exact string equality between their `date` and the
/// cell's `YYYY-MM-DD`; only cells of the shown month receive events and each
/// cell keeps the input order. Events with other or unparseable dates are
/// left out. Only an out-of-range `(year, month0)` is an error.
pub fn build_month_grid(
    year: i32,
    month0: u32,
    events: &[Event],
    today: NaiveDate,
) -> Result<Vec<DayCell>, CalendarError> {
    let first = first_of_month(year, month0)?;
    let days = days_in_month(year, month0)?;
    let leading = first.weekday().num_days_from_sunday();

    let mut cells = Vec::with_capacity(42);

    // Trailing days of the previous month, counted back from its last day
    let prev_last = first.pred_opt().ok_or(CalendarError::InvalidYear(year))?;
    for offset in (1..=leading).rev() {
        let date = prev_last
            .checked_sub_days(chrono::Days::new(u64::from(offset - 1)))
            .ok_or(CalendarError::InvalidYear(year))?;
        cells.push(DayCell::outside(date));
    }

    let mut index_by_key: HashMap<String, usize> = HashMap::with_capacity(days as usize);
    for day in 1..=days {
        let date = first
            .with_day(day)
            .ok_or(CalendarError::InvalidYear(year))?;
        index_by_key.insert(date.format("%Y-%m-%d").to_string(), cells.len());
        cells.push(DayCell {
            date,
            in_current_month: true,
            is_today: date == today,
            events: Vec::new(),
        });
    }

    let trailing = (7 - cells.len() % 7) % 7;
    let next_first = first
        .checked_add_months(Months::new(1))
        .ok_or(CalendarError::InvalidYear(year))?;
    for offset in 0..trailing {
        let date = next_first
            .checked_add_days(chrono::Days::new(offset as u64))
            .ok_or(CalendarError::InvalidYear(year))?;
        cells.push(DayCell::outside(date));
    }

    let mut bucketed = 0usize;
    for event in events {
        if let Some(&idx) = index_by_key.get(event.date.as_str()) {
            cells[idx].events.push(event.clone());
            bucketed += 1;
        }
    }

    log::debug!(
        "event=month_grid year={} month={} cells={} events={} bucketed={}",
        year,
        month0 + 1,
        cells.len(),
        events.len(),
        bucketed
    );

    Ok(cells)
}

/// Month shown by the calendar view, with wrapping navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    year: i32,
    /// Zero-based month, always within 0..=11
    month0: u32,
}

impl MonthCursor {
    pub fn new(year: i32, month0: u32) -> Result<Self, CalendarError> {
        first_of_month(year, month0)?;
        Ok(Self { year, month0 })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Zero-based month (0 = January)
    pub fn month0(&self) -> u32 {
        self.month0
    }

    pub fn prev(self) -> Self {
        if self.month0 == 0 {
            Self { year: self.year - 1, month0: 11 }
        } else {
            Self { year: self.year, month0: self.month0 - 1 }
        }
    }

    pub fn next(self) -> Self {
        if self.month0 == 11 {
            Self { year: self.year + 1, month0: 0 }
        } else {
            Self { year: self.year, month0: self.month0 + 1 }
        }
    }

    /// "July 2024"
    pub fn label(&self) -> String {
        format!("{} {}", MONTH_NAMES[self.month0 as usize], self.year)
    }

    pub fn grid(&self, events: &[Event], today: NaiveDate) -> Result<Vec<DayCell>, CalendarError> {
        build_month_grid(self.year, self.month0, events, today)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_wraps_across_years() {
        let jan = MonthCursor { year: 2024, month0: 0 };
        assert_eq!(jan.prev(), MonthCursor { year: 2023, month0: 11 });
        assert_eq!(jan.prev().next(), jan);
        let dec = MonthCursor { year: 2024, month0: 11 };
        assert_eq!(dec.next(), MonthCursor { year: 2025, month0: 0 });
        assert_eq!(dec.label(), "December 2024");
    }

    #[test]
    fn cursor_only_holds_valid_months() {
        assert_eq!(MonthCursor::new(2024, 12), Err(CalendarError::InvalidMonth(12)));
        let july = MonthCursor::new(2024, 6).unwrap();
        assert_eq!((july.year(), july.month0()), (2024, 6));
        assert_eq!(july.label(), "July 2024");
        let from_today = MonthCursor::from_date(NaiveDate::from_ymd_opt(2024, 7, 4).unwrap());
        assert_eq!(from_today, july);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(days_in_month(2024, 1), Ok(29));
        assert_eq!(days_in_month(2023, 1), Ok(28));
        assert_eq!(days_in_month(1900, 1), Ok(28));
        assert_eq!(days_in_month(2000, 1), Ok(29));
        assert_eq!(days_in_month(2024, 11), Ok(31));
        assert_eq!(days_in_month(2024, 12), Err(CalendarError::InvalidMonth(12)));
    }
}
