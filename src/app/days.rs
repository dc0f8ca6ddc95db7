//! Date cells shown by the demo: one cell per calendar day.
//!
//! Weekends are not selectable, which gives the indicator something to do
//! as the row scrolls.

use std::rc::Rc;

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use snap_carousel::core::cell::{CellRef, Selectable};

/// One calendar day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
}

impl DayCell {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    /// Three-letter weekday, e.g. `"Tue"`.
    pub fn weekday_label(&self) -> String {
        self.date.format("%a").to_string()
    }

    /// Day of the month without padding, e.g. `"7"`.
    pub fn day_label(&self) -> String {
        self.date.day().to_string()
    }

    /// Short month, e.g. `"Oct"`.
    pub fn month_label(&self) -> String {
        self.date.format("%b").to_string()
    }
}

impl Selectable for DayCell {
    fn is_selectable(&self) -> bool {
        !matches!(self.date.weekday(), Weekday::Sat | Weekday::Sun)
    }
}

/// `count` consecutive days starting at `start`.
pub fn days_from(start: NaiveDate, count: usize) -> Vec<Rc<DayCell>> {
    (0..count)
        .filter_map(|i| {
            let offset = Duration::try_days(i as i64)?;
            start.checked_add_signed(offset).map(DayCell::new)
        })
        .map(Rc::new)
        .collect()
}

/// Erase the concrete type for the controller while keeping identity.
pub fn as_cells(days: &[Rc<DayCell>]) -> Vec<CellRef> {
    days.iter().map(|d| Rc::clone(d) as CellRef).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weekends_are_not_selectable() {
        // 2024-01-01 was a Monday.
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let days = days_from(start, 7);
        let flags: Vec<bool> = days.iter().map(|d| d.is_selectable()).collect();
        assert_eq!(flags, [true, true, true, true, true, false, false]);
        assert_eq!(days[0].weekday_label(), "Mon");
        assert_eq!(days[6].day_label(), "7");
        assert_eq!(days[6].month_label(), "Jan");
    }

    #[test]
    fn erased_cells_keep_identity() {
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let days = days_from(start, 3);
        let cells = as_cells(&days);
        let erased: Rc<dyn Selectable> = days[1].clone();
        assert!(Rc::ptr_eq(&cells[1], &erased));
    }
}
