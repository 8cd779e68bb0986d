use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// One month on the forecast axis.
///
/// The offset is the stable machine key (0 = current month); `label` is
/// what a frontend renders on the x-axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthPoint {
    /// Signed month count relative to the current month (negative = past)
    pub offset: i32,

    /// First day of the calendar month
    pub date: NaiveDate,

    /// Display label, e.g. "Mar 2025"
    pub label: String,
}

impl MonthPoint {
    /// Build the month axis around `today`: `months_back` past months
    /// followed by `months_forward` months starting at the current one.
    /// Total length is `months_back + months_forward` and offset 0 (when
    /// `months_forward > 0`) is the current month.
    ///
    /// Months are stepped on the calendar, so the axis is correct across
    /// year boundaries and varying month lengths.
    #[must_use]
    pub fn axis(today: NaiveDate, months_back: u32, months_forward: u32) -> Vec<MonthPoint> {
        let anchor = today.with_day(1).unwrap_or(today);
        let mut points = Vec::with_capacity((months_back + months_forward) as usize);

        for offset in -(months_back as i32)..(months_forward as i32) {
            let date = if offset >= 0 {
                anchor.checked_add_months(Months::new(offset as u32))
            } else {
                anchor.checked_sub_months(Months::new(offset.unsigned_abs()))
            }
            .unwrap_or(anchor);

            points.push(MonthPoint {
                offset,
                date,
                label: date.format("%b %Y").to_string(),
            });
        }

        points
    }
}
