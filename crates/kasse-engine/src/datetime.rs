use chrono::NaiveDate;

/// Get today, as a naive local date.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Due date of a billed month: dues are due on the first day of
/// the month. The convention is fixed in this one place; repeated
/// generation runs must compute the same date for the same month.
pub fn due_date_for(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}
