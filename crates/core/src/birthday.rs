//! Birthday matching for the yearly greeting email.

use chrono::{Datelike, NaiveDate};

/// Whether someone born on `date_of_birth` celebrates on `today`.
///
/// People born on 29 February celebrate on 28 February in non-leap years.
pub fn is_birthday(date_of_birth: NaiveDate, today: NaiveDate) -> bool {
    let (month, day) = (date_of_birth.month(), date_of_birth.day());
    if month == today.month() && day == today.day() {
        return true;
    }
    month == 2 && day == 29 && today.month() == 2 && today.day() == 28 && !is_leap(today.year())
}

/// The (month, day) pairs whose owners celebrate on `today`.
///
/// Used to build the repository query: one pair normally, two on
/// 28 February of a non-leap year.
pub fn birthday_keys(today: NaiveDate) -> Vec<(u32, u32)> {
    let mut keys = vec![(today.month(), today.day())];
    if today.month() == 2 && today.day() == 28 && !is_leap(today.year()) {
        keys.push((2, 29));
    }
    keys
}

fn is_leap(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 2, 29).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_month_and_day() {
        assert!(is_birthday(d(1980, 6, 15), d(2026, 6, 15)));
        assert!(!is_birthday(d(1980, 6, 15), d(2026, 6, 16)));
    }

    #[test]
    fn leap_day_birthdays() {
        let dob = d(1992, 2, 29);
        assert!(is_birthday(dob, d(2027, 2, 28)));
        assert!(!is_birthday(dob, d(2028, 2, 28)));
        assert!(is_birthday(dob, d(2028, 2, 29)));
    }

    #[test]
    fn keys_include_leap_day_in_common_years() {
        assert_eq!(birthday_keys(d(2027, 2, 28)), vec![(2, 28), (2, 29)]);
        assert_eq!(birthday_keys(d(2028, 2, 28)), vec![(2, 28)]);
        assert_eq!(birthday_keys(d(2026, 10, 17)), vec![(10, 17)]);
    }
}
