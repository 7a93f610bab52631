//! Canonical dates and day arithmetic
//!
//! Dates are kept as `YYYY/MM/DD` strings so that ordering them is a plain string comparison.
use crate::error::ErrorType;
use crate::Error;
use lazy_static::lazy_static;
use regex::Regex;

/// Month lengths used by [`shift`]. February always has 28 days.
const DAYS_IN_MONTH: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

lazy_static! {
    static ref RE_YEAR_FIRST: Regex = Regex::new(r"^(\d{4})[-/.](\d\d?)[-/.](\d\d?)$").unwrap();
    static ref RE_YEAR_LAST: Regex = Regex::new(r"^(\d\d?)[-/.](\d\d?)[-/.](\d{4})$").unwrap();
    static ref RE_CANONICAL: Regex = Regex::new(r"^(\d{4})/(\d\d)/(\d\d)$").unwrap();
}

/// Converts date text into the canonical `YYYY/MM/DD` form
///
/// # Examples
/// ```rust
/// # use drachma::models::normalize;
/// assert_eq!(normalize("2012-8-3").unwrap(), "2012/08/03");
/// assert_eq!(normalize("12.25.2012").unwrap(), "2012/12/25");
/// assert!(normalize("25/12/2012").is_err());
/// ```
pub fn normalize(text: &str) -> Result<String, Error> {
    let date = text.trim();
    let bad_date = || Error::from(ErrorType::BadDate(text.to_string()));
    let (year, month, day) = if let Some(captures) = RE_YEAR_FIRST.captures(date) {
        (captures[1].to_string(), captures[2].to_string(), captures[3].to_string())
    } else if let Some(captures) = RE_YEAR_LAST.captures(date) {
        (captures[3].to_string(), captures[1].to_string(), captures[2].to_string())
    } else {
        return Err(bad_date());
    };
    let month_num: u32 = month.parse().map_err(|_| bad_date())?;
    let day_num: u32 = day.parse().map_err(|_| bad_date())?;
    // the same ranges `split` accepts, so a normalized date can always be shifted
    if !(1..=12).contains(&month_num) || !(1..=31).contains(&day_num) {
        return Err(bad_date());
    }
    Ok(format!("{}/{:0>2}/{:0>2}", year, month, day))
}

/// Moves a canonical date by a number of days, forwards or backwards
///
/// Month lengths come from a fixed table without leap years.
pub fn shift(date: &str, delta_days: i64) -> Result<String, Error> {
    if delta_days == 0 {
        return Ok(date.to_string());
    }
    let (mut year, mut month, mut day) = split(date)?;
    day += delta_days;
    while day > DAYS_IN_MONTH[(month - 1) as usize] {
        day -= DAYS_IN_MONTH[(month - 1) as usize];
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    while day < 1 {
        month -= 1;
        if month < 1 {
            month = 12;
            year -= 1;
        }
        day += DAYS_IN_MONTH[(month - 1) as usize];
    }
    Ok(format!("{:04}/{:02}/{:02}", year, month, day))
}

fn split(date: &str) -> Result<(i64, i64, i64), Error> {
    let bad_date = || Error::from(ErrorType::BadDate(date.to_string()));
    let captures = RE_CANONICAL.captures(date).ok_or_else(bad_date)?;
    let year: i64 = captures[1].parse().map_err(|_| bad_date())?;
    let month: i64 = captures[2].parse().map_err(|_| bad_date())?;
    let day: i64 = captures[3].parse().map_err(|_| bad_date())?;
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(bad_date());
    }
    Ok((year, month, day))
}
