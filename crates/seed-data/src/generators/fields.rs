//! Field helpers shared by the entity generators.

use rand::Rng;
use roster::models::Gender;
use time::{Date, Duration, Month, OffsetDateTime};

/// Today's UTC date, the default reference date for generation.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// `+1` followed by a 3-3-4 digit grouping.
pub fn us_phone(rng: &mut impl Rng) -> String {
    format!(
        "+1{}{}{}",
        rng.gen_range(100..=999),
        rng.gen_range(100..=999),
        rng.gen_range(1000..=9999)
    )
}

/// `+91` followed by a 10-digit mobile number.
pub fn indian_mobile(rng: &mut impl Rng) -> String {
    format!("+91{}", rng.gen_range(7_000_000_000u64..=9_999_999_999))
}

pub fn gender(rng: &mut impl Rng) -> Gender {
    if rng.r#gen::<bool>() {
        Gender::Male
    } else {
        Gender::Female
    }
}

/// Same calendar day `years` earlier. 29 February falls back to the 28th,
/// and years outside the calendar clamp to its first or last year.
pub fn years_before(date: Date, years: i32) -> Date {
    let year = date
        .year()
        .saturating_sub(years)
        .clamp(Date::MIN.year(), Date::MAX.year());
    date.replace_year(year)
        .or_else(|_| Date::from_calendar_date(year, Month::February, 28))
        .unwrap_or(date)
}

/// Uniform birth date for someone between `min_years` and `max_years` old
/// on `today`.
///
/// Band edges are calendar anniversaries, so the birth year always lies in
/// `today.year() - max_years ..= today.year() - min_years`.
pub fn birth_date_in_band(today: Date, min_years: i32, max_years: i32, rng: &mut impl Rng) -> Date {
    let earliest = years_before(today, max_years);
    let latest = years_before(today, min_years);
    let span = (latest - earliest).whole_days().max(0);
    earliest + Duration::days(rng.gen_range(0..=span))
}

/// Age by calendar year; month and day are ignored.
pub fn age_on(today: Date, date_of_birth: Date) -> i32 {
    today.year() - date_of_birth.year()
}

/// `first.last@domain`, lowercased with anything but letters and digits
/// dropped from each name.
pub fn name_email(first: &str, last: &str, domain: &str) -> String {
    let normalize = |name: &str| -> String {
        name.to_lowercase()
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect()
    };
    format!("{}.{}@{domain}", normalize(first), normalize(last))
}

/// A street number on the school's street.
pub fn school_street_address(rng: &mut impl Rng) -> String {
    format!("{} School Street, City", rng.gen_range(100..=999))
}
