use chrono::{Datelike, NaiveDate, Utc};

/// Seed shared by everyone playing the daily challenge on `date`.
/// Encoded as `YYYYMMDD` so it stays readable in logs.
pub fn daily_seed(date: NaiveDate) -> u64 {
    let year = u64::try_from(date.year()).unwrap_or(0);
    year * 10_000 + u64::from(date.month()) * 100 + u64::from(date.day())
}

pub fn today_seed() -> u64 {
    daily_seed(Utc::now().date_naive())
}
