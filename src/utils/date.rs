// Due date token resolution

use chrono::{Duration, NaiveDate};

use crate::error::TodoError;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves free-form due date tokens against a fixed "today".
///
/// The seven-day window (today through today+6) is computed once, so a
/// weekday name never resolves to a date more than six days out.
#[derive(Debug, Clone)]
pub struct DateResolver {
    today: NaiveDate,
    week: [NaiveDate; 7],
}

impl DateResolver {
    pub fn new(today: NaiveDate) -> Self {
        let mut week = [today; 7];
        for (offset, day) in week.iter_mut().enumerate() {
            *day = today + Duration::days(offset as i64);
        }
        Self { today, week }
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Resolve a due date token.
    ///
    /// Tried in order: full weekday name, `today`/`tomorrow`, three-letter
    /// weekday abbreviation, empty token (clears the date), `YYYY-MM-DD`.
    pub fn resolve(&self, token: &str) -> Result<Option<NaiveDate>, TodoError> {
        let token = token.trim();

        if let Some(date) = self.weekday(token, "%A") {
            return Ok(Some(date));
        }
        if token.eq_ignore_ascii_case("today") {
            return Ok(Some(self.today));
        }
        if token.eq_ignore_ascii_case("tomorrow") {
            return Ok(Some(self.today + Duration::days(1)));
        }
        if let Some(date) = self.weekday(token, "%a") {
            return Ok(Some(date));
        }
        if token.is_empty() {
            return Ok(None);
        }

        NaiveDate::parse_from_str(token, DATE_FORMAT)
            .map(Some)
            .map_err(|_| TodoError::InvalidDate(token.to_string()))
    }

    fn weekday(&self, token: &str, format: &str) -> Option<NaiveDate> {
        if token.is_empty() {
            return None;
        }
        self.week
            .iter()
            .find(|day| day.format(format).to_string().eq_ignore_ascii_case(token))
            .copied()
    }
}

/// Days from `today` until `date` (negative when in the past)
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    date.signed_duration_since(today).num_days()
}
