//! Named film filters.
//!
//! These are the predicates offered by the library's filter menu. The
//! storage layer maps each one onto a single query; [`FilmFilter::matches`]
//! is the in-memory equivalent used by [`crate::collection::FilmCollection`].

use std::fmt;
use std::str::FromStr;

use chrono::{Months, NaiveDate};

use crate::error::CoreError;
use crate::film::{Film, MAX_RATING};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilmFilter {
    #[default]
    All,
    Favorite,
    /// Films with the top rating.
    Best,
    /// Films watched within the month ending today.
    LastMonth,
    Unseen,
    /// Rated films, best first.
    Rated,
    WatchedToday,
}

impl FilmFilter {
    pub const ALL: [FilmFilter; 7] = [
        FilmFilter::All,
        FilmFilter::Favorite,
        FilmFilter::Best,
        FilmFilter::LastMonth,
        FilmFilter::Unseen,
        FilmFilter::Rated,
        FilmFilter::WatchedToday,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FilmFilter::All => "all",
            FilmFilter::Favorite => "favorite",
            FilmFilter::Best => "best",
            FilmFilter::LastMonth => "lastmonth",
            FilmFilter::Unseen => "unseen",
            FilmFilter::Rated => "rated",
            FilmFilter::WatchedToday => "today",
        }
    }

    pub fn matches(self, film: &Film, today: NaiveDate) -> bool {
        match self {
            FilmFilter::All => true,
            FilmFilter::Favorite => film.is_favorite,
            FilmFilter::Best => film.rating.is_some_and(|r| r.get() == MAX_RATING),
            FilmFilter::LastMonth => {
                let (from, to) = last_month_window(today);
                film.watch_date.is_some_and(|d| d >= from && d <= to)
            }
            FilmFilter::Unseen => film.watch_date.is_none(),
            FilmFilter::Rated => film.rating.is_some(),
            FilmFilter::WatchedToday => film.watch_date == Some(today),
        }
    }
}

impl fmt::Display for FilmFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilmFilter {
    type Err = CoreError;

    /// Accepts the bare names (`favorite`) as well as the web client's
    /// element ids (`filter-favorite`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        let name = name.strip_prefix("filter-").unwrap_or(name);
        FilmFilter::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown filter '{s}'. Must be one of: {}",
                    FilmFilter::ALL.map(FilmFilter::as_str).join(", ")
                ))
            })
    }
}

/// Inclusive date range `(today - 1 month, today]` used by [`FilmFilter::LastMonth`].
pub fn last_month_window(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    let month_ago = today
        .checked_sub_months(Months::new(1))
        .unwrap_or(NaiveDate::MIN);
    let from = month_ago.succ_opt().unwrap_or(month_ago);
    (from, today)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_names_and_client_ids() {
        assert_eq!("favorite".parse::<FilmFilter>().unwrap(), FilmFilter::Favorite);
        assert_eq!("filter-best".parse::<FilmFilter>().unwrap(), FilmFilter::Best);
        assert_eq!("LastMonth".parse::<FilmFilter>().unwrap(), FilmFilter::LastMonth);
        assert_eq!("today".parse::<FilmFilter>().unwrap(), FilmFilter::WatchedToday);
    }

    #[test]
    fn rejects_unknown_filter() {
        assert_matches!("popular".parse::<FilmFilter>(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn every_filter_round_trips_through_its_name() {
        for filter in FilmFilter::ALL {
            assert_eq!(filter.as_str().parse::<FilmFilter>().unwrap(), filter);
        }
    }

    #[test]
    fn last_month_window_is_one_month_ending_today() {
        assert_eq!(
            last_month_window(date(2024, 3, 20)),
            (date(2024, 2, 21), date(2024, 3, 20))
        );
        // Month arithmetic clamps to the end of a shorter month.
        assert_eq!(
            last_month_window(date(2024, 3, 31)),
            (date(2024, 3, 1), date(2024, 3, 31))
        );
    }

    #[test]
    fn last_month_excludes_future_and_old_dates() {
        let today = date(2024, 3, 20);
        let seen = |d| Film::new(1, "A").watched_on(d);

        assert!(FilmFilter::LastMonth.matches(&seen(today), today));
        assert!(FilmFilter::LastMonth.matches(&seen(date(2024, 2, 21)), today));
        assert!(!FilmFilter::LastMonth.matches(&seen(date(2024, 2, 20)), today));
        assert!(!FilmFilter::LastMonth.matches(&seen(date(2024, 3, 21)), today));
        assert!(!FilmFilter::LastMonth.matches(&Film::new(2, "B"), today));
    }

    #[test]
    fn best_means_top_rating_only() {
        let today = date(2024, 3, 20);
        assert!(FilmFilter::Best.matches(&Film::new(1, "A").rated(5), today));
        assert!(!FilmFilter::Best.matches(&Film::new(1, "A").rated(4), today));
        assert!(!FilmFilter::Best.matches(&Film::new(1, "A"), today));
    }

    #[test]
    fn unseen_and_today() {
        let today = date(2024, 3, 20);
        let watched = Film::new(1, "A").watched_on(today);
        assert!(FilmFilter::WatchedToday.matches(&watched, today));
        assert!(!FilmFilter::Unseen.matches(&watched, today));
        assert!(FilmFilter::Unseen.matches(&Film::new(2, "B"), today));
    }
}
