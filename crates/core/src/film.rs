//! The film record and its rating invariant.
//!
//! A [`Film`] is created fully populated except possibly for its watch date
//! and rating. Ratings live in a [`Rating`] newtype so an out-of-range value
//! can never be stored: anything outside `1..=5` collapses to "unrated".

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;

use crate::types::DbId;

/// Lowest accepted rating.
pub const MIN_RATING: i64 = 1;

/// Highest accepted rating.
pub const MAX_RATING: i64 = 5;

/// Display format for watch dates, e.g. `January 15, 2024`.
const WATCH_DATE_FORMAT: &str = "%B %-d, %Y";

/// A score on the 1-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    /// Build a rating, returning `None` for values outside `1..=5`.
    pub fn new(value: i64) -> Option<Self> {
        if (MIN_RATING..=MAX_RATING).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn get(self) -> i64 {
        i64::from(self.0)
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single trackable movie entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: DbId,
    pub title: String,
    pub is_favorite: bool,
    /// `None` means the film has not been watched yet.
    pub watch_date: Option<NaiveDate>,
    pub rating: Option<Rating>,
}

impl Film {
    /// A not-yet-watched, unrated, non-favorite film.
    pub fn new(id: DbId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            is_favorite: false,
            watch_date: None,
            rating: None,
        }
    }

    pub fn favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    pub fn watched_on(mut self, date: NaiveDate) -> Self {
        self.watch_date = Some(date);
        self
    }

    /// Builder form of [`Film::set_rating`]; out-of-range values leave the film unrated.
    pub fn rated(mut self, rating: i64) -> Self {
        self.set_rating(Some(rating));
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_favorite(&mut self, is_favorite: bool) {
        self.is_favorite = is_favorite;
    }

    pub fn set_watch_date(&mut self, date: Option<NaiveDate>) {
        self.watch_date = date;
    }

    /// Set or clear the rating. Values outside `1..=5` (0, 6, negatives) clear it.
    pub fn set_rating(&mut self, rating: Option<i64>) {
        self.rating = rating.and_then(Rating::new);
    }

    pub fn is_watched(&self) -> bool {
        self.watch_date.is_some()
    }

    pub fn formatted_watch_date(&self) -> Option<String> {
        self.watch_date
            .map(|date| date.format(WATCH_DATE_FORMAT).to_string())
    }

    /// Apply a partial update field by field.
    pub fn apply(&mut self, patch: &FilmPatch) {
        if let Some(title) = &patch.title {
            self.set_title(title.clone());
        }
        if let Some(is_favorite) = patch.is_favorite {
            self.set_favorite(is_favorite);
        }
        if let Some(watch_date) = patch.watch_date {
            self.set_watch_date(watch_date);
        }
        if let Some(rating) = patch.rating {
            self.set_rating(rating);
        }
    }
}

impl fmt::Display for Film {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Film ID: {}, Title: {}, Favorite: {}",
            self.id,
            self.title,
            if self.is_favorite { "Yes" } else { "No" }
        )?;
        if let Some(date) = self.formatted_watch_date() {
            write!(f, ", Watch Date: {date}")?;
        }
        if let Some(rating) = self.rating {
            write!(f, ", Rating: {rating}")?;
        }
        Ok(())
    }
}

/// Partial update of the mutable film fields.
///
/// The outer `Option` means "leave unchanged"; for `watch_date` and `rating`
/// the inner `None` clears the value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmPatch {
    pub title: Option<String>,
    pub is_favorite: Option<bool>,
    pub watch_date: Option<Option<NaiveDate>>,
    pub rating: Option<Option<i64>>,
}
