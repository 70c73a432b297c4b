//! Film entity model and DTOs.

use chrono::NaiveDate;
use filmlib_core::film::{Film, Rating};
use filmlib_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// A row from the `films` table.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilmRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub is_favorite: bool,
    pub watch_date: Option<NaiveDate>,
    pub rating: Option<i64>,
}

impl FilmRecord {
    /// Convert into the domain type. A stored rating outside `1..=5`
    /// becomes "unrated".
    pub fn into_film(self) -> Film {
        let mut film = Film::new(self.id, self.title).favorite(self.is_favorite);
        film.set_watch_date(self.watch_date);
        film.set_rating(self.rating);
        film
    }
}

/// DTO for adding a film.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateFilm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    pub is_favorite: bool,
    pub watch_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i64>,
}

/// DTO for replacing every mutable field of a film.
///
/// Omitted `watchDate` / `rating` clear the stored values.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFilm {
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[serde(default)]
    pub is_favorite: bool,
    pub watch_date: Option<NaiveDate>,
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: Option<i64>,
}

/// DTO for toggling the favorite flag.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFavorite {
    pub is_favorite: bool,
}

/// DTO for rating a film.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateRating {
    #[validate(range(min = 1, max = 5, message = "rating must be between 1 and 5"))]
    pub rating: i64,
}

/// Collapse a rating to its stored form; out-of-range values become `NULL`.
pub(crate) fn normalize_rating(rating: Option<i64>) -> Option<i64> {
    rating.and_then(Rating::new).map(Rating::get)
}

fn not_blank(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("title must not be empty".into()));
    }
    Ok(())
}
