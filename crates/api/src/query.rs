//! Query parameter types for the film endpoints.

use serde::Deserialize;
use validator::Validate;

/// Ordering applied to a film listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FilmSort {
    /// Insertion order.
    #[default]
    Id,
    /// Ascending watch date, unwatched films last.
    WatchDate,
}

/// `GET /films?title=&minRating=&sort=`.
///
/// `title` and `minRating` select mutually exclusive searches.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListFilmsParams {
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 1, max = 5, message = "minRating must be between 1 and 5"))]
    pub min_rating: Option<i64>,
    #[serde(default)]
    pub sort: FilmSort,
}

/// `GET /filteredFilms?filter=`. A missing filter lists every film.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct FilterParams {
    pub filter: Option<String>,
}
