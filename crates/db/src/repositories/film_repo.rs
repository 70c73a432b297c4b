//! Repository for the `films` table.

use chrono::NaiveDate;
use filmlib_core::film::MAX_RATING;
use filmlib_core::filter::{last_month_window, FilmFilter};
use filmlib_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::film::{normalize_rating, CreateFilm, FilmRecord, UpdateFilm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, title, is_favorite, watch_date, rating";

/// Provides CRUD and filtered queries for films.
///
/// List queries return rows in id order, which is insertion order.
pub struct FilmRepo;

impl FilmRepo {
    /// Insert a new film owned by `user_id`, returning the created row.
    pub async fn create(
        pool: &SqlitePool,
        user_id: DbId,
        input: &CreateFilm,
    ) -> Result<FilmRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO films (user_id, title, is_favorite, watch_date, rating) \
             VALUES (?, ?, ?, ?, ?) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FilmRecord>(&query)
            .bind(user_id)
            .bind(input.title.trim())
            .bind(input.is_favorite)
            .bind(input.watch_date)
            .bind(normalize_rating(input.rating))
            .fetch_one(pool)
            .await
    }

    /// Find a film by its id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<FilmRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE id = ?");
        sqlx::query_as::<_, FilmRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every film.
    pub async fn list_all(pool: &SqlitePool) -> Result<Vec<FilmRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films ORDER BY id");
        sqlx::query_as::<_, FilmRecord>(&query).fetch_all(pool).await
    }

    /// List films whose favorite flag equals `is_favorite`.
    pub async fn list_by_favorite(
        pool: &SqlitePool,
        is_favorite: bool,
    ) -> Result<Vec<FilmRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE is_favorite = ? ORDER BY id");
        sqlx::query_as::<_, FilmRecord>(&query)
            .bind(is_favorite)
            .fetch_all(pool)
            .await
    }

    /// List films rated at least `min_rating`.
    pub async fn list_with_min_rating(
        pool: &SqlitePool,
        min_rating: i64,
    ) -> Result<Vec<FilmRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE rating >= ? ORDER BY id");
        sqlx::query_as::<_, FilmRecord>(&query)
            .bind(min_rating)
            .fetch_all(pool)
            .await
    }

    /// List films with the top rating.
    pub async fn list_best(pool: &SqlitePool) -> Result<Vec<FilmRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE rating = ? ORDER BY id");
        sqlx::query_as::<_, FilmRecord>(&query)
            .bind(MAX_RATING)
            .fetch_all(pool)
            .await
    }

    /// List rated films, highest rating first, ties in id order.
    pub async fn list_rated(pool: &SqlitePool) -> Result<Vec<FilmRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films WHERE rating IS NOT NULL ORDER BY rating DESC, id"
        );
        sqlx::query_as::<_, FilmRecord>(&query).fetch_all(pool).await
    }

    /// List films watched between `from` and `to`, both inclusive.
    pub async fn list_watched_between(
        pool: &SqlitePool,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<FilmRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM films WHERE watch_date BETWEEN ? AND ? ORDER BY id"
        );
        sqlx::query_as::<_, FilmRecord>(&query)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// List films that have not been watched.
    pub async fn list_unwatched(pool: &SqlitePool) -> Result<Vec<FilmRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM films WHERE watch_date IS NULL ORDER BY id");
        sqlx::query_as::<_, FilmRecord>(&query).fetch_all(pool).await
    }

    /// Case-insensitive substring search on the title.
    ///
    /// The needle is matched literally; `%` and `_` carry no wildcard meaning.
    /// SQLite's `lower()` only folds ASCII, so titles are compared after
    /// Unicode lowercasing on this side.
    pub async fn search_by_title(
        pool: &SqlitePool,
        needle: &str,
    ) -> Result<Vec<FilmRecord>, sqlx::Error> {
        let needle = needle.to_lowercase();
        let films = Self::list_all(pool).await?;
        Ok(films
            .into_iter()
            .filter(|film| film.title.to_lowercase().contains(&needle))
            .collect())
    }

    /// Run the query backing a named filter. `today` anchors the date-based filters.
    pub async fn list_filtered(
        pool: &SqlitePool,
        filter: FilmFilter,
        today: NaiveDate,
    ) -> Result<Vec<FilmRecord>, sqlx::Error> {
        match filter {
            FilmFilter::All => Self::list_all(pool).await,
            FilmFilter::Favorite => Self::list_by_favorite(pool, true).await,
            FilmFilter::Best => Self::list_best(pool).await,
            FilmFilter::LastMonth => {
                let (from, to) = last_month_window(today);
                Self::list_watched_between(pool, from, to).await
            }
            FilmFilter::Unseen => Self::list_unwatched(pool).await,
            FilmFilter::Rated => Self::list_rated(pool).await,
            FilmFilter::WatchedToday => Self::list_watched_between(pool, today, today).await,
        }
    }

    /// Replace every mutable field of a film.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateFilm,
    ) -> Result<Option<FilmRecord>, sqlx::Error> {
        let query = format!(
            "UPDATE films SET \
                title = ?, \
                is_favorite = ?, \
                watch_date = ?, \
                rating = ? \
             WHERE id = ? \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FilmRecord>(&query)
            .bind(input.title.trim())
            .bind(input.is_favorite)
            .bind(input.watch_date)
            .bind(normalize_rating(input.rating))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the favorite flag. Returns `None` if the film does not exist.
    pub async fn update_favorite(
        pool: &SqlitePool,
        id: DbId,
        is_favorite: bool,
    ) -> Result<Option<FilmRecord>, sqlx::Error> {
        let query = format!("UPDATE films SET is_favorite = ? WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as::<_, FilmRecord>(&query)
            .bind(is_favorite)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Set the rating; an out-of-range value clears it.
    /// Returns `None` if the film does not exist.
    pub async fn update_rating(
        pool: &SqlitePool,
        id: DbId,
        rating: i64,
    ) -> Result<Option<FilmRecord>, sqlx::Error> {
        let query = format!("UPDATE films SET rating = ? WHERE id = ? RETURNING {COLUMNS}");
        sqlx::query_as::<_, FilmRecord>(&query)
            .bind(normalize_rating(Some(rating)))
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Clear the watch date of every film, returning how many rows changed.
    pub async fn clear_watch_dates(pool: &SqlitePool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("UPDATE films SET watch_date = NULL WHERE watch_date IS NOT NULL")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete a film. Returns `false` if no row with the given `id` existed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM films WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
