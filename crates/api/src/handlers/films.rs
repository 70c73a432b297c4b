//! Handlers for the film resource.
//!
//! Each handler validates its input through the extractors in
//! [`crate::extract`], then maps onto a single [`FilmRepo`] call. An unknown
//! id is reported by the repository as an absent result and turned into a
//! 404 here.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use filmlib_core::collection::compare_watch_dates;
use filmlib_core::error::CoreError;
use filmlib_core::filter::FilmFilter;
use filmlib_core::types::DbId;
use filmlib_db::models::film::{CreateFilm, UpdateFavorite, UpdateFilm, UpdateRating};
use filmlib_db::repositories::FilmRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult, FieldError};
use crate::extract::{FilmId, ValidatedJson, ValidatedQuery};
use crate::query::{FilmSort, FilterParams, ListFilmsParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Result payload of a bulk watch-date reset.
#[derive(Debug, Serialize)]
pub struct ResetResult {
    pub updated: u64,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// GET /films?title=&minRating=&sort=
///
/// List films, optionally narrowed by a case-insensitive title search or a
/// minimum rating, and optionally ordered by watch date.
pub async fn list_films(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<ListFilmsParams>,
) -> AppResult<impl IntoResponse> {
    let mut films = match (&params.title, params.min_rating) {
        (Some(_), Some(_)) => {
            return Err(AppError::field(FieldError::query(
                "minRating",
                "title and minRating cannot be combined",
            )));
        }
        (Some(title), None) => FilmRepo::search_by_title(&state.pool, title).await?,
        (None, Some(min_rating)) => FilmRepo::list_with_min_rating(&state.pool, min_rating).await?,
        (None, None) => FilmRepo::list_all(&state.pool).await?,
    };

    if params.sort == FilmSort::WatchDate {
        films.sort_by(|a, b| compare_watch_dates(a.watch_date, b.watch_date));
    }

    Ok(Json(DataResponse { data: films }))
}

/// GET /films/{id}
pub async fn get_film(
    State(state): State<AppState>,
    FilmId(id): FilmId,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse { data: film }))
}

/// GET /filteredFilms?filter=favorite|best|lastmonth|unseen|rated|today
///
/// Date-based filters are anchored on the server's local date.
pub async fn filtered_films(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<FilterParams>,
) -> AppResult<impl IntoResponse> {
    let filter = match params.filter.as_deref() {
        None | Some("") => FilmFilter::All,
        Some(name) => name.parse::<FilmFilter>().map_err(|err| match err {
            CoreError::Validation(msg) => AppError::field(FieldError::query("filter", msg)),
            other => AppError::Core(other),
        })?,
    };

    let today = chrono::Local::now().date_naive();
    let films = FilmRepo::list_filtered(&state.pool, filter, today).await?;

    tracing::debug!(%filter, count = films.len(), "Filtered films");

    Ok(Json(DataResponse { data: films }))
}

// ---------------------------------------------------------------------------
// Mutations
// ---------------------------------------------------------------------------

/// POST /addFilm
pub async fn add_film(
    State(state): State<AppState>,
    ValidatedJson(input): ValidatedJson<CreateFilm>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::create(&state.pool, state.config.owner_user_id, &input).await?;

    tracing::info!(film_id = film.id, title = %film.title, "Film added");

    Ok((StatusCode::CREATED, Json(DataResponse { data: film })))
}

/// PUT /updateFav/{id}/favorite
pub async fn update_favorite(
    State(state): State<AppState>,
    FilmId(id): FilmId,
    ValidatedJson(input): ValidatedJson<UpdateFavorite>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::update_favorite(&state.pool, id, input.is_favorite)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(film_id = id, is_favorite = film.is_favorite, "Favorite flag updated");

    Ok(Json(DataResponse { data: film }))
}

/// PUT /updateRating/{id}/rating
pub async fn update_rating(
    State(state): State<AppState>,
    FilmId(id): FilmId,
    ValidatedJson(input): ValidatedJson<UpdateRating>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::update_rating(&state.pool, id, input.rating)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(film_id = id, rating = input.rating, "Rating updated");

    Ok(Json(DataResponse { data: film }))
}

/// PUT /updateFilm/{id}
///
/// Replace every mutable field. Omitted `watchDate` / `rating` are cleared.
pub async fn update_film(
    State(state): State<AppState>,
    FilmId(id): FilmId,
    ValidatedJson(input): ValidatedJson<UpdateFilm>,
) -> AppResult<impl IntoResponse> {
    let film = FilmRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(film_id = id, "Film updated");

    Ok(Json(DataResponse { data: film }))
}

/// DELETE /deleteFilm/{id}
pub async fn delete_film(
    State(state): State<AppState>,
    FilmId(id): FilmId,
) -> AppResult<impl IntoResponse> {
    if !FilmRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(film_id = id, "Film deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// PUT /resetWatchDates
///
/// Mark every film as not yet watched.
pub async fn reset_watch_dates(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let updated = FilmRepo::clear_watch_dates(&state.pool).await?;

    tracing::info!(updated, "Watch dates reset");

    Ok(Json(DataResponse {
        data: ResetResult { updated },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Film", id })
}
