//! Route definitions for films.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::films;
use crate::state::AppState;

/// Film routes, mounted at the root.
///
/// The mutation routes accept both `PUT` and `PATCH`.
///
/// ```text
/// GET    /films                      -> list_films
/// GET    /films/{id}                 -> get_film
/// GET    /filteredFilms              -> filtered_films
/// POST   /addFilm                    -> add_film
/// PUT    /updateFav/{id}/favorite    -> update_favorite
/// PUT    /updateRating/{id}/rating   -> update_rating
/// PUT    /updateFilm/{id}            -> update_film
/// DELETE /deleteFilm/{id}            -> delete_film
/// PUT    /resetWatchDates            -> reset_watch_dates
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/films", get(films::list_films))
        .route("/films/{id}", get(films::get_film))
        .route("/filteredFilms", get(films::filtered_films))
        .route("/addFilm", post(films::add_film))
        .route(
            "/updateFav/{id}/favorite",
            put(films::update_favorite).patch(films::update_favorite),
        )
        .route(
            "/updateRating/{id}/rating",
            put(films::update_rating).patch(films::update_rating),
        )
        .route(
            "/updateFilm/{id}",
            put(films::update_film).patch(films::update_film),
        )
        .route("/deleteFilm/{id}", delete(films::delete_film))
        .route("/resetWatchDates", put(films::reset_watch_dates))
}
