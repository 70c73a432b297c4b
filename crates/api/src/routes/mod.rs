pub mod films;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the API route tree.
///
/// Route hierarchy:
///
/// ```text
/// /films                         list (search by title / minimum rating, sort)
/// /films/{id}                    get
/// /filteredFilms                 named filter (favorite, best, lastmonth, unseen, rated, today)
/// /addFilm                       create
/// /updateFav/{id}/favorite       set favorite flag
/// /updateRating/{id}/rating      set rating
/// /updateFilm/{id}               replace record
/// /deleteFilm/{id}               delete
/// /resetWatchDates               clear every watch date
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(films::router())
}
