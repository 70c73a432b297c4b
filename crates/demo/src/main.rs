//! Builds the sample film library in memory and walks through every
//! collection operation, logging the library after each step.

use chrono::NaiveDate;
use filmlib_core::collection::FilmCollection;
use filmlib_core::film::{Film, FilmPatch};
use filmlib_core::filter::FilmFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "filmlib_demo=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(films) = sample_films() else {
        tracing::error!("Sample library has an invalid watch date");
        return;
    };
    let mut library: FilmCollection = films.into_iter().collect();
    tracing::info!(count = library.len(), "Sample library loaded");
    println!("{library}");

    println!("***** Films sorted by watch date *****");
    print_films(&library.sort_by_watch_date());

    let removed = library.remove_by_id(2);
    tracing::info!(film_id = 2, removed, "Film removed");
    println!("{library}");

    println!("***** Films filtered, only the rated ones *****");
    print_films(&library.filter_rated());

    let patch = FilmPatch {
        is_favorite: Some(true),
        rating: Some(Some(4)),
        ..FilmPatch::default()
    };
    if let Some(film) = library.update(4, &patch) {
        tracing::info!(film_id = film.id, "Film updated");
    }

    let today = chrono::Local::now().date_naive();
    for filter in FilmFilter::ALL {
        let films = library.filter(filter, today);
        tracing::info!(%filter, count = films.len(), "Filter applied");
    }

    library.reset_watch_dates();
    tracing::info!("Watch dates reset");
    println!("{library}");
}

/// The five-film sample library. `None` only if a hard-coded date is invalid.
fn sample_films() -> Option<Vec<Film>> {
    Some(vec![
        Film::new(1, "Inception").favorite(true),
        Film::new(2, "The Dark Knight"),
        Film::new(3, "Pulp Fiction")
            .watched_on(NaiveDate::from_ymd_opt(2024, 1, 15)?)
            .rated(5),
        Film::new(4, "Shrek")
            .watched_on(NaiveDate::from_ymd_opt(2023, 1, 21)?)
            .rated(3),
        Film::new(5, "Star Wars"),
    ])
}

fn print_films(films: &[Film]) {
    for film in films {
        println!("{film}");
    }
}
