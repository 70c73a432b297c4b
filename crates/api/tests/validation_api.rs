//! HTTP-level tests for request validation.
//!
//! Every rejected input answers 422 with `code: VALIDATION_ERROR` and an
//! `errors` list of `{location, param, message}` entries.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, delete, get, post_json, post_raw, put_json, seed_library};
use serde_json::{json, Value};
use sqlx::SqlitePool;

/// Assert a 422 body and return its `errors` list.
fn validation_errors(json: &Value) -> Vec<Value> {
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Invalid request");
    json["errors"]
        .as_array()
        .expect("errors should be an array")
        .clone()
}

// ---------------------------------------------------------------------------
// Body validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_film_rejects_blank_title(pool: SqlitePool) {
    let response = post_json(build_test_app(pool.clone()), "/addFilm", json!({"title": "   "})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = validation_errors(&body_json(response).await);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["location"], "body");
    assert_eq!(errors[0]["param"], "title");
    assert_eq!(errors[0]["message"], "title must not be empty");

    // Nothing was stored.
    let response = get(build_test_app(pool), "/films").await;
    assert_eq!(body_json(response).await["data"], json!([]));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_film_reports_every_bad_field(pool: SqlitePool) {
    let response = post_json(
        build_test_app(pool),
        "/addFilm",
        json!({"title": "", "rating": 9}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = validation_errors(&body_json(response).await);
    let params: Vec<&str> = errors.iter().map(|e| e["param"].as_str().unwrap()).collect();
    assert_eq!(params, vec!["rating", "title"]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_film_rejects_malformed_date(pool: SqlitePool) {
    let response = post_json(
        build_test_app(pool),
        "/addFilm",
        json!({"title": "Shrek", "watchDate": "21/01/2023"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = validation_errors(&body_json(response).await);
    assert_eq!(errors[0]["location"], "body");
    assert_eq!(errors[0]["param"], "watchDate");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_film_rejects_missing_title(pool: SqlitePool) {
    let response = post_json(build_test_app(pool), "/addFilm", json!({"rating": 3})).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = validation_errors(&body_json(response).await);
    assert_eq!(errors[0]["location"], "body");
    assert_eq!(errors[0]["param"], "title");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_film_rejects_malformed_json(pool: SqlitePool) {
    let response = post_raw(
        build_test_app(pool),
        "/addFilm",
        "application/json",
        "{\"title\": ",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = validation_errors(&body_json(response).await);
    assert_eq!(errors[0]["param"], "body");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_add_film_rejects_missing_content_type(pool: SqlitePool) {
    let response = post_raw(
        build_test_app(pool),
        "/addFilm",
        "text/plain",
        "{\"title\": \"Shrek\"}",
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_rating_rejects_out_of_range(pool: SqlitePool) {
    let ids = seed_library(&pool).await;
    let uri = format!("/updateRating/{}/rating", ids[0]);

    for rating in [0, 6, -1] {
        let response = put_json(build_test_app(pool.clone()), &uri, json!({"rating": rating})).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "rating {rating}");

        let errors = validation_errors(&body_json(response).await);
        assert_eq!(errors[0]["param"], "rating");
        assert_eq!(errors[0]["message"], "rating must be between 1 and 5");
    }

    // The stored rating is untouched.
    let response = get(build_test_app(pool), &format!("/films/{}", ids[0])).await;
    assert!(body_json(response).await["data"]["rating"].is_null());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_favorite_requires_boolean(pool: SqlitePool) {
    let ids = seed_library(&pool).await;

    let response = put_json(
        build_test_app(pool),
        &format!("/updateFav/{}/favorite", ids[0]),
        json!({"isFavorite": "yes"}),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = validation_errors(&body_json(response).await);
    assert_eq!(errors[0]["param"], "isFavorite");
}

// ---------------------------------------------------------------------------
// Path validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_non_positive_or_non_numeric_id_is_rejected(pool: SqlitePool) {
    for uri in ["/films/0", "/films/-3", "/films/abc"] {
        let response = get(build_test_app(pool.clone()), uri).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");

        let errors = validation_errors(&body_json(response).await);
        assert_eq!(errors[0]["location"], "params");
        assert_eq!(errors[0]["param"], "id");
    }

    let response = delete(build_test_app(pool), "/deleteFilm/zero").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ---------------------------------------------------------------------------
// Query validation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_filter_is_rejected(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/filteredFilms?filter=bogus").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = validation_errors(&body_json(response).await);
    assert_eq!(errors[0]["location"], "query");
    assert_eq!(errors[0]["param"], "filter");
    assert!(errors[0]["message"].as_str().unwrap().contains("lastmonth"));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_min_rating_out_of_range_is_rejected(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/films?minRating=6").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = validation_errors(&body_json(response).await);
    assert_eq!(errors[0]["location"], "query");
    assert_eq!(errors[0]["param"], "minRating");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_title_and_min_rating_are_exclusive(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/films?title=pulp&minRating=3").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = validation_errors(&body_json(response).await);
    assert_eq!(errors[0]["location"], "query");
    assert_eq!(errors[0]["param"], "minRating");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn test_unknown_sort_is_rejected(pool: SqlitePool) {
    let response = get(build_test_app(pool), "/films?sort=rating").await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
