//! Request extractors that turn malformed input into 422 responses.
//!
//! Axum's stock `Json`, `Query` and `Path` rejections answer with plain-text
//! 400/415 bodies. These wrappers run the same extraction, then the
//! `validator` rules on the payload, and report every failure as an
//! [`AppError::Validation`] with `{location, param, message}` entries.

use std::error::Error as _;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use filmlib_core::types::DbId;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

use crate::error::{AppError, FieldError};

/// JSON body that has been deserialized and validated.
///
/// ```ignore
/// async fn add_film(ValidatedJson(input): ValidatedJson<CreateFilm>) -> AppResult<...> { ... }
/// ```
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::field(json_field_error(&rejection)))?;

        value
            .validate()
            .map_err(|errors| validation_errors("body", &errors))?;

        Ok(ValidatedJson(value))
    }
}

/// Query string that has been deserialized and validated.
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::field(FieldError::query("query", rejection.body_text()))
            })?;

        value
            .validate()
            .map_err(|errors| validation_errors("query", &errors))?;

        Ok(ValidatedQuery(value))
    }
}

/// The `{id}` path segment of a film route. Must be a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilmId(pub DbId);

impl<S> FromRequestParts<S> for FilmId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let invalid = || AppError::field(FieldError::params("id", "id must be a positive integer"));

        let Path(id) = Path::<DbId>::from_request_parts(parts, state)
            .await
            .map_err(|_| invalid())?;

        if id < 1 {
            return Err(invalid());
        }
        Ok(FilmId(id))
    }
}

/// Map a JSON rejection to a body field error.
///
/// Deserialization failures name the offending field when serde reports one,
/// either through a "missing field" message or a `watchDate: ...` path
/// prefix. Anything else is reported against `body`.
fn json_field_error(rejection: &JsonRejection) -> FieldError {
    let param = match rejection {
        JsonRejection::JsonDataError(err) => err
            .source()
            .map(|source| source.to_string())
            .or_else(|| err.body_text().split_once(": ").map(|(_, detail)| detail.to_string()))
            .and_then(|detail| field_from_serde_message(&detail)),
        _ => None,
    };
    FieldError::body(param.unwrap_or_else(|| "body".to_string()), rejection.body_text())
}

fn field_from_serde_message(message: &str) -> Option<String> {
    if let Some(rest) = message.strip_prefix("missing field `") {
        return rest.split_once('`').map(|(field, _)| field.to_string());
    }
    let (path, _) = message.split_once(": ")?;
    (!path.is_empty() && !path.contains(char::is_whitespace)).then(|| path.to_string())
}

/// Flatten `validator` errors into field errors, sorted by field name so the
/// response is deterministic. Field names are reported in their camelCase
/// wire form.
fn validation_errors(location: &'static str, errors: &ValidationErrors) -> AppError {
    let mut fields: Vec<FieldError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(&field);
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{field} is invalid ({})", err.code));
                FieldError::new(location, field.clone(), message)
            })
        })
        .collect();
    fields.sort_by(|a, b| a.param.cmp(&b.param));
    AppError::Validation(fields)
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
