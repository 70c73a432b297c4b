//! Domain layer for the film library.
//!
//! Holds the [`film::Film`] record with its rating invariant, the in-memory
//! [`collection::FilmCollection`] with its ordering and filtering rules, and
//! the named [`filter::FilmFilter`] predicates shared by the storage layer
//! and the API.

pub mod collection;
pub mod error;
pub mod film;
pub mod filter;
pub mod types;
