//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async query methods
//! that accept `&SqlitePool` as the first argument. Every statement is
//! parameterized; no user input is ever spliced into SQL text.

pub mod film_repo;

pub use film_repo::FilmRepo;
