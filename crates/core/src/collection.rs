//! In-memory film collection.
//!
//! Insertion order is the base ordering. Queries never reorder the
//! collection itself; they return new vectors of clones.

use std::cmp::Ordering;
use std::fmt;

use chrono::NaiveDate;

use crate::film::{Film, FilmPatch};
use crate::filter::FilmFilter;
use crate::types::DbId;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilmCollection {
    films: Vec<Film>,
}

impl FilmCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a film. Id uniqueness is the caller's responsibility.
    pub fn add(&mut self, film: Film) {
        self.films.push(film);
    }

    /// Remove every film with the given id, returning how many were removed.
    ///
    /// An unknown id is a no-op.
    pub fn remove_by_id(&mut self, id: DbId) -> usize {
        let before = self.films.len();
        self.films.retain(|film| film.id != id);
        before - self.films.len()
    }

    pub fn get(&self, id: DbId) -> Option<&Film> {
        self.films.iter().find(|film| film.id == id)
    }

    pub fn get_mut(&mut self, id: DbId) -> Option<&mut Film> {
        self.films.iter_mut().find(|film| film.id == id)
    }

    /// Apply a partial update to the first film with the given id.
    pub fn update(&mut self, id: DbId, patch: &FilmPatch) -> Option<&Film> {
        let film = self.get_mut(id)?;
        film.apply(patch);
        Some(film)
    }

    /// Films ordered by ascending watch date.
    ///
    /// Watched films come before unwatched ones. The sort is stable, so
    /// unwatched films (and films sharing a date) keep their insertion order.
    pub fn sort_by_watch_date(&self) -> Vec<Film> {
        let mut sorted = self.films.clone();
        sorted.sort_by(|a, b| compare_watch_dates(a.watch_date, b.watch_date));
        sorted
    }

    /// Rated films only, highest rating first. Ties keep insertion order.
    pub fn filter_rated(&self) -> Vec<Film> {
        let mut rated: Vec<Film> = self
            .films
            .iter()
            .filter(|film| film.rating.is_some())
            .cloned()
            .collect();
        rated.sort_by(|a, b| b.rating.cmp(&a.rating));
        rated
    }

    /// Films matching a named filter. [`FilmFilter::Rated`] uses the
    /// [`FilmCollection::filter_rated`] ordering; every other filter keeps
    /// insertion order.
    pub fn filter(&self, filter: FilmFilter, today: NaiveDate) -> Vec<Film> {
        if filter == FilmFilter::Rated {
            return self.filter_rated();
        }
        self.films
            .iter()
            .filter(|film| filter.matches(film, today))
            .cloned()
            .collect()
    }

    /// Mark every film as not yet watched.
    pub fn reset_watch_dates(&mut self) {
        for film in &mut self.films {
            film.watch_date = None;
        }
    }

    /// Human-readable listing, one film per line.
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn films(&self) -> &[Film] {
        &self.films
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Film> {
        self.films.iter()
    }

    pub fn len(&self) -> usize {
        self.films.len()
    }

    pub fn is_empty(&self) -> bool {
        self.films.is_empty()
    }
}

/// Ordering behind [`FilmCollection::sort_by_watch_date`]: dates ascending,
/// any date before no date, two missing dates equal.
pub fn compare_watch_dates(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

impl fmt::Display for FilmCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Film Library:")?;
        for film in &self.films {
            writeln!(f, "{film}")?;
        }
        Ok(())
    }
}

impl FromIterator<Film> for FilmCollection {
    fn from_iter<I: IntoIterator<Item = Film>>(iter: I) -> Self {
        Self {
            films: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for FilmCollection {
    type Item = Film;
    type IntoIter = std::vec::IntoIter<Film>;

    fn into_iter(self) -> Self::IntoIter {
        self.films.into_iter()
    }
}

impl<'a> IntoIterator for &'a FilmCollection {
    type Item = &'a Film;
    type IntoIter = std::slice::Iter<'a, Film>;

    fn into_iter(self) -> Self::IntoIter {
        self.films.iter()
    }
}
