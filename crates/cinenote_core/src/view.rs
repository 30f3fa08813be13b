//! Pure projection of a fetched movie into the strings the card displays.
//! Kept apart from the fetch so it can be exercised without any network or
//! rendering environment.

use chrono::NaiveDate;

use crate::domain::Movie;
use crate::fetch::POSTER_IMAGE_BASE_URL;

#[derive(Debug, Clone, PartialEq)]
pub struct MovieCard {
    pub title: String,
    pub poster_url: String,
    pub release_date: String,
    pub overview: String,
    pub vote_summary: String,
}

impl MovieCard {
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.original_title.clone(),
            poster_url: poster_url(&movie.poster_path),
            release_date: format_release_date(&movie.release_date),
            overview: movie.overview.clone(),
            vote_summary: vote_summary(movie.vote_average, movie.vote_count),
        }
    }
}

/// Image host prefix + raw poster path, exactly as the API intends.
pub fn poster_url(poster_path: &str) -> String {
    format!("{POSTER_IMAGE_BASE_URL}{poster_path}")
}

/// `2020-01-15` → `15/01/2020`; anything unparseable is shown as-is.
pub fn format_release_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

pub fn vote_summary(average: f64, count: i64) -> String {
    format!("{average} / 10 ({count} votes)")
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
