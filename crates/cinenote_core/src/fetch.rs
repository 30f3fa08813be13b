//! One-shot retrieval of the random movie record.

use reqwest::Client;
use thiserror::Error;
use url::Url;

use crate::domain::Movie;

pub const DEFAULT_API_BASE_URL: &str = "https://jsonfakery.com";
pub const POSTER_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/original";
const RANDOM_MOVIE_PATH: &str = "movies/random/1";

/// Shown when the technical cause only belongs in the log.
pub const GENERIC_FETCH_MESSAGE: &str =
    "Une erreur est survenue, merci de réessayer plus tard.";

#[derive(Debug, Error)]
pub enum MovieFetchError {
    /// The API answered with a non-success status; the body is kept verbatim
    /// for display.
    #[error("Erreur {status} : {body}")]
    Status { status: u16, body: String },
    #[error("movie request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid API base URL: {0}")]
    InvalidBaseUrl(#[from] url::ParseError),
    #[error("movie payload was empty")]
    EmptyPayload,
}

impl MovieFetchError {
    /// Banner text: HTTP errors are shown verbatim (status code plus body),
    /// everything else collapses to the generic localized message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { .. } => self.to_string(),
            Self::Transport(_) | Self::InvalidBaseUrl(_) | Self::EmptyPayload => {
                GENERIC_FETCH_MESSAGE.to_string()
            }
        }
    }
}

fn random_movie_url(base_url: &str) -> Result<Url, url::ParseError> {
    Url::parse(base_url)?.join(RANDOM_MOVIE_PATH)
}

/// Single attempt, no retry, no timeout. The endpoint returns a one-element
/// collection; the first element becomes the active movie.
pub async fn fetch_random_movie(http: &Client, base_url: &str) -> Result<Movie, MovieFetchError> {
    let url = random_movie_url(base_url)?;
    tracing::debug!(%url, "requesting random movie");

    let response = http.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(MovieFetchError::Status {
            status: status.as_u16(),
            body,
        });
    }

    let movies: Vec<Movie> = response.json().await?;
    movies.into_iter().next().ok_or(MovieFetchError::EmptyPayload)
}

#[cfg(test)]
#[path = "tests/fetch_tests.rs"]
mod tests;
