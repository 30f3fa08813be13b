//! Events flowing from the backend worker to the UI.

use cinenote_core::Movie;

/// Decoded RGBA poster, sized down for texture upload.
#[derive(Clone)]
pub struct PosterImage {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) rgba: Vec<u8>,
}

pub enum UiEvent {
    MovieLoaded(Movie),
    MovieLoadFailed { message: String },
    PosterLoaded(PosterImage),
    PosterLoadFailed { reason: String },
    WorkerStartupFailed { message: String },
}
