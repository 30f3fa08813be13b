//! Core logic for CinéNote: the one-shot movie fetch, comment validation
//! and storage, and the pure projection of a movie into its displayed card.
//! Everything here is testable without a rendering environment; the desktop
//! front-end only wires these pieces to widgets.

pub mod domain;
pub mod fetch;
pub mod store;
pub mod validation;
pub mod view;

pub use domain::{Comment, CommentId, Movie};
pub use fetch::{fetch_random_movie, MovieFetchError, DEFAULT_API_BASE_URL};
pub use store::CommentStore;
pub use validation::{validate, CommentDraft, FieldErrors, ValidatedComment};
pub use view::MovieCard;
