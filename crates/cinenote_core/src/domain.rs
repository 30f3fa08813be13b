use chrono::{DateTime, Local};
use serde::Deserialize;

use crate::validation::ValidatedComment;

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub i64);
    };
}

id_newtype!(CommentId);

/// Movie record as served by the movie API. Unknown payload fields are
/// ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
pub struct Movie {
    pub poster_path: String,
    pub original_title: String,
    pub release_date: String,
    pub overview: String,
    pub vote_average: f64,
    pub vote_count: i64,
}

/// A visitor review. Immutable once constructed; removed only by id.
#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub rating: u8,
    pub posted_at: String,
}

impl Comment {
    /// Builds a comment from validated form data. The id derives from the
    /// creation instant; millisecond precision is enough for one session.
    pub fn new(validated: ValidatedComment, created_at: DateTime<Local>) -> Self {
        Self {
            id: CommentId(created_at.timestamp_millis()),
            text: validated.comment,
            rating: validated.note,
            posted_at: created_at.format("%d/%m/%Y").to_string(),
        }
    }
}
