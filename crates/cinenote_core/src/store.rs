//! Owned, injectable storage for submitted comments. The front-end holds
//! exactly one instance; nothing here is global and nothing persists.

use crate::domain::{Comment, CommentId};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommentStore {
    comments: Vec<Comment>,
}

impl CommentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `comment`. Callers are trusted to hand over validated data.
    pub fn add_comment(&mut self, comment: Comment) {
        self.comments.push(comment);
    }

    /// Removes the first comment whose id matches. Unknown ids are silently
    /// tolerated.
    pub fn delete_comment(&mut self, id: CommentId) {
        if let Some(index) = self.comments.iter().position(|comment| comment.id == id) {
            self.comments.remove(index);
        }
    }

    /// Comments in append order, oldest first.
    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
