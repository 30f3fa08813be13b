//! Commands queued from the UI to the backend worker.

pub enum BackendCommand {
    /// One-shot fetch of the random movie, issued at app construction.
    LoadMovie,
    FetchPoster { url: String },
}
