//! Error type shared by the resolver, the search backends and the extractor.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The search endpoint returned no candidates.
    #[error("the search returned no results for \"{query}\"")]
    NotFound { query: String },

    /// Multi-album page where no heading came close to the searched album.
    #[error("no album on the multi-album review matches \"{album}\" (best similarity {best:.2})")]
    AmbiguousMatch { album: String, best: f64 },

    #[error("request failed: {0}")]
    Transport(Box<ureq::Error>),

    #[error("failed to read response body: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The search response did not have the shape the backend expects.
    #[error("unexpected {backend} search response: {reason}")]
    SearchFormat { backend: String, reason: String },

    #[error("invalid selector \"{selector}\": {reason}")]
    Selector { selector: String, reason: String },

    /// A field could not be read from the review page.
    #[error("could not extract {field}: {reason}")]
    Extraction { field: &'static str, reason: String },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl From<ureq::Error> for Error {
    fn from(err: ureq::Error) -> Self {
        Error::Transport(Box::new(err))
    }
}

impl Error {
    pub(crate) fn extraction(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Extraction { field, reason: reason.into() }
    }

    pub(crate) fn search_format(backend: &str, reason: impl Into<String>) -> Self {
        Error::SearchFormat { backend: backend.to_string(), reason: reason.into() }
    }
}
