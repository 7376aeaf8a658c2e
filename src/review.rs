//! A resolved album review.

use std::fmt;

use serde::Serialize;

use crate::error::Result;
use crate::page::{Layout, ReviewPage};

/// The review the resolver settled on, together with its fetched page.
///
/// `matched_artist` is the full artist attribution of the search result
/// (collaborations keep every name); `matched_album` is the single album
/// title that matched, even when the review covers several.
#[derive(Debug, Clone)]
pub struct Review {
    pub searched_artist: String,
    pub searched_album: String,
    pub matched_artist: String,
    pub matched_album: String,
    /// Escaped query string sent to the search endpoint
    pub query: String,
    /// Review URL as returned by the search, usually site-relative
    pub url: String,
    pub page: ReviewPage,
    layout: Layout,
}

/// Every extracted field of a review, ready for serialisation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSummary {
    pub artist: String,
    pub album: String,
    pub url: String,
    pub score: f64,
    pub label: String,
    pub year: String,
    pub cover: String,
    pub best_new_music: bool,
    pub is_multi: bool,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub editorial: String,
}

#[derive(Serialize)]
struct ReviewJson<'a> {
    searched_artist: &'a str,
    searched_album: &'a str,
    matched_artist: &'a str,
    matched_album: &'a str,
    query: &'a str,
    url: &'a str,
    is_multi: bool,
    page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    section: Option<String>,
}

impl Review {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        searched_artist: &str,
        searched_album: &str,
        matched_artist: &str,
        matched_album: &str,
        query: &str,
        url: &str,
        page: ReviewPage,
        layout: Layout,
    ) -> Self {
        Review {
            searched_artist: searched_artist.to_string(),
            searched_album: searched_album.to_string(),
            matched_artist: matched_artist.to_string(),
            matched_album: matched_album.to_string(),
            query: query.to_string(),
            url: url.to_string(),
            page,
            layout,
        }
    }

    pub fn is_multi(&self) -> bool {
        self.page.is_multi()
    }

    /// Artist name the site matched to the search.
    pub fn artist(&self) -> &str {
        self.matched_artist.trim()
    }

    /// Album title the site matched to the search.
    pub fn album(&self) -> &str {
        self.matched_album.trim()
    }

    pub fn score(&self) -> Result<f64> {
        self.page.score(&self.layout)
    }

    pub fn label(&self) -> Result<String> {
        self.page.label(&self.layout)
    }

    /// Release year; reissues give the original and reissue year as `"1999/2014"`.
    pub fn year(&self) -> Result<String> {
        self.page.year(&self.layout)
    }

    /// Link to the album cover.
    pub fn cover(&self) -> Result<String> {
        self.page.cover(&self.layout)
    }

    /// Main review text.
    pub fn editorial(&self) -> Result<String> {
        self.page.editorial(&self.layout)
    }

    pub fn abstract_text(&self) -> Result<String> {
        self.page.abstract_text(&self.layout)
    }

    /// Abstract followed by the editorial.
    pub fn full_text(&self) -> Result<String> {
        Ok(format!("{}{}", self.abstract_text()?, self.editorial()?))
    }

    pub fn best_new_music(&self) -> bool {
        self.page.best_new_music(&self.layout)
    }

    /// Extract every field.  The abstract is optional; anything else missing
    /// is an error.
    pub fn summary(&self) -> Result<ReviewSummary> {
        Ok(ReviewSummary {
            artist: self.artist().to_string(),
            album: self.album().to_string(),
            url: self.url.clone(),
            score: self.score()?,
            label: self.label()?,
            year: self.year()?,
            cover: self.cover()?,
            best_new_music: self.best_new_music(),
            is_multi: self.is_multi(),
            abstract_text: self.abstract_text().ok(),
            editorial: self.editorial()?,
        })
    }

    /// The review's attributes as JSON, with the page (and, for multi-album
    /// reviews, the matched section) included as markup.
    pub fn to_json(&self) -> Result<String> {
        let section = self.page.section(&self.layout)?.map(|s| s.html());
        let json = ReviewJson {
            searched_artist: &self.searched_artist,
            searched_album: &self.searched_album,
            matched_artist: &self.matched_artist,
            matched_album: &self.matched_album,
            query: &self.query,
            url: &self.url,
            is_multi: self.is_multi(),
            page: self.page.html().html(),
            section,
        };
        Ok(serde_json::to_string(&json)?)
    }
}

impl PartialEq for Review {
    /// Two reviews are the same review when they live at the same URL.
    fn eq(&self, other: &Self) -> bool {
        self.url == other.url
    }
}

impl fmt::Display for Review {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.artist(), self.album(), self.url)
    }
}
