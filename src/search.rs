//! Pitchfork search with pluggable response formats.
//!
//! The [`SearchBackend`] trait turns one search response format into a list
//! of [`Candidate`]s in page order.  The site has served three formats over
//! time, each with its own backend:
//!
//! * [`EmbeddedStateSearch`] – search page with the app state embedded as JSON
//! * [`AutocompleteSearch`] – the JSON autocomplete endpoint
//! * [`ResultListSearch`] – the rendered HTML result list
//!
//! The resolver only ever sees candidates, so a format change means a new
//! backend, never a change to the matching logic.

use std::fmt;
use std::str::FromStr;

use scraper::{Html, Selector};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::matcher::Delimiters;

// ── Query / candidates ───────────────────────────────────────────────────────

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub artist: String,
    pub album: String,
}

impl Query {
    pub fn new(artist: &str, album: &str) -> Self {
        Query { artist: artist.to_string(), album: album.to_string() }
    }

    /// Free-text query sent to the search endpoint.
    pub fn text(&self) -> String {
        format!("{} {}", self.artist, self.album)
    }

    /// Percent-encoded form of [`Query::text`].
    pub fn escaped(&self) -> String {
        urlencoding::encode(&self.text()).into_owned()
    }
}

/// One search result before scoring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Display artist; several artists are joined by the artist delimiter.
    pub artist: String,
    /// Display title; reviews covering several albums join them with the album delimiter.
    pub title: String,
    /// Review page URL, usually relative to the site root.
    pub url: String,
}

impl Candidate {
    /// Build a candidate, rejecting results that name no artist or no title:
    /// a resolved review always reports both.
    fn named(backend: &str, artist: String, title: String, url: String) -> Result<Self> {
        if artist.trim().is_empty() {
            return Err(Error::search_format(backend, format!("result {} has no artist", url)));
        }
        if title.trim().is_empty() {
            return Err(Error::search_format(backend, format!("result {} has no title", url)));
        }
        Ok(Candidate { artist, title, url })
    }
}

// ── Trait ─────────────────────────────────────────────────────────────────────

/// A search response format.
pub trait SearchBackend {
    /// Short display name, e.g. "embedded-state".
    fn name(&self) -> &str;

    /// Path (relative to the site base) of the search request for an
    /// already escaped query.
    fn search_path(&self, escaped_query: &str) -> String;

    /// Parse a search response body into candidates, in page order.
    /// An empty list means the search found nothing.
    fn parse_candidates(&self, body: &str) -> Result<Vec<Candidate>>;
}

/// Which [`SearchBackend`] to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFormat {
    #[default]
    Embedded,
    Autocomplete,
    Results,
}

impl SearchFormat {
    pub fn backend(self, delimiters: &Delimiters) -> Box<dyn SearchBackend> {
        match self {
            SearchFormat::Embedded => Box::new(EmbeddedStateSearch::new(delimiters.clone())),
            SearchFormat::Autocomplete => Box::new(AutocompleteSearch),
            SearchFormat::Results => Box::new(ResultListSearch::new(delimiters.clone())),
        }
    }
}

impl FromStr for SearchFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "embedded" => Ok(SearchFormat::Embedded),
            "autocomplete" | "ac" => Ok(SearchFormat::Autocomplete),
            "results" | "html" => Ok(SearchFormat::Results),
            other => Err(format!(
                "unknown search format '{}' (expected embedded, autocomplete or results)",
                other
            )),
        }
    }
}

impl fmt::Display for SearchFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchFormat::Embedded => "embedded",
            SearchFormat::Autocomplete => "autocomplete",
            SearchFormat::Results => "results",
        };
        f.write_str(name)
    }
}

// ── Embedded app state ───────────────────────────────────────────────────────

const STATE_START: &str = "window.App=";
const STATE_END: &str = ";</script>";
const ALBUM_REVIEWS_POINTER: &str = "/context/dispatcher/stores/SearchStore/results/albumreviews/items";

#[derive(Debug, Deserialize)]
struct StateItem {
    url: String,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    artists: Vec<StateArtist>,
    #[serde(default)]
    tombstone: Option<StateTombstone>,
}

#[derive(Debug, Deserialize)]
struct StateArtist {
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct StateTombstone {
    #[serde(default)]
    albums: Vec<StateTombstoneAlbum>,
}

#[derive(Debug, Deserialize)]
struct StateTombstoneAlbum {
    album: StateAlbum,
}

#[derive(Debug, Deserialize)]
struct StateAlbum {
    display_name: String,
}

/// Search page whose results live in a `window.App=…;</script>` JSON blob.
pub struct EmbeddedStateSearch {
    delimiters: Delimiters,
}

impl EmbeddedStateSearch {
    pub fn new(delimiters: Delimiters) -> Self {
        EmbeddedStateSearch { delimiters }
    }

    fn candidate_from_item(&self, item: StateItem) -> Result<Candidate> {
        let artist = item.artists.iter()
            .map(|a| a.display_name.trim())
            .collect::<Vec<_>>()
            .join(&self.delimiters.artist);

        let title = match item.title {
            Some(title) if !title.trim().is_empty() => title,
            _ => item.tombstone
                .map(|t| {
                    t.albums.iter()
                        .map(|a| a.album.display_name.trim())
                        .collect::<Vec<_>>()
                        .join(&self.delimiters.album)
                })
                .unwrap_or_default(),
        };

        Candidate::named(self.name(), artist, title, item.url)
    }
}

impl SearchBackend for EmbeddedStateSearch {
    fn name(&self) -> &str {
        "embedded-state"
    }

    fn search_path(&self, escaped_query: &str) -> String {
        format!("search/?query={}", escaped_query)
    }

    fn parse_candidates(&self, body: &str) -> Result<Vec<Candidate>> {
        let start = body.find(STATE_START)
            .ok_or_else(|| Error::search_format(self.name(), "no embedded app state"))?
            + STATE_START.len();
        let rest = &body[start..];
        let end = rest.find(STATE_END)
            .ok_or_else(|| Error::search_format(self.name(), "unterminated app state"))?;

        let state: serde_json::Value = serde_json::from_str(&rest[..end])?;
        let items = match state.pointer(ALBUM_REVIEWS_POINTER) {
            Some(items) => items.clone(),
            None => return Ok(Vec::new()),
        };
        let items: Vec<StateItem> = serde_json::from_value(items)?;

        items.into_iter().map(|item| self.candidate_from_item(item)).collect()
    }
}

// ── Autocomplete ─────────────────────────────────────────────────────────────

const REVIEWS_GROUP: &str = "Reviews";
const NAME_SEPARATOR: &str = " - ";

#[derive(Debug, Deserialize)]
struct AutocompleteGroup {
    label: String,
    #[serde(default)]
    objects: Vec<AutocompleteObject>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteObject {
    name: String,
    url: String,
}

/// The JSON autocomplete endpoint: groups of objects named "Artist - Album".
pub struct AutocompleteSearch;

impl SearchBackend for AutocompleteSearch {
    fn name(&self) -> &str {
        "autocomplete"
    }

    fn search_path(&self, escaped_query: &str) -> String {
        format!("search/ac/?query={}", escaped_query)
    }

    fn parse_candidates(&self, body: &str) -> Result<Vec<Candidate>> {
        let groups: Vec<AutocompleteGroup> = serde_json::from_str(body)?;

        groups.into_iter()
            .filter(|g| g.label == REVIEWS_GROUP)
            .flat_map(|g| g.objects)
            .map(|obj| {
                // Names without the separator stand for both artist and title.
                let (artist, title) = match obj.name.split_once(NAME_SEPARATOR) {
                    Some((artist, title)) => (artist.trim().to_string(), title.trim().to_string()),
                    None => (obj.name.trim().to_string(), obj.name.trim().to_string()),
                };
                Candidate::named(self.name(), artist, title, obj.url)
            })
            .collect()
    }
}

// ── Rendered result list ─────────────────────────────────────────────────────

/// The rendered HTML search page, one `.review` block per result.
pub struct ResultListSearch {
    delimiters: Delimiters,
    review: Selector,
    link: Selector,
    artist: Selector,
    album: Selector,
}

impl ResultListSearch {
    pub fn new(delimiters: Delimiters) -> Self {
        ResultListSearch {
            delimiters,
            review: Selector::parse(".review").unwrap(),
            link: Selector::parse("a.review__link").unwrap(),
            artist: Selector::parse(".review__title-artist li").unwrap(),
            album: Selector::parse(".review__title-album").unwrap(),
        }
    }
}

impl SearchBackend for ResultListSearch {
    fn name(&self) -> &str {
        "result-list"
    }

    fn search_path(&self, escaped_query: &str) -> String {
        format!("search/?query={}", escaped_query)
    }

    fn parse_candidates(&self, body: &str) -> Result<Vec<Candidate>> {
        let document = Html::parse_document(body);
        let mut candidates = Vec::new();

        for review in document.select(&self.review) {
            let url = match review.select(&self.link).next().and_then(|a| a.value().attr("href")) {
                Some(href) => href.trim().to_string(),
                None => {
                    log::debug!("Skipping search result without a review link");
                    continue;
                }
            };

            let artist = review.select(&self.artist)
                .map(|li| li.text().collect::<String>().trim().to_string())
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
                .join(&self.delimiters.artist);

            let title = review.select(&self.album)
                .next()
                .map(|el| el.text().collect::<String>().trim().to_string())
                .unwrap_or_default();

            candidates.push(Candidate::named(self.name(), artist, title, url)?);
        }

        Ok(candidates)
    }
}
