//! Search-and-match resolution: (artist, album) → [`Review`].
//!
//! 1. Query the search endpoint through the configured [`SearchBackend`].
//! 2. Score every candidate (see [`crate::matcher`]) and keep the best one.
//! 3. Fetch the winner's review page.
//! 4. On a multi-album page, find the heading closest to the searched album
//!    and scope the review to that album's section.
//!
//! Each step runs once; nothing is retried.

use url::Url;

use crate::client::{HttpClient, Transport};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::matcher::{self, Delimiters};
use crate::page::{Layout, ReviewPage, SectionRef};
use crate::review::Review;
use crate::search::{Candidate, Query, SearchBackend};
use scraper::Html;

pub const DEFAULT_BASE_URL: &str = "https://pitchfork.com/";

/// A multi-album heading must reach this similarity to count as a match.
pub const DEFAULT_HEADING_CUTOFF: f64 = 0.1;

/// Resolves (artist, album) pairs to reviews.  Holds no per-search state, so
/// one resolver can serve any number of searches.
pub struct Resolver {
    transport: Box<dyn Transport>,
    backend: Box<dyn SearchBackend>,
    base_url: Url,
    layout: Layout,
    delimiters: Delimiters,
    heading_cutoff: f64,
}

impl Resolver {
    /// Resolver with the HTTP client, search format, delimiters and layout
    /// taken from `config` (defaults for anything unset).
    pub fn from_config(config: &Config) -> Result<Self> {
        let delimiters = config.delimiters();
        let backend = config.search_format().backend(&delimiters);
        let transport = HttpClient::new(config.user_agent(), config.timeout());

        let mut resolver = Resolver::with_parts(Box::new(transport), backend, config.base_url())?;
        resolver.layout = Layout::compile(&config.layout())?;
        resolver.delimiters = delimiters;
        resolver.heading_cutoff = config.heading_cutoff();
        Ok(resolver)
    }

    /// Resolver over an arbitrary transport and search backend, with the
    /// default layout, delimiters and heading cutoff.
    pub fn with_parts(
        transport: Box<dyn Transport>,
        backend: Box<dyn SearchBackend>,
        base_url: &str,
    ) -> Result<Self> {
        Ok(Resolver {
            transport,
            backend,
            base_url: Url::parse(base_url)?,
            layout: Layout::default(),
            delimiters: Delimiters::default(),
            heading_cutoff: DEFAULT_HEADING_CUTOFF,
        })
    }

    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Run the search request and return the candidates in page order.
    pub fn candidates(&self, query: &Query) -> Result<Vec<Candidate>> {
        let search_url = self.base_url.join(&self.backend.search_path(&query.escaped()))?;
        log::info!("Searching ({}) for \"{}\"", self.backend.name(), query.text());

        let body = self.transport.get(search_url.as_str())?;
        let candidates = self.backend.parse_candidates(&body)?;
        log::debug!("{} candidate(s)", candidates.len());
        Ok(candidates)
    }

    /// Find the review of `album` by `artist`.
    ///
    /// Fails with [`Error::NotFound`] when the search has no results and with
    /// [`Error::AmbiguousMatch`] when the winning page reviews several albums
    /// none of which resembles `album`.
    pub fn search(&self, artist: &str, album: &str) -> Result<Review> {
        let query = Query::new(artist, album);
        let candidates = self.candidates(&query)?;

        let winner = matcher::select(&candidates, &query, &self.delimiters)
            .ok_or_else(|| Error::NotFound { query: query.text() })?;
        log::info!(
            "Matched {} - {} (score {:.3})",
            winner.candidate.artist, winner.album.fragment, winner.combined
        );

        let page_url = self.base_url.join(&winner.candidate.url)?;
        let html = Html::parse_document(&self.transport.get(page_url.as_str())?);

        let (page, matched_album) = if self.layout.is_multi(&html) {
            let (section, heading) = self.locate_section(&html, album)?;
            log::info!("Multi-album review, using section \"{}\"", heading);
            (ReviewPage::Multi(html, section), heading)
        } else {
            (ReviewPage::Single(html), winner.album.fragment.clone())
        };

        Ok(Review::new(
            artist,
            album,
            &winner.candidate.artist,
            &matched_album,
            &query.escaped(),
            &winner.candidate.url,
            page,
            self.layout.clone(),
        ))
    }

    /// Pick the album heading closest to `album`, first one on ties.
    fn locate_section(&self, html: &Html, album: &str) -> Result<(SectionRef, String)> {
        let mut best: Option<(usize, f64, String)> = None;

        for (idx, heading) in self.layout.headings(html).into_iter().enumerate() {
            let m = matcher::best_fragment(&heading, album, &self.delimiters.album);
            log::debug!("  heading {:.3} {}", m.score, heading);
            if best.as_ref().map_or(true, |(_, score, _)| m.score > *score) {
                best = Some((idx, m.score, heading));
            }
        }

        match best {
            Some((idx, score, heading)) if score >= self.heading_cutoff => {
                Ok((SectionRef { heading_index: idx }, heading))
            }
            other => {
                let best = other.map_or(0.0, |(_, score, _)| score);
                log::warn!("No heading matches \"{}\" (best {:.3})", album, best);
                Err(Error::AmbiguousMatch { album: album.to_string(), best })
            }
        }
    }
}

/// Find a review with the default configuration over HTTP.
pub fn search(artist: &str, album: &str) -> Result<Review> {
    Resolver::from_config(&Config::new())?.search(artist, album)
}
