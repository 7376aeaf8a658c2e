//! Candidate scoring and winner selection.
//!
//! Search results are noisy: collaborations list several artists in one
//! field and reissue reviews bundle several album titles.  Each field is split
//! on its delimiter, every fragment is compared with the searched value, and
//! the best fragment's ratio becomes the field score.  A candidate's combined
//! score is `artist_score * album_score`.

use serde::{Deserialize, Serialize};

use crate::search::{Candidate, Query};
use crate::similarity;

/// Separators used for multi-artist and multi-album display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delimiters {
    pub artist: String,
    pub album: String,
}

impl Default for Delimiters {
    fn default() -> Self {
        Delimiters {
            artist: " / ".to_string(),
            album: " / ".to_string(),
        }
    }
}

/// Best fragment of a (possibly compound) field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMatch {
    pub score: f64,
    pub fragment: String,
}

/// A candidate with its similarity scores.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub candidate: Candidate,
    pub artist: FieldMatch,
    pub album: FieldMatch,
    pub combined: f64,
}

/// Score `field` against `searched`.
///
/// When the field contains `delimiter`, every non-empty trimmed fragment is
/// scored and the best one wins (first one on ties).  Otherwise the whole
/// field is scored.
pub fn best_fragment(field: &str, searched: &str, delimiter: &str) -> FieldMatch {
    if delimiter.is_empty() || !field.contains(delimiter) {
        return FieldMatch {
            score: similarity::ratio(field, searched),
            fragment: field.to_string(),
        };
    }

    let mut best: Option<FieldMatch> = None;
    for fragment in field.split(delimiter).map(str::trim).filter(|f| !f.is_empty()) {
        let score = similarity::ratio(fragment, searched);
        if best.as_ref().map_or(true, |b| score > b.score) {
            best = Some(FieldMatch { score, fragment: fragment.to_string() });
        }
    }

    best.unwrap_or_else(|| FieldMatch {
        score: similarity::ratio(field, searched),
        fragment: field.to_string(),
    })
}

/// Score every candidate, keeping input order.
pub fn score_candidates(candidates: &[Candidate], query: &Query, delimiters: &Delimiters) -> Vec<ScoredCandidate> {
    candidates.iter()
        .map(|c| {
            let artist = best_fragment(&c.artist, &query.artist, &delimiters.artist);
            let album = best_fragment(&c.title, &query.album, &delimiters.album);
            let combined = artist.score * album.score;
            log::debug!(
                "  {:.3} = {:.3} ({}) x {:.3} ({})  {}",
                combined, artist.score, artist.fragment, album.score, album.fragment, c.url
            );
            ScoredCandidate { candidate: c.clone(), artist, album, combined }
        })
        .collect()
}

/// Index of the highest combined score; the earliest candidate wins ties.
pub fn best_index(scored: &[ScoredCandidate]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, s) in scored.iter().enumerate() {
        if best.map_or(true, |(_, score)| s.combined > score) {
            best = Some((idx, s.combined));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Score all candidates and return the winner, or `None` when there are none.
pub fn select(candidates: &[Candidate], query: &Query, delimiters: &Delimiters) -> Option<ScoredCandidate> {
    let mut scored = score_candidates(candidates, query, delimiters);
    let idx = best_index(&scored)?;
    Some(scored.swap_remove(idx))
}
