//! Unofficial client for pitchfork.com album reviews.
//!
//! [`search`] finds the review that best matches an (artist, album) pair and
//! returns a [`Review`] exposing its score, label, year, cover and text.

pub mod client;
pub mod config;
pub mod error;
pub mod logger;
pub mod matcher;
pub mod page;
pub mod resolver;
pub mod review;
pub mod search;
pub mod similarity;

#[cfg(test)]
mod fixtures;

pub use client::{HttpClient, Transport};
pub use config::Config;
pub use error::{Error, Result};
pub use page::{Layout, LayoutSelectors, ReviewPage, SectionRef};
pub use resolver::{search, Resolver};
pub use review::{Review, ReviewSummary};
pub use search::{Candidate, Query, SearchBackend, SearchFormat};
