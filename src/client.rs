//! HTTP access to the review site.

use std::time::Duration;

use crate::error::Result;

pub const DEFAULT_USER_AGENT: &str = "pitchfork-rs/0.1 (+https://github.com/michalczaplinski/pitchfork)";

/// Requests are cut off after this long unless configured otherwise.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Something that can GET a URL and return the body as text.
pub trait Transport {
    fn get(&self, url: &str) -> Result<String>;
}

/// Blocking [`Transport`] backed by a `ureq` agent.
pub struct HttpClient {
    agent: ureq::Agent,
    user_agent: String,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Self {
        HttpClient {
            agent: ureq::AgentBuilder::new()
                .timeout(timeout)
                .build(),
            user_agent: user_agent.to_string(),
        }
    }
}

impl Transport for HttpClient {
    fn get(&self, url: &str) -> Result<String> {
        log::debug!("GET {}", url);
        let response = self.agent.get(url)
            .set("User-Agent", &self.user_agent)
            .call()?;
        Ok(response.into_string()?)
    }
}
