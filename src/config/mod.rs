use crate::error::{FeedError, Result};

pub const REGION_ENV: &str = "SEARCH_REGION";
pub const ENDPOINT_ENV: &str = "SEARCH_ENDPOINT";

/// Connection settings for the search domain, read once per invocation
/// and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub region: String,
    pub endpoint: String,
}

impl SearchConfig {
    pub fn new(region: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Self {
            region: require(REGION_ENV)?,
            endpoint: require(ENDPOINT_ENV)?,
        })
    }
}

fn require(name: &'static str) -> Result<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .ok_or(FeedError::Config(name))
}
