//! Configuration model loaded from external sources.

use std::time::Duration;

use serde::Deserialize;

use crate::editor::DurationPolicy;
use crate::editor::store::{DEFAULT_DRAFT_TTL, DEFAULT_MAX_DRAFTS};

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_draft_ttl_secs() -> u64 {
    DEFAULT_DRAFT_TTL.as_secs()
}

fn default_max_drafts() -> usize {
    DEFAULT_MAX_DRAFTS
}

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    /// Cookie session signing key, at least 64 bytes.
    pub secret: String,
    /// Base URL of the remote tour API.
    pub api_url: String,
    pub api_version: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// How existing itinerary days react to a duration change.
    #[serde(default)]
    pub duration_policy: DurationPolicy,
    /// Seconds an untouched draft is kept before it is dropped.
    #[serde(default = "default_draft_ttl_secs")]
    pub draft_ttl_secs: u64,
    #[serde(default = "default_max_drafts")]
    pub max_drafts: usize,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn draft_ttl(&self) -> Duration {
        Duration::from_secs(self.draft_ttl_secs)
    }
}
