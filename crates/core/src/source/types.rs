//! Types for emoticon pack metadata.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::SourceError;

/// Public web store path that identifies a pack.
pub const PACK_PATH_PREFIX: &str = "/t/";

/// Metadata API path that replaces [`PACK_PATH_PREFIX`].
pub const API_PATH_PREFIX: &str = "/api/v1/items/t/";

static PACK_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://e\.kakao\.com/t/([^/?#\s]+)").unwrap());

/// A validated web store pack URL (`https://e.kakao.com/t/<token>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackUrl {
    token: String,
}

impl PackUrl {
    /// Parse a user-supplied argument into a pack URL.
    pub fn parse(input: &str) -> Result<Self, SourceError> {
        let captures = PACK_URL_RE
            .captures(input.trim())
            .ok_or_else(|| SourceError::InvalidUrl(input.to_string()))?;

        Ok(Self {
            token: captures[1].to_string(),
        })
    }

    /// Provider token identifying the pack.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Metadata API URL for this pack under the given store base URL.
    pub fn api_url(&self, base_url: &str) -> String {
        format!(
            "{}{}{}",
            base_url.trim_end_matches('/'),
            API_PATH_PREFIX,
            self.token
        )
    }
}

impl fmt::Display for PackUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "https://e.kakao.com{}{}", PACK_PATH_PREFIX, self.token)
    }
}

/// Title and ordered image links of an emoticon pack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackMetadata {
    pub title: String,
    pub thumbnail_urls: Vec<String>,
}

impl PackMetadata {
    /// Number of stickers the pack will produce.
    pub fn len(&self) -> usize {
        self.thumbnail_urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.thumbnail_urls.is_empty()
    }
}

/// Envelope returned by the metadata API.
#[derive(Debug, Deserialize)]
pub(crate) struct MetadataResponse {
    pub result: PackMetadata,
}
