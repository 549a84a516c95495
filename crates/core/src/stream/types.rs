//! Types for candidate stream descriptors.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::title_helper::{extract_seeders, extract_size};

/// A candidate stream descriptor (immutable as received).
///
/// Field names follow the addon protocol's camelCase JSON. Fields this
/// crate does not interpret are kept in `extra` so a curated record goes
/// back out exactly as it came in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamCandidate {
    /// Short provider/quality label (left column in clients).
    #[serde(default)]
    pub name: String,
    /// Multi-line description: release name first, then seeders/size line.
    #[serde(default)]
    pub title: String,
    /// BitTorrent info hash (hex).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub info_hash: Option<String>,
    /// Direct resource locator (debrid or HTTP streams).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// File index within the torrent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_idx: Option<u32>,
    /// Grouping hints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub behavior_hints: Option<BehaviorHints>,
    /// Any other fields, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Client grouping hints attached to a stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BehaviorHints {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binge_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Best-effort identity of a candidate, used only for deduplication.
///
/// Variants are listed in decreasing order of reliability.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CandidateIdentity {
    /// Content hash, lowercased.
    InfoHash(String),
    /// Resource locator.
    Url(String),
    /// Composite of the binge group and filename hints.
    Group(String),
    /// No usable signal; unique by input position.
    Unique(usize),
}

impl StreamCandidate {
    /// Create a candidate with just a name and title.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    /// Set the info hash.
    pub fn with_info_hash(mut self, info_hash: impl Into<String>) -> Self {
        self.info_hash = Some(info_hash.into());
        self
    }

    /// Set the resource locator.
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Text the classifiers run on: name and title joined by a space.
    pub fn label(&self) -> String {
        format!("{} {}", self.name, self.title)
    }

    /// Seeder count parsed from the title, if present.
    pub fn seeders(&self) -> Option<u32> {
        extract_seeders(&self.title)
    }

    /// Size in bytes parsed from the title, if present.
    pub fn size_bytes(&self) -> Option<u64> {
        extract_size(&self.title)
    }

    /// Compute the identity key.
    ///
    /// `position` is the candidate's index in the input list and only
    /// matters when no hash, locator or grouping hint is available.
    pub fn identity(&self, position: usize) -> CandidateIdentity {
        if let Some(hash) = non_empty(self.info_hash.as_deref()) {
            return CandidateIdentity::InfoHash(hash.to_lowercase());
        }
        if let Some(url) = non_empty(self.url.as_deref()) {
            return CandidateIdentity::Url(url.to_string());
        }
        if let Some(hints) = &self.behavior_hints {
            let group = non_empty(hints.binge_group.as_deref()).unwrap_or_default();
            let file = non_empty(hints.filename.as_deref()).unwrap_or_default();
            if !group.is_empty() || !file.is_empty() {
                return CandidateIdentity::Group(format!("{}/{}", group, file));
            }
        }
        CandidateIdentity::Unique(position)
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
