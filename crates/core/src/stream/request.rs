//! Parsing of stream request identifiers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from parsing a stream request.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StreamRequestError {
    #[error("Unsupported content type: {0}")]
    UnsupportedType(String),

    #[error("Invalid stream id: {0}")]
    InvalidId(String),
}

/// Content type of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = StreamRequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "movie" => Ok(ContentType::Movie),
            "series" => Ok(ContentType::Series),
            other => Err(StreamRequestError::UnsupportedType(other.to_string())),
        }
    }
}

/// A parsed stream request.
///
/// Ids come in three shapes:
/// - `tt0111161` (movie)
/// - `tt0944947:1:2` (series, season 1 episode 2)
/// - `kitsu:7442:5` (kitsu entry, episode 5)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamRequest {
    pub content_type: ContentType,
    /// Id used for metadata lookups (`tt0944947`, `kitsu:7442`).
    pub base_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<u32>,
}

impl StreamRequest {
    /// Parse a content type and raw id.
    pub fn parse(content_type: &str, id: &str) -> Result<Self, StreamRequestError> {
        let content_type: ContentType = content_type.parse()?;
        let id = id.trim().trim_end_matches(".json");
        if id.is_empty() {
            return Err(StreamRequestError::InvalidId(id.to_string()));
        }

        let parts: Vec<&str> = id.split(':').collect();
        let (base_id, rest) = if parts[0].eq_ignore_ascii_case("kitsu") {
            if parts.len() < 2 || parts[1].is_empty() {
                return Err(StreamRequestError::InvalidId(id.to_string()));
            }
            (format!("kitsu:{}", parts[1]), &parts[2..])
        } else {
            (parts[0].to_string(), &parts[1..])
        };

        let numbers: Vec<u32> = rest
            .iter()
            .map(|p| p.parse::<u32>())
            .collect::<Result<_, _>>()
            .map_err(|_| StreamRequestError::InvalidId(id.to_string()))?;

        let (season, episode) = match numbers.as_slice() {
            [] => (None, None),
            // kitsu ids carry only the episode
            [episode] => (None, Some(*episode)),
            [season, episode] => (Some(*season), Some(*episode)),
            _ => return Err(StreamRequestError::InvalidId(id.to_string())),
        };

        Ok(Self {
            content_type,
            base_id,
            season,
            episode,
        })
    }

    /// Season/episode pair when both are known.
    pub fn season_episode(&self) -> Option<(u32, u32)> {
        match (self.season, self.episode) {
            (Some(s), Some(e)) => Some((s, e)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_movie() {
        let req = StreamRequest::parse("movie", "tt0111161").unwrap();
        assert_eq!(req.content_type, ContentType::Movie);
        assert_eq!(req.base_id, "tt0111161");
        assert_eq!(req.season_episode(), None);
    }

    #[test]
    fn test_parse_series_episode() {
        let req = StreamRequest::parse("series", "tt0944947:1:2").unwrap();
        assert_eq!(req.content_type, ContentType::Series);
        assert_eq!(req.base_id, "tt0944947");
        assert_eq!(req.season_episode(), Some((1, 2)));
    }

    #[test]
    fn test_parse_kitsu_episode() {
        let req = StreamRequest::parse("series", "kitsu:7442:5").unwrap();
        assert_eq!(req.base_id, "kitsu:7442");
        assert_eq!(req.season, None);
        assert_eq!(req.episode, Some(5));
        assert_eq!(req.season_episode(), None);
    }

    #[test]
    fn test_parse_strips_json_suffix() {
        let req = StreamRequest::parse("movie", "tt0111161.json").unwrap();
        assert_eq!(req.base_id, "tt0111161");
    }

    #[test]
    fn test_parse_rejects_unknown_type() {
        assert_eq!(
            StreamRequest::parse("channel", "tt1"),
            Err(StreamRequestError::UnsupportedType("channel".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_bad_ids() {
        assert!(StreamRequest::parse("series", "").is_err());
        assert!(StreamRequest::parse("series", "tt1:x:2").is_err());
        assert!(StreamRequest::parse("series", "tt1:1:2:3").is_err());
        assert!(StreamRequest::parse("series", "kitsu:").is_err());
    }
}
