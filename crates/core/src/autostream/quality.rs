//! Quality tier classification from free-text labels.

use std::fmt;

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};

/// Ordered quality tiers, lowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QualityTier {
    #[serde(rename = "other")]
    Other,
    #[serde(rename = "CAM")]
    Cam,
    #[serde(rename = "480p")]
    Sd480,
    #[serde(rename = "720p")]
    Hd720,
    #[serde(rename = "1080p")]
    Fhd1080,
    #[serde(rename = "1440p")]
    Qhd1440,
    #[serde(rename = "2160p")]
    Uhd2160,
    #[serde(rename = "4320p")]
    Uhd4320,
}

/// Tier patterns, highest tier first. The first match wins, so an explicit
/// resolution always beats a release-type marker in the same label.
static TIER_PATTERNS: Lazy<Vec<(QualityTier, Regex)>> = Lazy::new(|| {
    [
        (QualityTier::Uhd4320, r"(?i)\b(4320p|8k)\b"),
        (QualityTier::Uhd2160, r"(?i)\b(2160p|4k|uhd)\b"),
        (QualityTier::Qhd1440, r"(?i)\b(1440p|2k)\b"),
        (QualityTier::Fhd1080, r"(?i)\b1080p\b"),
        (QualityTier::Hd720, r"(?i)\b720p\b"),
        (QualityTier::Sd480, r"(?i)\b480p\b"),
        (
            QualityTier::Cam,
            r"(?i)\b(cam|hdcam|camrip|telesync|telecine|scr|screener)\b",
        ),
    ]
    .into_iter()
    .map(|(tier, pattern)| (tier, Regex::new(pattern).unwrap()))
    .collect()
});

static RESOLUTION_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\b(\d{3,4})p\b").unwrap());

impl QualityTier {
    /// All tiers, lowest first.
    pub const ALL: [QualityTier; 8] = [
        QualityTier::Other,
        QualityTier::Cam,
        QualityTier::Sd480,
        QualityTier::Hd720,
        QualityTier::Fhd1080,
        QualityTier::Qhd1440,
        QualityTier::Uhd2160,
        QualityTier::Uhd4320,
    ];

    /// Classify a label. Total: anything unrecognized is `Other`.
    pub fn classify(label: &str) -> QualityTier {
        TIER_PATTERNS
            .iter()
            .find(|(_, re)| re.is_match(label))
            .map(|(tier, _)| *tier)
            .unwrap_or(QualityTier::Other)
    }

    /// Position in the tier order (`Other` is 0).
    pub fn order(&self) -> u8 {
        *self as u8
    }

    /// Base score step for this tier.
    pub fn base_score(&self) -> f64 {
        match self {
            QualityTier::Uhd4320 => 1200.0,
            QualityTier::Uhd2160 => 1000.0,
            QualityTier::Qhd1440 => 800.0,
            QualityTier::Fhd1080 => 600.0,
            QualityTier::Hd720 => 400.0,
            QualityTier::Sd480 => 200.0,
            QualityTier::Cam | QualityTier::Other => 100.0,
        }
    }

    /// Human-friendly label, `None` for `Other` and `Cam`.
    pub fn friendly_label(&self) -> Option<&'static str> {
        match self {
            QualityTier::Uhd4320 => Some("8K"),
            QualityTier::Uhd2160 => Some("4K"),
            QualityTier::Qhd1440 => Some("2K"),
            QualityTier::Fhd1080 => Some("1080p"),
            QualityTier::Hd720 => Some("720p"),
            QualityTier::Sd480 => Some("480p"),
            QualityTier::Cam | QualityTier::Other => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Other => "other",
            QualityTier::Cam => "CAM",
            QualityTier::Sd480 => "480p",
            QualityTier::Hd720 => "720p",
            QualityTier::Fhd1080 => "1080p",
            QualityTier::Qhd1440 => "1440p",
            QualityTier::Uhd2160 => "2160p",
            QualityTier::Uhd4320 => "4320p",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// First raw `NNNp` resolution token in a label (e.g. `576p`), lowercased.
pub fn resolution_token(label: &str) -> Option<String> {
    RESOLUTION_TOKEN
        .captures(label)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{}p", m.as_str()))
}
