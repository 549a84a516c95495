//! Loosely typed per-request user options.
//!
//! Addon clients send their configuration as a path segment such as
//! `sort=autostream|ratio=1.5|realdebrid=KEY`. Everything here is
//! permissive: unknown keys are kept, malformed pairs are skipped, and
//! typed accessors fall back to the caller's default instead of failing.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Tokens recognized as "on".
const TRUTHY: &[&str] = &["1", "true", "yes", "on"];
/// Tokens recognized as "off".
const FALSY: &[&str] = &["0", "false", "no", "off"];

/// Debrid providers whose presence in the options counts as "debrid configured".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebridProvider {
    RealDebrid,
    Premiumize,
    AllDebrid,
    DebridLink,
    EasyDebrid,
    Offcloud,
    TorBox,
    Putio,
}

impl DebridProvider {
    pub const ALL: [DebridProvider; 8] = [
        DebridProvider::RealDebrid,
        DebridProvider::Premiumize,
        DebridProvider::AllDebrid,
        DebridProvider::DebridLink,
        DebridProvider::EasyDebrid,
        DebridProvider::Offcloud,
        DebridProvider::TorBox,
        DebridProvider::Putio,
    ];

    /// Option key carrying this provider's API key.
    pub fn key(&self) -> &'static str {
        match self {
            DebridProvider::RealDebrid => "realdebrid",
            DebridProvider::Premiumize => "premiumize",
            DebridProvider::AllDebrid => "alldebrid",
            DebridProvider::DebridLink => "debridlink",
            DebridProvider::EasyDebrid => "easydebrid",
            DebridProvider::Offcloud => "offcloud",
            DebridProvider::TorBox => "torbox",
            DebridProvider::Putio => "putio",
        }
    }
}

/// Per-request options as a case-insensitive string map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct UserOptions {
    values: BTreeMap<String, String>,
}

impl From<BTreeMap<String, String>> for UserOptions {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::from_pairs(map)
    }
}

impl From<UserOptions> for BTreeMap<String, String> {
    fn from(options: UserOptions) -> Self {
        options.values
    }
}

impl UserOptions {
    /// Build from key/value pairs; keys are lowercased and trimmed.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.as_ref().trim().to_lowercase(), v.into()))
            .filter(|(k, _)| !k.is_empty())
            .collect();
        Self { values }
    }

    /// Parse the `key=value|key=value` configuration string.
    ///
    /// Values are URL-decoded; pairs without `=` or with an empty key are
    /// skipped. Later duplicates win.
    pub fn parse(config: &str) -> Self {
        let pairs = config.split('|').filter_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            let value = urlencoding::decode(value)
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.to_string());
            Some((key.to_string(), value))
        });
        Self::from_pairs(pairs)
    }

    /// Merge `other` on top of these options.
    pub fn merged_with(mut self, other: &UserOptions) -> Self {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First of `keys` that is present.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.get(k))
    }

    /// Permissive boolean for `key`, `default` when absent or unrecognized.
    pub fn flag(&self, key: &str, default: bool) -> bool {
        parse_flag(self.get(key), default)
    }

    /// Finite number for `key`, `default` when absent or unparsable.
    pub fn number(&self, key: &str, default: f64) -> f64 {
        parse_number(self.get(key), default)
    }

    /// Positive integer for `key`.
    pub fn positive_int(&self, key: &str) -> Option<usize> {
        self.get(key)
            .and_then(|v| v.trim().parse::<usize>().ok())
            .filter(|n| *n > 0)
    }

    /// Debrid providers configured with a non-empty value.
    pub fn debrid_providers(&self) -> Vec<DebridProvider> {
        DebridProvider::ALL
            .into_iter()
            .filter(|p| self.get(p.key()).is_some_and(|v| !v.trim().is_empty()))
            .collect()
    }

    /// Whether at least one debrid provider is configured.
    pub fn has_debrid_configured(&self) -> bool {
        !self.debrid_providers().is_empty()
    }
}

/// Permissive boolean parsing.
pub fn parse_flag(value: Option<&str>, default: bool) -> bool {
    let Some(value) = value else {
        return default;
    };
    let value = value.trim().to_lowercase();
    if TRUTHY.contains(&value.as_str()) {
        true
    } else if FALSY.contains(&value.as_str()) {
        false
    } else {
        default
    }
}

/// Parse a finite float, falling back to `default`.
pub fn parse_number(value: Option<&str>, default: f64) -> f64 {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config_string() {
        let opts = UserOptions::parse("sort=autostream|Ratio=1.5|realdebrid=abc%7C123|broken|=x");
        assert_eq!(opts.get("sort"), Some("autostream"));
        assert_eq!(opts.get("ratio"), Some("1.5"));
        assert_eq!(opts.get("realdebrid"), Some("abc|123"));
        assert_eq!(opts.get("broken"), None);
        assert_eq!(opts.get(""), None);
    }

    #[test]
    fn test_parse_empty_string() {
        assert!(UserOptions::parse("").is_empty());
    }

    #[test]
    fn test_flag_tokens() {
        for token in ["1", "true", "YES", " on "] {
            assert!(parse_flag(Some(token), false), "{token} should be truthy");
        }
        for token in ["0", "false", "No", "off"] {
            assert!(!parse_flag(Some(token), true), "{token} should be falsy");
        }
    }

    #[test]
    fn test_flag_falls_back_to_default() {
        assert!(parse_flag(None, true));
        assert!(!parse_flag(None, false));
        assert!(parse_flag(Some("maybe"), true));
        assert!(!parse_flag(Some(""), false));
    }

    #[test]
    fn test_number_parsing() {
        assert_eq!(parse_number(Some("1.5"), 1.35), 1.5);
        assert_eq!(parse_number(Some(" 250 "), 200.0), 250.0);
        assert_eq!(parse_number(Some("fast"), 1.35), 1.35);
        assert_eq!(parse_number(Some("NaN"), 1.35), 1.35);
        assert_eq!(parse_number(Some("inf"), 200.0), 200.0);
        assert_eq!(parse_number(None, 200.0), 200.0);
    }

    #[test]
    fn test_positive_int() {
        let opts = UserOptions::parse("limit=3|zero=0|neg=-1|junk=abc");
        assert_eq!(opts.positive_int("limit"), Some(3));
        assert_eq!(opts.positive_int("zero"), None);
        assert_eq!(opts.positive_int("neg"), None);
        assert_eq!(opts.positive_int("junk"), None);
    }

    #[test]
    fn test_debrid_detection() {
        assert!(!UserOptions::parse("sort=autostream").has_debrid_configured());
        assert!(!UserOptions::parse("realdebrid=").has_debrid_configured());

        let opts = UserOptions::parse("premiumize=key|torbox=other");
        assert!(opts.has_debrid_configured());
        assert_eq!(
            opts.debrid_providers(),
            vec![DebridProvider::Premiumize, DebridProvider::TorBox]
        );
    }

    #[test]
    fn test_first_of_respects_order() {
        let opts = UserOptions::parse("two=0|twooutputs=1");
        assert_eq!(opts.first_of(&["top2", "two", "twooutputs"]), Some("0"));
    }

    #[test]
    fn test_merge_overrides() {
        let base = UserOptions::parse("ratio=1.5|rule=ratio_or_delta");
        let merged = base.merged_with(&UserOptions::parse("ratio=2"));
        assert_eq!(merged.get("ratio"), Some("2"));
        assert_eq!(merged.get("rule"), Some("ratio_or_delta"));
    }

    #[test]
    fn test_deserialize_from_json_map() {
        let opts: UserOptions = serde_json::from_str(r#"{"Sort": "autostream"}"#).unwrap();
        assert_eq!(opts.get("sort"), Some("autostream"));
    }
}
