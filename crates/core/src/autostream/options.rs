//! Selection policy configuration.
//!
//! User options arrive as loosely typed strings. They are turned into a
//! [`SelectionConfig`] once, up front, so the policy itself only ever sees
//! validated values.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::options::UserOptions;

/// Extra factor applied to the ratio threshold when tightening for debrid users.
pub const DEBRID_RATIO_TIGHTENING: f64 = 1.2;

/// How the ratio and delta thresholds combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DowngradeRule {
    /// Both thresholds must be met.
    #[default]
    RatioAndDelta,
    /// Either threshold is enough.
    RatioOrDelta,
}

impl DowngradeRule {
    /// Permissive parse: only the exact `ratio_or_delta` token selects the
    /// looser rule.
    pub fn from_option(value: Option<&str>, default: DowngradeRule) -> DowngradeRule {
        match value.map(|v| v.trim().to_lowercase()) {
            Some(v) if v == "ratio_or_delta" => DowngradeRule::RatioOrDelta,
            Some(v) if v == "ratio_and_delta" => DowngradeRule::RatioAndDelta,
            _ => default,
        }
    }
}

impl fmt::Display for DowngradeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DowngradeRule::RatioAndDelta => f.write_str("ratio_and_delta"),
            DowngradeRule::RatioOrDelta => f.write_str("ratio_or_delta"),
        }
    }
}

/// Service-wide defaults for the selection policy (`[selection]` section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionDefaults {
    #[serde(default = "default_true")]
    pub prefer_lower_if_much_faster: bool,
    #[serde(default = "default_ratio_need")]
    pub ratio_need: f64,
    #[serde(default = "default_delta_need")]
    pub delta_need: f64,
    #[serde(default)]
    pub rule: DowngradeRule,
    #[serde(default = "default_true")]
    pub two_outputs: bool,
}

fn default_true() -> bool {
    true
}

fn default_ratio_need() -> f64 {
    1.35
}

fn default_delta_need() -> f64 {
    200.0
}

impl Default for SelectionDefaults {
    fn default() -> Self {
        Self {
            prefer_lower_if_much_faster: true,
            ratio_need: default_ratio_need(),
            delta_need: default_delta_need(),
            rule: DowngradeRule::default(),
            two_outputs: true,
        }
    }
}

/// Validated, immutable configuration for one selection run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    /// Master switch for downgrade substitution.
    pub prefer_lower_if_much_faster: bool,
    /// Minimum speed-proxy ratio (lower / higher) to count as "much faster".
    pub ratio_need: f64,
    /// Minimum additive speed-proxy advantage to count as "much faster".
    pub delta_need: f64,
    pub rule: DowngradeRule,
    /// Append a 1080p fallback when the primary pick is not 1080p.
    pub two_outputs: bool,
    /// Require the stricter test before a downgrade.
    pub tighten_when_debrid: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self::with_defaults(&SelectionDefaults::default(), true)
    }
}

impl SelectionConfig {
    fn with_defaults(defaults: &SelectionDefaults, tighten_when_debrid: bool) -> Self {
        Self {
            prefer_lower_if_much_faster: defaults.prefer_lower_if_much_faster,
            ratio_need: defaults.ratio_need,
            delta_need: defaults.delta_need,
            rule: defaults.rule,
            two_outputs: defaults.two_outputs,
            tighten_when_debrid,
        }
    }

    /// Build the configuration from per-request user options.
    ///
    /// Recognized keys: `preferlower`, `ratio`, `delta`, `rule`,
    /// `top2`/`two`/`twooutputs` (first present wins) and `tighten`.
    /// Without `tighten`, tightening is on exactly when a debrid provider
    /// is configured. Unparsable values fall back to `defaults`, as do a
    /// `ratio` that is not positive and a negative `delta`.
    pub fn from_options(options: &UserOptions, defaults: &SelectionDefaults) -> Self {
        let tighten_when_debrid = options.flag("tighten", options.has_debrid_configured());
        Self {
            prefer_lower_if_much_faster: options
                .flag("preferlower", defaults.prefer_lower_if_much_faster),
            ratio_need: Some(options.number("ratio", defaults.ratio_need))
                .filter(|r| *r > 0.0)
                .unwrap_or(defaults.ratio_need),
            delta_need: Some(options.number("delta", defaults.delta_need))
                .filter(|d| *d >= 0.0)
                .unwrap_or(defaults.delta_need),
            rule: DowngradeRule::from_option(options.get("rule"), defaults.rule),
            two_outputs: crate::options::parse_flag(
                options.first_of(&["top2", "two", "twooutputs"]),
                defaults.two_outputs,
            ),
            tighten_when_debrid,
        }
    }

    /// The stricter variant used when tightening: ratio threshold scaled by
    /// [`DEBRID_RATIO_TIGHTENING`] and the rule forced to `ratio_and_delta`.
    pub fn tightened(&self) -> Self {
        Self {
            ratio_need: self.ratio_need * DEBRID_RATIO_TIGHTENING,
            rule: DowngradeRule::RatioAndDelta,
            ..*self
        }
    }
}
