//! Display-name rewriting for curated streams.
//!
//! The first line of each candidate's `title` becomes
//! `"<canonical title> — [SxxEyy - ]<quality>"`; any further lines (seeders,
//! size, source) are kept as they were. When the canonical title cannot be
//! resolved in time, the candidate's own release line stands in for it.

use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::autostream::{resolution_token, QualityTier};
use crate::external_catalog::TitleResolver;
use crate::metrics;
use crate::stream::{StreamCandidate, StreamRequest};

/// Separator between the title and the quality/episode segment.
pub const TITLE_SEPARATOR: &str = " — ";

/// Rewrites candidate display names using a canonical title.
pub struct NameCurator {
    resolver: Arc<dyn TitleResolver>,
    timeout: Duration,
}

impl NameCurator {
    pub fn new(resolver: Arc<dyn TitleResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Resolve the canonical title, bounded by the configured timeout.
    ///
    /// Single attempt; any failure yields `None`.
    pub async fn lookup_title(&self, request: &StreamRequest) -> Option<String> {
        let resolver = self.resolver.name().to_string();
        let start = Instant::now();
        let outcome = tokio::time::timeout(
            self.timeout,
            self.resolver
                .resolve_title(request.content_type, &request.base_id),
        )
        .await;
        metrics::TITLE_LOOKUP_DURATION
            .with_label_values(&[resolver.as_str()])
            .observe(start.elapsed().as_secs_f64());

        let (result, title) = match outcome {
            Ok(Ok(title)) if !title.trim().is_empty() => ("success", Some(title.trim().to_string())),
            Ok(Ok(_)) => {
                warn!(id = %request.base_id, "Title lookup returned an empty title, using fallback");
                ("error", None)
            }
            Ok(Err(e)) => {
                warn!(id = %request.base_id, error = %e, "Title lookup failed, using fallback");
                ("error", None)
            }
            Err(_) => {
                warn!(
                    id = %request.base_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Title lookup timed out, using fallback"
                );
                ("timeout", None)
            }
        };
        metrics::TITLE_LOOKUPS
            .with_label_values(&[resolver.as_str(), result])
            .inc();

        title
    }

    /// Rewrite the display names of `streams`.
    ///
    /// Never fails; an empty list skips the lookup entirely.
    pub async fn curate(
        &self,
        streams: Vec<StreamCandidate>,
        request: &StreamRequest,
    ) -> Vec<StreamCandidate> {
        if streams.is_empty() {
            return streams;
        }

        let canonical = self.lookup_title(request).await;
        debug!(
            id = %request.base_id,
            resolved = canonical.is_some(),
            count = streams.len(),
            "Rewriting display names"
        );

        streams
            .iter()
            .map(|s| rename(s, canonical.as_deref(), request))
            .collect()
    }
}

/// Produce a copy of `candidate` with its first title line rewritten.
///
/// `canonical` of `None` uses [`fallback_label`].
pub fn rename(
    candidate: &StreamCandidate,
    canonical: Option<&str>,
    request: &StreamRequest,
) -> StreamCandidate {
    let title = match canonical {
        Some(title) => title.to_string(),
        None => fallback_label(candidate),
    };
    let headline = display_name(
        &title,
        episode_tag(request.season, request.episode).as_deref(),
        quality_label(candidate).as_deref(),
    );

    let rest: Vec<&str> = candidate.title.lines().skip(1).collect();
    let mut renamed = candidate.clone();
    renamed.title = if rest.is_empty() {
        headline
    } else {
        format!("{}\n{}", headline, rest.join("\n"))
    };
    renamed
}

/// Join title, episode and quality into one line.
///
/// Segments that are absent are left out along with their separators.
pub fn display_name(title: &str, episode: Option<&str>, quality: Option<&str>) -> String {
    let suffix = match (episode, quality) {
        (Some(ep), Some(q)) => format!("{} - {}", ep, q),
        (Some(ep), None) => ep.to_string(),
        (None, Some(q)) => q.to_string(),
        (None, None) => return title.to_string(),
    };
    format!("{}{}{}", title, TITLE_SEPARATOR, suffix)
}

/// `S01E02` for series, `E05` when only the episode is known.
pub fn episode_tag(season: Option<u32>, episode: Option<u32>) -> Option<String> {
    match (season, episode) {
        (Some(s), Some(e)) => Some(format!("S{:02}E{:02}", s, e)),
        (None, Some(e)) => Some(format!("E{:02}", e)),
        _ => None,
    }
}

/// Friendly quality for a candidate, or the raw `NNNp` token for tiers
/// without one.
pub fn quality_label(candidate: &StreamCandidate) -> Option<String> {
    let label = candidate.label();
    let tier = QualityTier::classify(&label);
    tier.friendly_label()
        .map(str::to_string)
        .or_else(|| resolution_token(&label))
}

/// The candidate's own first title line, trimmed, else its name's.
pub fn fallback_label(candidate: &StreamCandidate) -> String {
    [candidate.title.as_str(), candidate.name.as_str()]
        .into_iter()
        .filter_map(|text| text.lines().map(str::trim).find(|l| !l.is_empty()))
        .next()
        .unwrap_or_default()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external_catalog::TitleLookupError;
    use crate::testing::MockTitleResolver;

    fn movie() -> StreamRequest {
        StreamRequest::parse("movie", "tt0111161").unwrap()
    }

    fn episode() -> StreamRequest {
        StreamRequest::parse("series", "tt0944947:1:2").unwrap()
    }

    fn stream(title: &str) -> StreamCandidate {
        StreamCandidate::new("Torrentio", title).with_info_hash("abc")
    }

    #[test]
    fn test_display_name_segments() {
        assert_eq!(display_name("Dune", None, Some("4K")), "Dune — 4K");
        assert_eq!(
            display_name("Show", Some("S01E02"), Some("1080p")),
            "Show — S01E02 - 1080p"
        );
        assert_eq!(display_name("Show", Some("S01E02"), None), "Show — S01E02");
        assert_eq!(display_name("Dune", None, None), "Dune");
    }

    #[test]
    fn test_episode_tag() {
        assert_eq!(episode_tag(Some(1), Some(2)).as_deref(), Some("S01E02"));
        assert_eq!(episode_tag(Some(12), Some(105)).as_deref(), Some("S12E105"));
        assert_eq!(episode_tag(None, Some(5)).as_deref(), Some("E05"));
        assert_eq!(episode_tag(None, None), None);
    }

    #[test]
    fn test_quality_label() {
        assert_eq!(quality_label(&stream("Movie.2160p")).as_deref(), Some("4K"));
        assert_eq!(quality_label(&stream("Movie.1440p")).as_deref(), Some("2K"));
        assert_eq!(quality_label(&stream("Movie.4320p")).as_deref(), Some("8K"));
        assert_eq!(quality_label(&stream("Movie.720p")).as_deref(), Some("720p"));
        // No friendly label, raw token passes through
        assert_eq!(quality_label(&stream("Movie.576p.DVD")).as_deref(), Some("576p"));
        assert_eq!(quality_label(&stream("Movie.HDCAM")), None);
    }

    #[test]
    fn test_fallback_label() {
        assert_eq!(fallback_label(&stream("  Movie.2160p  \n👤 5")), "Movie.2160p");
        let untitled = StreamCandidate::new("Torrentio\n4k", "");
        assert_eq!(fallback_label(&untitled), "Torrentio");
        assert_eq!(fallback_label(&StreamCandidate::new("", "")), "");
    }

    #[test]
    fn test_rename_keeps_detail_lines() {
        let original = stream("Movie.2160p.WEB-DL\n👤 120 💾 20 GB\n⚙️ RARBG");
        let renamed = rename(&original, Some("Dune"), &movie());
        assert_eq!(renamed.title, "Dune — 4K\n👤 120 💾 20 GB\n⚙️ RARBG");
        // Everything else is untouched
        assert_eq!(renamed.name, original.name);
        assert_eq!(renamed.info_hash, original.info_hash);
        assert_eq!(original.title, "Movie.2160p.WEB-DL\n👤 120 💾 20 GB\n⚙️ RARBG");
    }

    #[tokio::test]
    async fn test_curate_with_resolved_title() {
        let resolver = Arc::new(MockTitleResolver::with_title("tt0944947", "Game of Thrones").await);
        let curator = NameCurator::new(resolver.clone(), Duration::from_secs(1));

        let out = curator
            .curate(vec![stream("GoT.S01E02.1080p\n👤 40")], &episode())
            .await;
        assert_eq!(out[0].title, "Game of Thrones — S01E02 - 1080p\n👤 40");

        let lookups = resolver.recorded_lookups().await;
        assert_eq!(lookups.len(), 1);
        assert_eq!(lookups[0].id, "tt0944947");
    }

    #[tokio::test]
    async fn test_curate_falls_back_on_error() {
        let resolver = Arc::new(MockTitleResolver::new());
        resolver
            .set_next_error(TitleLookupError::ApiError {
                status: 500,
                message: "boom".to_string(),
            })
            .await;
        let curator = NameCurator::new(resolver, Duration::from_secs(1));

        let out = curator
            .curate(vec![stream("Movie.2160p.WEB-DL\n👤 5")], &movie())
            .await;
        assert_eq!(out[0].title, "Movie.2160p.WEB-DL — 4K\n👤 5");
    }

    #[tokio::test]
    async fn test_curate_falls_back_on_timeout() {
        let resolver = Arc::new(MockTitleResolver::with_title("tt0111161", "Too Late").await);
        resolver.set_delay(Duration::from_secs(5)).await;
        let curator = NameCurator::new(resolver, Duration::from_millis(20));

        let out = curator.curate(vec![stream("Movie.720p")], &movie()).await;
        assert_eq!(out[0].title, "Movie.720p — 720p");
    }

    #[tokio::test]
    async fn test_curate_empty_skips_lookup() {
        let resolver = Arc::new(MockTitleResolver::new());
        let curator = NameCurator::new(resolver.clone(), Duration::from_secs(1));

        assert!(curator.curate(Vec::new(), &movie()).await.is_empty());
        assert_eq!(resolver.lookup_count().await, 0);
    }
}
