pub mod autostream;
pub mod config;
pub mod curator;
pub mod external_catalog;
pub mod metrics;
pub mod options;
pub mod sort;
pub mod stream;
pub mod testing;

pub use autostream::{
    apply_autostream, curate, deduplicate, is_much_faster, score_candidates, select,
    speed_proxy, DowngradeDecision, DowngradeRule, QualityTier, ScoredCandidate, Selection,
    SelectionConfig, SelectionDefaults,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, SanitizedConfig,
    ServerConfig,
};
pub use curator::NameCurator;
pub use external_catalog::{CinemetaClient, CinemetaConfig, TitleLookupError, TitleResolver};
pub use options::{DebridProvider, UserOptions};
pub use sort::{sort_streams, SortMode};
pub use stream::{
    extract_seeders, extract_size, BehaviorHints, ContentType, StreamCandidate, StreamRequest,
    StreamRequestError,
};
