use std::sync::Arc;

use autostream_core::{Config, NameCurator, SanitizedConfig, TitleResolver};

/// Shared application state
pub struct AppState {
    config: Config,
    curator: NameCurator,
}

impl AppState {
    pub fn new(config: Config, resolver: Arc<dyn TitleResolver>) -> Self {
        let curator = NameCurator::new(resolver, config.cinemeta.timeout());
        Self { config, curator }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn sanitized_config(&self) -> SanitizedConfig {
        SanitizedConfig::from(&self.config)
    }

    pub fn curator(&self) -> &NameCurator {
        &self.curator
    }
}
