use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use crate::config::WeatherConfig;
use crate::error::Result;
use crate::traits::CredentialProvider;

/// API-key credential source for the Weather adapter.
///
/// The config file is read on first use. A successful load is kept for the life of
/// the process; a failed one is retried on the next call.
pub struct StaticKeyProvider {
    path: PathBuf,
    config: OnceCell<Arc<WeatherConfig>>,
}

impl StaticKeyProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: OnceCell::new(),
        }
    }

    /// Provider with an already-loaded config. Used by tests and embedders.
    pub fn from_config(config: WeatherConfig) -> Self {
        Self {
            path: PathBuf::new(),
            config: OnceCell::new_with(Some(Arc::new(config))),
        }
    }

    pub async fn load_config(&self) -> Result<Arc<WeatherConfig>> {
        self.config
            .get_or_try_init(|| async {
                let config = WeatherConfig::load(&self.path).await?;
                log::debug!("Loaded weather config from {}", self.path.display());
                Ok(Arc::new(config))
            })
            .await
            .cloned()
    }
}

#[async_trait]
impl CredentialProvider for StaticKeyProvider {
    type Credential = Arc<WeatherConfig>;

    async fn ensure_credential(&self) -> Result<Arc<WeatherConfig>> {
        self.load_config().await
    }
}
