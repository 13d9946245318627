use std::io;
use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::classifier::OnnxPredictor;
use crate::model_manager::{ModelError, ModelManager};
use crate::models::{BuiltinModel, ModelCharacteristics, ModelInfo};
use crate::runtime::RuntimeConfig;

/// Resolves a named model artifact to a loaded predictor, exactly once per
/// process.
///
/// The first successful [`get`](Self::get) downloads the artifact if
/// needed, loads it, and memoizes the predictor for the provider's
/// lifetime; later calls return the cached instance without touching disk
/// or network. Concurrent first accesses are coalesced into a single load,
/// and a failed load caches nothing, so the next call retries.
pub struct ModelProvider {
    info: ModelInfo,
    characteristics: ModelCharacteristics,
    manager: ModelManager,
    config: RuntimeConfig,
    predictor: OnceCell<Arc<OnnxPredictor>>,
}

impl ModelProvider {
    /// Creates a provider for a built-in model using the default cache
    /// directory.
    pub fn new(model: BuiltinModel) -> io::Result<Self> {
        Ok(Self::with_manager(
            model.get_model_info(),
            model.characteristics(),
            ModelManager::new_default()?,
            RuntimeConfig::default(),
        ))
    }

    /// Creates a provider with explicit artifact info, cache manager, and
    /// runtime configuration.
    pub fn with_manager(
        info: ModelInfo,
        characteristics: ModelCharacteristics,
        manager: ModelManager,
        config: RuntimeConfig,
    ) -> Self {
        Self {
            info,
            characteristics,
            manager,
            config,
            predictor: OnceCell::new(),
        }
    }

    pub fn info(&self) -> &ModelInfo {
        &self.info
    }

    /// Whether the predictor has already been loaded.
    pub fn is_loaded(&self) -> bool {
        self.predictor.initialized()
    }

    /// Returns the memoized predictor, downloading and loading the model
    /// on first use.
    ///
    /// # Errors
    /// - `ModelError::Unavailable` if the artifact cannot be retrieved
    /// - `ModelError::Corrupt` if the artifact cannot be loaded as a model
    pub async fn get(&self) -> Result<Arc<OnnxPredictor>, ModelError> {
        self.predictor
            .get_or_try_init(|| async {
                self.manager.ensure_model_downloaded(&self.info).await?;
                let model_path = self.manager.get_model_path(&self.info);
                log::info!("Loading predictor from {:?}", model_path);
                let predictor =
                    OnnxPredictor::load(&model_path, &self.config, &self.characteristics)
                        .map_err(|e| ModelError::Corrupt(e.to_string()))?;
                Ok(Arc::new(predictor))
            })
            .await
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offline_provider(cache_dir: &str) -> ModelProvider {
        let mut info = BuiltinModel::Food101ResNet.get_model_info();
        // Port 9 (discard) refuses connections, simulating an unreachable hub.
        info.endpoint = Some("http://127.0.0.1:9".to_string());
        ModelProvider::with_manager(
            info,
            BuiltinModel::Food101ResNet.characteristics(),
            ModelManager::new(cache_dir).unwrap(),
            RuntimeConfig::default(),
        )
    }

    #[tokio::test]
    async fn retrieval_failure_surfaces_unavailable_and_caches_nothing() {
        let provider = offline_provider("/tmp/dishscan-test/provider-offline");
        let err = provider.get().await.unwrap_err();
        assert!(matches!(err, ModelError::Unavailable(_)));
        assert!(!provider.is_loaded());

        // The failure must not be memoized; a second call retries.
        let err = provider.get().await.unwrap_err();
        assert!(matches!(err, ModelError::Unavailable(_)));
        assert!(!provider.is_loaded());
    }

    #[tokio::test]
    async fn concurrent_first_access_with_failing_load_errors_both_callers() {
        let provider = offline_provider("/tmp/dishscan-test/provider-concurrent");
        let (a, b) = tokio::join!(provider.get(), provider.get());
        assert!(a.is_err());
        assert!(b.is_err());
        assert!(!provider.is_loaded());
    }

    #[tokio::test]
    #[ignore = "downloads the model from the hub"]
    async fn concurrent_first_access_shares_one_predictor() {
        let provider = ModelProvider::new(BuiltinModel::Food101ResNet).unwrap();
        let (a, b) = tokio::join!(provider.get(), provider.get());
        let (a, b) = (a.unwrap(), b.unwrap());
        assert!(Arc::ptr_eq(&a, &b));
        assert!(provider.is_loaded());
    }
}
