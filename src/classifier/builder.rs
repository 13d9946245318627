use std::sync::Arc;

use log::{error, info};
use ndarray::Array4;

use super::classifier::Classifier;
use super::error::ClassifierError;
use super::predictor::{OnnxPredictor, Predictor};
use crate::catalog::Catalog;
use crate::model_manager::ModelManager;
use crate::models::{BuiltinModel, ModelCharacteristics};
use crate::runtime::RuntimeConfig;

/// A builder for constructing a Classifier with a fluent interface.
#[derive(Default)]
pub struct ClassifierBuilder {
    model_path: Option<String>,
    predictor: Option<Arc<dyn Predictor>>,
    catalog: Option<Catalog>,
    characteristics: Option<ModelCharacteristics>,
    runtime_config: RuntimeConfig,
}

impl ClassifierBuilder {
    /// Creates a new empty ClassifierBuilder instance with default configuration
    pub fn new() -> Self {
        Self {
            model_path: None,
            predictor: None,
            catalog: None,
            characteristics: None,
            runtime_config: RuntimeConfig::default(),
        }
    }

    /// Sets the runtime configuration for ONNX model execution
    ///
    /// # Example
    /// ```
    /// use dishscan::{ClassifierBuilder, RuntimeConfig};
    ///
    /// let config = RuntimeConfig::default();
    /// let builder = ClassifierBuilder::new()
    ///     .with_runtime_config(config);
    /// ```
    pub fn with_runtime_config(mut self, config: RuntimeConfig) -> Self {
        self.runtime_config = config;
        self
    }

    /// Sets the model to use for classification using a built-in model type.
    ///
    /// The artifact must already be downloaded (see
    /// [`ModelManager::download_model`]); this method only loads it. The
    /// model's own catalog and input dimensions are applied.
    ///
    /// # Errors
    /// Returns `BuildError` if a model is already set, the artifact is not
    /// downloaded, or the artifact cannot be loaded.
    ///
    /// # Example
    /// ```no_run
    /// use dishscan::{BuiltinModel, ClassifierBuilder};
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .with_model(BuiltinModel::Food101ResNet);
    /// ```
    pub fn with_model(mut self, model: BuiltinModel) -> Result<Self, ClassifierError> {
        if self.predictor.is_some() {
            return Err(ClassifierError::BuildError("Model already set".to_string()));
        }

        let manager = ModelManager::new_default().map_err(|e| {
            ClassifierError::BuildError(format!("Failed to create model manager: {}", e))
        })?;

        let model_info = model.get_model_info();
        if !manager.is_model_downloaded(&model_info) {
            return Err(ClassifierError::BuildError(format!(
                "Model '{:?}' is not downloaded. Please download it first using ModelManager::download_model()",
                model
            )));
        }

        let model_path = manager.get_model_path(&model_info);
        let characteristics = model.characteristics();
        let predictor = OnnxPredictor::load(&model_path, &self.runtime_config, &characteristics)
            .map_err(|e| {
                error!("Failed to load model: {}", e);
                e
            })?;
        info!("Model loaded successfully from {:?}", model_path);

        self.model_path = Some(model_path.to_string_lossy().to_string());
        self.predictor = Some(Arc::new(predictor));
        self.catalog = Some(model.catalog());
        self.characteristics = Some(characteristics);
        Ok(self)
    }

    /// Sets a custom ONNX model for the classifier.
    ///
    /// # Arguments
    /// * `model_path` - Path to the ONNX model file
    /// * `catalog` - Ordered labels matching the model's output vector
    /// * `input_size` - Optional `(width, height)` the model expects.
    ///   Defaults to 224x224.
    ///
    /// # Errors
    /// Returns `BuildError` if the path is empty or missing, a model is
    /// already set, or the file cannot be loaded; `ValidationError` if the
    /// catalog is empty.
    ///
    /// # Example
    /// ```no_run
    /// use dishscan::{Catalog, ClassifierBuilder};
    ///
    /// let builder = ClassifierBuilder::new()
    ///     .with_custom_model(
    ///         "path/to/model.onnx",
    ///         Catalog::new(vec!["cat", "dog"]),
    ///         Some((128, 128)),
    ///     );
    /// ```
    pub fn with_custom_model(
        mut self,
        model_path: &str,
        catalog: Catalog,
        input_size: Option<(u32, u32)>,
    ) -> Result<Self, ClassifierError> {
        if model_path.is_empty() {
            return Err(ClassifierError::BuildError(
                "Model path cannot be empty".to_string(),
            ));
        }
        if self.predictor.is_some() {
            return Err(ClassifierError::BuildError("Model already set".to_string()));
        }
        if catalog.is_empty() {
            return Err(ClassifierError::ValidationError(
                "Catalog must contain at least one label".to_string(),
            ));
        }
        if !std::path::Path::new(model_path).exists() {
            return Err(ClassifierError::BuildError(format!(
                "Model file not found: {}",
                model_path
            )));
        }

        let (input_width, input_height) = input_size.unwrap_or((224, 224));
        let characteristics = ModelCharacteristics {
            input_width,
            input_height,
            num_classes: catalog.len(),
            model_size_mb: 0, // Not critical for functionality
        };

        let predictor = OnnxPredictor::load(model_path, &self.runtime_config, &characteristics)?;
        info!("Custom model loaded successfully from {}", model_path);

        self.model_path = Some(model_path.to_string());
        self.predictor = Some(Arc::new(predictor));
        self.catalog = Some(catalog);
        self.characteristics = Some(characteristics);
        Ok(self)
    }

    /// Uses an already-loaded predictor, e.g. one memoized by
    /// [`crate::ModelProvider`].
    ///
    /// # Errors
    /// Returns `BuildError` if a model is already set, or
    /// `ValidationError` if the catalog is empty.
    pub fn with_predictor(
        mut self,
        predictor: Arc<dyn Predictor>,
        catalog: Catalog,
    ) -> Result<Self, ClassifierError> {
        if self.predictor.is_some() {
            return Err(ClassifierError::BuildError("Model already set".to_string()));
        }
        if catalog.is_empty() {
            return Err(ClassifierError::ValidationError(
                "Catalog must contain at least one label".to_string(),
            ));
        }

        let [_, input_height, input_width, _] = predictor.input_shape();
        let characteristics = ModelCharacteristics {
            input_width: input_width as u32,
            input_height: input_height as u32,
            num_classes: catalog.len(),
            model_size_mb: 0,
        };

        self.model_path = Some("<preloaded>".to_string());
        self.predictor = Some(predictor);
        self.catalog = Some(catalog);
        self.characteristics = Some(characteristics);
        Ok(self)
    }

    /// Builds and returns the final Classifier instance.
    ///
    /// Runs a probe inference on a zero tensor and verifies the model's
    /// output width equals the catalog length, so an index/label mismatch
    /// fails here instead of silently mislabeling every prediction later.
    ///
    /// # Errors
    /// Returns `BuildError` if no model has been set or the probe fails,
    /// and `CatalogMismatch` if the output width differs from the catalog.
    ///
    /// # Example
    /// ```no_run
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// use dishscan::{BuiltinModel, ClassifierBuilder};
    ///
    /// let classifier = ClassifierBuilder::new()
    ///     .with_model(BuiltinModel::Food101ResNet)?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Classifier, ClassifierError> {
        let predictor = self
            .predictor
            .ok_or_else(|| ClassifierError::BuildError("No model loaded".to_string()))?;
        let catalog = self
            .catalog
            .ok_or_else(|| ClassifierError::BuildError("No catalog set".to_string()))?;
        let characteristics = self.characteristics.ok_or_else(|| {
            ClassifierError::BuildError("Model characteristics not set".to_string())
        })?;

        let probe = Array4::<f32>::zeros(predictor.input_shape());
        let output = predictor.infer(&probe.view()).map_err(|e| {
            ClassifierError::BuildError(format!("Model probe inference failed: {}", e))
        })?;
        if output.len() != catalog.len() {
            error!(
                "Model produces {} scores but the catalog has {} labels",
                output.len(),
                catalog.len()
            );
            return Err(ClassifierError::CatalogMismatch {
                catalog_len: catalog.len(),
                output_len: output.len(),
            });
        }
        info!(
            "Classifier ready: {} categories, {}x{} input",
            catalog.len(),
            characteristics.input_width,
            characteristics.input_height
        );

        Ok(Classifier {
            model_path: self.model_path.unwrap_or_else(|| "<unknown>".to_string()),
            predictor,
            catalog: Arc::new(catalog),
            characteristics,
        })
    }
}
