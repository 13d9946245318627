use std::sync::Arc;

use image::DynamicImage;
use ndarray::Array4;
use serde::{Deserialize, Serialize};

use super::error::ClassifierError;
use super::predictor::Predictor;
use super::preprocess;
use super::utils::ensure_distribution;
use crate::catalog::Catalog;
use crate::models::ModelCharacteristics;

/// A single ranked result: a catalog entry paired with its confidence.
///
/// Labels are raw catalog labels (`"fried_rice"`); display formatting is
/// the presentation layer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Index into the catalog
    pub index: usize,
    /// Raw catalog label
    pub label: String,
    /// Confidence in `[0, 1]`
    pub score: f32,
}

/// A thread-safe image classifier producing ranked dish predictions.
///
/// # Thread Safety
///
/// This type is automatically `Send + Sync` because all of its fields are
/// thread-safe: the predictor and catalog are shared behind `Arc`, and
/// `ModelCharacteristics` is plain data.
///
/// ```no_run
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use dishscan::{BuiltinModel, Classifier};
///
/// let classifier = Classifier::builder()
///     .with_model(BuiltinModel::Food101ResNet)?
///     .build()?;
///
/// let image = image::open("lunch.jpg")?;
/// for prediction in classifier.predict(&image, 3)? {
///     println!("{}: {:.1}%", prediction.label, prediction.score * 100.0);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Classifier {
    pub model_path: String,
    pub predictor: Arc<dyn Predictor>,
    pub catalog: Arc<Catalog>,
    pub characteristics: ModelCharacteristics,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<Classifier>();
    }
};

impl Classifier {
    /// Creates a new ClassifierBuilder for fluent construction
    pub fn builder() -> super::builder::ClassifierBuilder {
        super::builder::ClassifierBuilder::new()
    }

    /// Returns information about the classifier's current state
    pub fn info(&self) -> super::ClassifierInfo {
        super::ClassifierInfo {
            model_path: self.model_path.clone(),
            num_classes: self.catalog.len(),
            input_width: self.characteristics.input_width,
            input_height: self.characteristics.input_height,
        }
    }

    /// Converts a decoded image into the tensor this classifier's
    /// predictor expects: shape `(1, H, W, 3)`, values in `[0, 1]`.
    pub fn preprocess(&self, image: &DynamicImage) -> Array4<f32> {
        preprocess::image_to_tensor(
            image,
            self.characteristics.input_width,
            self.characteristics.input_height,
        )
    }

    /// Runs inference on a preprocessed tensor and returns the top `k`
    /// predictions, ranked by confidence descending.
    ///
    /// Raw model output that is not already a probability distribution is
    /// softmax-normalized, so scores are always comparable confidences.
    /// Ties rank the lower catalog index first, making the output fully
    /// deterministic for a deterministic predictor.
    ///
    /// # Errors
    /// - `InvalidTopK` unless `1 <= k <= catalog length`
    /// - `ShapeMismatch` if the tensor does not match the predictor's input shape
    /// - `InferenceFailed` if the predictor fails
    /// - `CatalogMismatch` if the model's output width differs from the catalog
    pub fn classify(
        &self,
        tensor: &Array4<f32>,
        k: usize,
    ) -> Result<Vec<Prediction>, ClassifierError> {
        let catalog_len = self.catalog.len();
        if k == 0 || k > catalog_len {
            return Err(ClassifierError::InvalidTopK { k, catalog_len });
        }

        let expected = self.predictor.input_shape();
        if tensor.shape() != expected {
            return Err(ClassifierError::ShapeMismatch {
                expected: expected.to_vec(),
                actual: tensor.shape().to_vec(),
            });
        }

        let raw = self.predictor.infer(&tensor.view())?;
        if raw.len() != catalog_len {
            return Err(ClassifierError::CatalogMismatch {
                catalog_len,
                output_len: raw.len(),
            });
        }

        let scores = ensure_distribution(&raw);
        Ok(self.rank(&scores, k))
    }

    /// Preprocesses `image` and classifies it in one call.
    pub fn predict(
        &self,
        image: &DynamicImage,
        k: usize,
    ) -> Result<Vec<Prediction>, ClassifierError> {
        let tensor = self.preprocess(image);
        self.classify(&tensor, k)
    }

    fn rank(&self, scores: &[f32], k: usize) -> Vec<Prediction> {
        let mut indices: Vec<usize> = (0..scores.len()).collect();
        indices.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.cmp(&b))
        });
        indices.truncate(k);

        let labels = self.catalog.labels();
        indices
            .into_iter()
            .map(|index| Prediction {
                index,
                label: labels[index].clone(),
                score: scores[index],
            })
            .collect()
    }
}
