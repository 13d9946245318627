use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use ndarray::ArrayView4;
use ort::session::Session;
use ort::value::Tensor;

use super::error::ClassifierError;
use crate::models::ModelCharacteristics;
use crate::runtime::{create_session_builder, RuntimeConfig};

/// An opaque, loaded model: maps a fixed-shape image tensor to one raw
/// score per catalog entry.
///
/// The scores may be logits; the classifier normalizes them into a
/// probability distribution before ranking. Implementations must be safe
/// to call from multiple threads once constructed.
pub trait Predictor: Send + Sync {
    /// The exact tensor shape `infer` accepts: `[1, height, width, 3]`.
    fn input_shape(&self) -> [usize; 4];

    /// Runs a forward pass and returns one raw score per output index.
    fn infer(&self, tensor: &ArrayView4<f32>) -> Result<Vec<f32>, ClassifierError>;
}

/// A [`Predictor`] backed by an ONNX Runtime session.
#[derive(Debug)]
pub struct OnnxPredictor {
    session: Arc<Session>,
    input_name: String,
    input_shape: [usize; 4],
}

impl OnnxPredictor {
    /// Loads an ONNX model from disk.
    ///
    /// # Errors
    /// - `BuildError` if the file cannot be deserialized into a session
    /// - `BuildError` if the model's input/output structure is unusable
    pub fn load<P: AsRef<Path>>(
        model_path: P,
        config: &RuntimeConfig,
        characteristics: &ModelCharacteristics,
    ) -> Result<Self, ClassifierError> {
        let session = create_session_builder(config)?.commit_from_file(model_path.as_ref())?;
        Self::validate_session(&session)?;

        let input_name = session.inputs[0].name.clone();
        log::info!("Model loaded, feeding input tensor '{}'", input_name);

        Ok(Self {
            session: Arc::new(session),
            input_name,
            input_shape: characteristics.input_shape(),
        })
    }

    /// Checks that the model takes a single image tensor and produces at
    /// least one output.
    fn validate_session(session: &Session) -> Result<(), ClassifierError> {
        let inputs = &session.inputs;
        if inputs.len() != 1 {
            return Err(ClassifierError::BuildError(format!(
                "Model must have exactly 1 input (the image tensor), found {}",
                inputs.len()
            )));
        }

        let outputs = &session.outputs;
        if outputs.is_empty() {
            return Err(ClassifierError::BuildError(
                "Model must have at least 1 output for class scores".to_string(),
            ));
        }

        Ok(())
    }
}

impl Predictor for OnnxPredictor {
    fn input_shape(&self) -> [usize; 4] {
        self.input_shape
    }

    fn infer(&self, tensor: &ArrayView4<f32>) -> Result<Vec<f32>, ClassifierError> {
        let input_dyn = tensor.to_owned().into_dyn();
        let input = input_dyn.as_standard_layout();

        let mut input_tensors = HashMap::new();
        input_tensors.insert(
            self.input_name.as_str(),
            Tensor::from_array(&input).map_err(|e| {
                ClassifierError::InferenceFailed(format!("Failed to create input tensor: {}", e))
            })?,
        );

        let outputs = self
            .session
            .run(input_tensors)
            .map_err(|e| ClassifierError::InferenceFailed(format!("Failed to run model: {}", e)))?;
        let output_tensor = outputs[0].try_extract_tensor::<f32>().map_err(|e| {
            ClassifierError::InferenceFailed(format!("Failed to extract output tensor: {}", e))
        })?;

        // Output arrives as (1, N) for a batch of one; flatten it into the
        // score vector.
        Ok(output_tensor.iter().copied().collect())
    }
}
