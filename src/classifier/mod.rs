pub mod builder;
mod classifier;
mod error;
mod predictor;
pub mod preprocess;
mod utils;

pub use builder::ClassifierBuilder;
pub use classifier::{Classifier, Prediction};
pub use error::ClassifierError;
pub use predictor::{OnnxPredictor, Predictor};

/// Information about the current state and configuration of a classifier
#[derive(Debug, Clone)]
pub struct ClassifierInfo {
    /// Path to the ONNX model file
    pub model_path: String,
    /// Number of categories the classifier can predict
    pub num_classes: usize,
    /// Width in pixels inputs are resized to
    pub input_width: u32,
    /// Height in pixels inputs are resized to
    pub input_height: u32,
}
