//! A thread-safe food-image classifier using ONNX models, returning ranked
//! dish predictions with confidence scores.
//!
//! # Basic Usage
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use dishscan::{BuiltinModel, Classifier};
//!
//! let classifier = Classifier::builder()
//!     .with_model(BuiltinModel::Food101ResNet)?
//!     .build()?;
//!
//! let image = image::open("dinner.jpg")?;
//! let predictions = classifier.predict(&image, 3)?;
//! println!(
//!     "Best guess: {} ({:.1}%)",
//!     predictions[0].label,
//!     predictions[0].score * 100.0
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Downloading the model
//!
//! Model artifacts are fetched from the Hugging Face hub once and cached
//! on disk. The async [`ModelProvider`] coalesces concurrent first loads
//! into one download and memoizes the loaded predictor for the process
//! lifetime:
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use dishscan::{BuiltinModel, Classifier, ModelProvider};
//!
//! let provider = ModelProvider::new(BuiltinModel::Food101ResNet)?;
//! let predictor = provider.get().await?;
//!
//! let classifier = Classifier::builder()
//!     .with_predictor(predictor, BuiltinModel::Food101ResNet.catalog())?
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! The classifier is thread-safe and can be shared across threads using
//! `Arc`; a single inference call chain is preprocess, infer, rank, with
//! no shared mutable state beyond the memoized predictor.

pub mod catalog;
pub mod classifier;
pub mod model_manager;
pub mod models;
mod provider;
mod runtime;

pub use catalog::{Catalog, FOOD101_LABELS};
pub use classifier::{
    Classifier, ClassifierBuilder, ClassifierError, ClassifierInfo, OnnxPredictor, Prediction,
    Predictor,
};
pub use model_manager::{ModelError, ModelManager};
pub use models::{BuiltinModel, ModelCharacteristics, ModelInfo};
pub use provider::ModelProvider;
pub use runtime::{create_session_builder, RuntimeConfig};

pub fn init_logger() {
    env_logger::init();
}
