use std::env;

use crate::catalog::Catalog;

/// Represents the available built-in models in the library
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinModel {
    /// ResNet fine-tuned on the Food-101 dataset
    ///
    /// Characteristics:
    /// - Input: 224x224 RGB
    /// - Output: 101 dish categories
    /// - Size: ~98MB
    Food101ResNet,
}

/// Characteristics of a model including its capabilities and requirements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCharacteristics {
    /// Width in pixels the model expects its input resized to
    pub input_width: u32,
    /// Height in pixels the model expects its input resized to
    pub input_height: u32,
    /// Number of categories in the model's output vector
    pub num_classes: usize,
    /// Approximate size of the model on disk
    pub model_size_mb: usize,
}

impl ModelCharacteristics {
    /// The tensor shape the model expects: batch-of-one, NHWC.
    pub fn input_shape(&self) -> [usize; 4] {
        [1, self.input_height as usize, self.input_width as usize, 3]
    }
}

/// Describes where a model artifact lives and how to verify it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelInfo {
    /// Short name, used as the cache subdirectory
    pub name: String,
    /// Hugging Face repository id, e.g. `"Alya83/Food-101"`
    pub repo_id: String,
    /// Artifact filename within the repository
    pub filename: String,
    /// SHA-256 of the artifact, when published. `None` skips hash
    /// verification and only checks the file is present and non-empty.
    pub sha256: Option<String>,
    /// Hub endpoint override for mirrors. `None` falls back to the
    /// `DISHSCAN_HF_ENDPOINT` environment variable, then to huggingface.co.
    pub endpoint: Option<String>,
}

impl ModelInfo {
    /// Resolves the download URL for the artifact.
    pub fn model_url(&self) -> String {
        let endpoint = self
            .endpoint
            .clone()
            .or_else(|| env::var("DISHSCAN_HF_ENDPOINT").ok())
            .unwrap_or_else(|| "https://huggingface.co".to_string());
        format!(
            "{}/{}/resolve/main/{}",
            endpoint.trim_end_matches('/'),
            self.repo_id,
            self.filename
        )
    }
}

impl BuiltinModel {
    /// Get the characteristics of the model
    pub fn characteristics(&self) -> ModelCharacteristics {
        match self {
            Self::Food101ResNet => ModelCharacteristics {
                input_width: 224,
                input_height: 224,
                num_classes: 101,
                model_size_mb: 98,
            },
        }
    }

    /// Get the artifact location and verification data for the model
    pub fn get_model_info(&self) -> ModelInfo {
        match self {
            Self::Food101ResNet => ModelInfo {
                name: "food101-resnet".to_string(),
                repo_id: "Alya83/Food-101".to_string(),
                filename: "model_resnet.onnx".to_string(),
                sha256: None,
                endpoint: None,
            },
        }
    }

    /// The category catalog the model's output indices map into
    pub fn catalog(&self) -> Catalog {
        match self {
            Self::Food101ResNet => Catalog::food101(),
        }
    }
}
