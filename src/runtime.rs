use std::sync::Once;

use ort::session::builder::{GraphOptimizationLevel, SessionBuilder};
use ort::session::Session;
use ort::Result as OrtResult;

static ORT_ENV: Once = Once::new();

/// Tuning knobs for ONNX Runtime session construction.
#[derive(Debug)]
pub struct RuntimeConfig {
    /// Threads running independent graph nodes in parallel; zero lets
    /// ONNX Runtime decide.
    pub inter_threads: usize,
    /// Threads parallelizing work within a single operator; zero lets
    /// ONNX Runtime decide.
    pub intra_threads: usize,
    pub optimization_level: GraphOptimizationLevel,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            inter_threads: 0,
            intra_threads: 0,
            optimization_level: GraphOptimizationLevel::Level3,
        }
    }
}

// GraphOptimizationLevel is not Clone, so the mapping is spelled out.
fn copy_level(level: &GraphOptimizationLevel) -> GraphOptimizationLevel {
    match level {
        GraphOptimizationLevel::Disable => GraphOptimizationLevel::Disable,
        GraphOptimizationLevel::Level1 => GraphOptimizationLevel::Level1,
        GraphOptimizationLevel::Level2 => GraphOptimizationLevel::Level2,
        GraphOptimizationLevel::Level3 => GraphOptimizationLevel::Level3,
    }
}

impl Clone for RuntimeConfig {
    fn clone(&self) -> Self {
        Self {
            inter_threads: self.inter_threads,
            intra_threads: self.intra_threads,
            optimization_level: copy_level(&self.optimization_level),
        }
    }
}

/// Initializes the process-wide ONNX Runtime environment exactly once.
pub fn ensure_initialized() -> OrtResult<()> {
    ORT_ENV.call_once(|| {
        ort::init()
            .with_name("dishscan")
            .commit()
            .expect("Failed to initialize ONNX Runtime environment");
    });
    Ok(())
}

/// Builds a session builder configured from `config`, initializing the
/// runtime environment on first use.
pub fn create_session_builder(config: &RuntimeConfig) -> OrtResult<SessionBuilder> {
    ensure_initialized()?;
    let mut builder =
        Session::builder()?.with_optimization_level(copy_level(&config.optimization_level))?;

    if config.inter_threads > 0 {
        builder = builder.with_inter_threads(config.inter_threads)?;
    }
    if config.intra_threads > 0 {
        builder = builder.with_intra_threads(config.intra_threads)?;
    }

    Ok(builder)
}
