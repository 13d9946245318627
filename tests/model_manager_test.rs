use std::env;
use std::fs;

use dishscan::{BuiltinModel, ModelError, ModelInfo, ModelManager, ModelProvider, RuntimeConfig};

fn scratch_info(name: &str) -> ModelInfo {
    ModelInfo {
        name: name.to_string(),
        repo_id: "axar-ai/scratch".to_string(),
        filename: "model.onnx".to_string(),
        sha256: None,
        endpoint: None,
    }
}

#[test]
fn test_default_models_dir() {
    // Test with environment variable
    env::set_var("DISHSCAN_CACHE", "/tmp/dishscan-test-cache");
    let path = ModelManager::get_default_models_dir();
    assert!(path
        .to_str()
        .unwrap()
        .contains("/tmp/dishscan-test-cache/models"));
    env::remove_var("DISHSCAN_CACHE");

    // Test without environment variable
    let path = ModelManager::get_default_models_dir();
    assert!(path.to_str().unwrap().contains("dishscan/models"));
}

#[tokio::test]
async fn download_lifecycle_with_local_files() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ModelManager::new("/tmp/dishscan-test/lifecycle")?;
    let info = scratch_info("local-model");

    // Clean up any existing files
    let model_path = manager.get_model_path(&info);
    if model_path.exists() {
        fs::remove_file(&model_path)?;
    }

    assert!(!manager.is_model_downloaded(&info));
    assert!(!manager.verify_model(&info)?);

    // Place a file where a download would land and verify the cache sees it.
    fs::create_dir_all(model_path.parent().unwrap())?;
    fs::write(&model_path, b"onnx bytes")?;
    assert!(manager.is_model_downloaded(&info));
    assert!(manager.verify_model(&info)?);

    // Corrupt file (empty) and verify
    fs::write(&model_path, b"")?;
    assert!(!manager.verify_model(&info)?);

    manager.remove_download(&info)?;
    assert!(!manager.is_model_downloaded(&info));
    Ok(())
}

#[tokio::test]
async fn hash_mismatch_is_detected() -> Result<(), Box<dyn std::error::Error>> {
    let manager = ModelManager::new("/tmp/dishscan-test/hash-check")?;
    let mut info = scratch_info("hashed-model");
    info.sha256 = Some(
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855".to_string(),
    );

    let model_path = manager.get_model_path(&info);
    fs::create_dir_all(model_path.parent().unwrap())?;
    fs::write(&model_path, b"these bytes do not hash to the expected value")?;
    assert!(!manager.verify_model(&info)?);

    manager.remove_download(&info)?;
    Ok(())
}

#[tokio::test]
async fn unreachable_hub_fails_with_unavailable() {
    let manager = ModelManager::new("/tmp/dishscan-test/offline-hub").unwrap();
    let mut info = scratch_info("offline-model");
    info.endpoint = Some("http://127.0.0.1:9".to_string());

    let err = manager.ensure_model_downloaded(&info).await.unwrap_err();
    assert!(matches!(err, ModelError::Unavailable(_)));
    assert!(!manager.is_model_downloaded(&info));
}

#[tokio::test]
async fn provider_does_not_cache_failed_loads() {
    let mut info = scratch_info("offline-provider");
    info.endpoint = Some("http://127.0.0.1:9".to_string());
    let provider = ModelProvider::with_manager(
        info,
        BuiltinModel::Food101ResNet.characteristics(),
        ModelManager::new("/tmp/dishscan-test/offline-provider").unwrap(),
        RuntimeConfig::default(),
    );

    assert!(provider.get().await.is_err());
    assert!(!provider.is_loaded());
    assert!(provider.get().await.is_err());
}

#[tokio::test]
#[ignore = "downloads the Food-101 model from the hub"]
async fn builtin_model_downloads_and_verifies() -> Result<(), ModelError> {
    let manager = ModelManager::new_default()?;
    let info = BuiltinModel::Food101ResNet.get_model_info();

    manager.ensure_model_downloaded(&info).await?;
    assert!(manager.is_model_downloaded(&info));
    assert!(manager.verify_model(&info)?);
    Ok(())
}
