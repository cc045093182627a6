use async_trait::async_trait;
use std::io::ErrorKind;

use crate::application::ports::ModelCatalogPort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::model::ModelId;

/// Checks that an ONNX model file is present before the session is built.
pub struct OnnxModelCatalog;

impl OnnxModelCatalog {
    pub fn new() -> Self { Self }
}

#[async_trait]
impl ModelCatalogPort for OnnxModelCatalog {
    async fn validate_model(&self, model: &ModelId) -> DomainResult<()> {
        let path = model.onnx_path.trim();
        if path.is_empty() {
            return Err(DomainError::InvalidInput("model path is empty".into()));
        }

        let meta = tokio::fs::metadata(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => DomainError::NotFound(format!("model file not found: {path}")),
            _ => DomainError::Internal(format!("cannot stat {path}: {e}")),
        })?;

        if meta.is_dir() {
            return Err(DomainError::InvalidInput(format!("{path} is a directory, expected an .onnx file")));
        }
        if meta.len() == 0 {
            return Err(DomainError::InvalidInput(format!("{path} is empty")));
        }
        Ok(())
    }
}
