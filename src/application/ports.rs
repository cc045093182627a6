use async_trait::async_trait;
use image::RgbImage;

use crate::domain::{
    errors::DomainResult,
    model::{ChannelOrder, ModelId},
    pose::RawPerson,
};

/// A pose-estimation model: raster in, zero or more persons out.
///
/// Implementations are driven from one thread at a time; the orchestrator
/// holds them behind a mutex.
pub trait PoseEstimatorPort: Send {
    /// Channel layout `estimate` expects. The orchestrator reorders to match.
    fn channel_order(&self) -> ChannelOrder {
        ChannelOrder::Rgb
    }

    fn estimate(&mut self, image: &RgbImage) -> DomainResult<Vec<RawPerson>>;
}

#[async_trait]
pub trait ModelCatalogPort: Send + Sync {
    async fn validate_model(&self, model: &ModelId) -> DomainResult<()>;
}
