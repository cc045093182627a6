use std::sync::Arc;
use crate::application::services::PoseService;

/// Shared state for the axum handlers: the use-case layer, never the model itself.
#[derive(Clone)]
pub struct HttpState {
    pub pose: Arc<PoseService>,
}
