use std::sync::{Arc, OnceLock};
use std::time::Instant;
use tracing::{error, info, warn};

use crate::{
    application::{
        annotator::AnnotationRenderer,
        codec,
        dto::{AnnotatedImageResponse, DetectJsonResponse, HealthResponse, ImageRequest, ModelInfoResponse},
        formatter,
        orchestrator::DetectionOrchestrator,
        ports::{ModelCatalogPort, PoseEstimatorPort},
    },
    domain::{
        errors::{DomainError, DomainResult},
        model::ModelId,
        pose::{KeypointIndex, TimingRecord},
        skeleton::connection_indices,
    },
};

/// Pipeline pieces that exist once a model has been loaded.
struct Ready {
    model_type: String,
    orchestrator: Arc<DetectionOrchestrator>,
    renderer: Arc<AnnotationRenderer>,
}

/// Pose detection use cases.
///
/// Starts uninitialized; `initialize` installs the model exactly once and
/// the service stays ready for the rest of the process.
pub struct PoseService {
    model_catalog: Arc<dyn ModelCatalogPort>,
    ready: OnceLock<Ready>,
}

impl PoseService {
    pub fn new(model_catalog: Arc<dyn ModelCatalogPort>) -> Self {
        Self { model_catalog, ready: OnceLock::new() }
    }

    /// Validates the model, builds the estimator off the async runtime and installs it.
    pub async fn load_model<F>(&self, model: ModelId, load: F) -> DomainResult<()>
    where
        F: FnOnce(&ModelId) -> DomainResult<Box<dyn PoseEstimatorPort>> + Send + 'static,
    {
        self.model_catalog.validate_model(&model).await?;

        let (model, estimator) = tokio::task::spawn_blocking(move || {
            let estimator = load(&model)?;
            Ok::<_, DomainError>((model, estimator))
        })
        .await
        .map_err(|e| DomainError::Internal(format!("model loader panicked: {e}")))??;

        self.initialize(model.name, estimator)
    }

    pub fn initialize(&self, model_type: String, estimator: Box<dyn PoseEstimatorPort>) -> DomainResult<()> {
        let orchestrator = Arc::new(DetectionOrchestrator::new(estimator));
        let renderer = Arc::new(AnnotationRenderer::new(orchestrator.clone()));
        self.ready
            .set(Ready { model_type, orchestrator, renderer })
            .map_err(|_| DomainError::Internal("model already initialized".into()))
    }

    pub fn is_ready(&self) -> bool {
        self.ready.get().is_some()
    }

    fn ready(&self) -> DomainResult<&Ready> {
        self.ready.get().ok_or(DomainError::NotReady)
    }

    pub fn health(&self) -> HealthResponse {
        HealthResponse { status: "healthy".into(), model_loaded: self.is_ready() }
    }

    pub fn model_info(&self) -> DomainResult<ModelInfoResponse> {
        let ready = self.ready()?;
        Ok(ModelInfoResponse {
            model_type: ready.model_type.clone(),
            keypoints_count: KeypointIndex::COUNT,
            keypoint_names: KeypointIndex::NAMES.iter().map(|n| n.to_string()).collect(),
            connections: connection_indices().collect(),
        })
    }

    /// decode -> detect -> format, with per-phase timing.
    pub async fn detect_json(&self, request: ImageRequest) -> DomainResult<DetectJsonResponse> {
        let orchestrator = self.ready()?.orchestrator.clone();
        let ImageRequest { id, image } = request;
        info!(id = %id, "pose detection request");

        let outcome = tokio::task::spawn_blocking(move || {
            let t_decode = Instant::now();
            let decoded = codec::decode(&image);
            let decode = t_decode.elapsed();

            let run = || -> DomainResult<DetectJsonResponse> {
                let decoded = decoded?;
                let t_detect = Instant::now();
                let (persons, phases) = orchestrator.detect(&decoded)?;
                let detect = t_detect.elapsed();

                Ok(DetectJsonResponse {
                    result: formatter::format(&persons, &id),
                    timing: TimingRecord::new(decode, phases, detect),
                    id: id.clone(),
                })
            };
            let outcome = run();
            (outcome, id)
        })
        .await
        .map_err(|e| DomainError::Internal(format!("detection task failed: {e}")))?;

        log_outcome(outcome, "pose detection", |r| {
            info!(id = %r.id, count = r.result.count(), "pose detection done")
        })
    }

    /// decode -> annotate -> encode.
    pub async fn detect_image(&self, request: ImageRequest) -> DomainResult<AnnotatedImageResponse> {
        let renderer = self.ready()?.renderer.clone();
        let ImageRequest { id, image } = request;
        info!(id = %id, "annotation request");

        let outcome = tokio::task::spawn_blocking(move || {
            let run = || -> DomainResult<AnnotatedImageResponse> {
                let decoded = codec::decode(&image)?;
                let annotated = renderer.annotate(&decoded);
                Ok(AnnotatedImageResponse { id: id.clone(), annotated_image: codec::encode(&annotated)? })
            };
            let outcome = run();
            (outcome, id)
        })
        .await
        .map_err(|e| DomainError::Internal(format!("annotation task failed: {e}")))?;

        log_outcome(outcome, "annotation", |r| info!(id = %r.id, "annotation done"))
    }
}

fn log_outcome<T>(
    (outcome, id): (DomainResult<T>, String),
    what: &str,
    on_success: impl FnOnce(&T),
) -> DomainResult<T> {
    match &outcome {
        Ok(response) => on_success(response),
        Err(e) if e.is_client_fault() => warn!(id = %id, "{what} rejected: {e}"),
        Err(e) => error!(id = %id, "{what} failed: {e}"),
    }
    outcome
}
