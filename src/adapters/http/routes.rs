use axum::{extract::{rejection::JsonRejection, State}, Json};

use crate::adapters::http::{error::ApiError, state::HttpState};
use crate::application::dto::{
    AnnotatedImageResponse, DetectJsonResponse, Endpoints, HealthResponse, ImageRequest,
    ModelInfoResponse, ServiceInfoResponse,
};

pub async fn detect_json(
    State(st): State<HttpState>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<DetectJsonResponse>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(st.pose.detect_json(req).await?))
}

pub async fn detect_image(
    State(st): State<HttpState>,
    payload: Result<Json<ImageRequest>, JsonRejection>,
) -> Result<Json<AnnotatedImageResponse>, ApiError> {
    let Json(req) = payload?;
    Ok(Json(st.pose.detect_image(req).await?))
}

pub async fn health(State(st): State<HttpState>) -> Json<HealthResponse> {
    Json(st.pose.health())
}

pub async fn model_info(State(st): State<HttpState>) -> Result<Json<ModelInfoResponse>, ApiError> {
    Ok(Json(st.pose.model_info()?))
}

pub async fn root() -> Json<ServiceInfoResponse> {
    Json(ServiceInfoResponse {
        message: "Pose Detection API".into(),
        endpoints: Endpoints {
            pose_json: "/detect/json".into(),
            pose_image: "/detect/image".into(),
            health: "/health".into(),
            model: "/model".into(),
        },
    })
}
