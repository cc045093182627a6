mod adapters;
mod application;
mod config;
mod domain;

use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::adapters::{
    http::{router, state::HttpState},
    onnx::{model_catalog::OnnxModelCatalog, pose_engine::OnnxPoseEngine},
};
use crate::application::{ports::PoseEstimatorPort, services::PoseService};
use crate::config::Config;
use crate::domain::errors::DomainError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Inicializar logs (RUST_LOG=info por defecto)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // 2. Configuración (CLI / variables de entorno)
    let config = Config::parse();
    let inference = config.inference();

    // 3. Adaptadores y servicio de pose.
    // El modelo se carga antes de abrir el puerto; si falla, el proceso termina.
    tracing::info!("🔧 Loading pose model {}...", inference.model.onnx_path);
    let pose = Arc::new(PoseService::new(Arc::new(OnnxModelCatalog::new())));
    let engine_config = inference.clone();
    pose.load_model(inference.model, move |_| {
        OnnxPoseEngine::load(&engine_config)
            .map(|engine| Box::new(engine) as Box<dyn PoseEstimatorPort>)
            .map_err(|e| DomainError::Inference(format!("{e:#}")))
    })
    .await
    .context("model load failed")?;
    tracing::info!("✅ Model loaded");

    // 4. Estado de la API y router de Axum
    let app = router(HttpState { pose });

    // 5. Lanzar el servidor
    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("cannot bind {addr}"))?;
    tracing::info!("🚀 Pose service listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
