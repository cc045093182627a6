pub mod model_catalog;
pub mod pose_engine;
