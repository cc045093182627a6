pub mod errors;
pub mod model;
pub mod pose;
pub mod skeleton;
