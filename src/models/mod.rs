pub mod classifier;
pub mod manager;
pub mod predictor;

pub use classifier::AirQualityModel;
pub use manager::{ModelManager, ModelStats};
pub use predictor::Predictor;

// Re-export convenience functions from manager
pub use manager::{get_classifier, get_model_stats};
