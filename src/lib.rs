pub mod aqi;
pub mod config;
pub mod image;
pub mod models;
pub mod utils;

// 重新导出主要类型
pub use aqi::{AqiCategory, AqiPipeline, AqiPrediction, AqiResult};
pub use config::Config;
pub use models::{AirQualityModel, ModelManager, Predictor};
pub use utils::error::AqiError;

pub type Result<T> = std::result::Result<T, AqiError>;
