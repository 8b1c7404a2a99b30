pub mod category;
pub mod mapper;
pub mod pipeline;
pub mod types;

pub use category::AqiCategory;
pub use mapper::{argmax, ResultMapper};
pub use pipeline::AqiPipeline;
pub use types::{AqiPrediction, AqiResult, AqiStats, CategoryScore};
