use crate::aqi::AqiCategory;
use crate::models::AirQualityModel;
use crate::utils::error::AqiError;
use crate::{Config, Result};
use once_cell::sync::OnceCell;
use std::path::PathBuf;
use std::sync::Arc;

/// 全局模型管理器单例，启动时加载一次，之后只读
pub struct ModelManager {
    classifier: Arc<AirQualityModel>,
    config: Config,
}

static MODEL_MANAGER: OnceCell<Arc<ModelManager>> = OnceCell::new();

impl ModelManager {
    /// 加载模型并做一次预热推理，失败即无法提供服务
    pub fn load(config: Config) -> Result<Self> {
        let classifier = AirQualityModel::new(&config)?;
        classifier.verify(config.input_size)?;

        Ok(Self {
            classifier: Arc::new(classifier),
            config,
        })
    }

    /// 初始化全局模型管理器
    pub fn init(config: Config) -> Result<()> {
        if MODEL_MANAGER.get().is_some() {
            return Err(AqiError::Internal(
                "Model manager already initialized".to_string(),
            ));
        }

        tracing::info!("Initializing model manager...");
        let manager = Self::load(config)?;

        MODEL_MANAGER
            .set(Arc::new(manager))
            .map_err(|_| AqiError::Internal("Failed to initialize model manager".to_string()))?;

        tracing::info!("Model manager initialized successfully");
        Ok(())
    }

    /// 获取全局模型管理器实例
    pub fn instance() -> Result<Arc<ModelManager>> {
        MODEL_MANAGER
            .get()
            .cloned()
            .ok_or_else(|| AqiError::Internal("Model manager not initialized".to_string()))
    }

    pub fn is_initialized() -> bool {
        MODEL_MANAGER.get().is_some()
    }

    pub fn classifier(&self) -> Arc<AirQualityModel> {
        Arc::clone(&self.classifier)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 获取模型统计信息
    pub fn get_stats(&self) -> ModelStats {
        ModelStats {
            model_path: self.classifier.model_path().to_path_buf(),
            input_names: self.classifier.input_names().to_vec(),
            output_name: self.classifier.output_name().to_string(),
            num_classes: AqiCategory::COUNT,
            input_size: self.config.input_size,
            intra_threads: self.config.onnx_config.intra_threads,
            optimization_level: self.config.onnx_config.optimization_level,
        }
    }
}

/// 模型统计信息
#[derive(Debug, Clone, serde::Serialize)]
pub struct ModelStats {
    pub model_path: PathBuf,
    pub input_names: Vec<String>,
    pub output_name: String,
    pub num_classes: usize,
    pub input_size: u32,
    pub intra_threads: usize,
    pub optimization_level: i32,
}

/// 便捷函数：获取分类器
pub fn get_classifier() -> Result<Arc<AirQualityModel>> {
    Ok(ModelManager::instance()?.classifier())
}

/// 便捷函数：获取模型统计信息
pub fn get_model_stats() -> Result<ModelStats> {
    Ok(ModelManager::instance()?.get_stats())
}
