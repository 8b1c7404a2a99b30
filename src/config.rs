use crate::utils::error::AqiError;
use crate::Result;
use std::path::{Path, PathBuf};

/// 默认模型文件名
pub const DEFAULT_MODEL_FILE: &str = "resnet_vit_model.onnx";

/// 模型输入边长（224x224）
pub const DEFAULT_INPUT_SIZE: u32 = 224;

/// 上传大小上限（50MB）
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 50 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    /// 模型文件路径
    pub model_path: PathBuf,

    /// 模型输入边长
    pub input_size: u32,

    /// 最大上传字节数
    pub max_upload_size: usize,

    /// ONNX Runtime配置
    pub onnx_config: OnnxConfig,
}

#[derive(Debug, Clone)]
pub struct OnnxConfig {
    /// CPU线程数
    pub intra_threads: usize,

    /// 优化级别
    pub optimization_level: i32,
}

impl Config {
    pub fn new(
        models_dir: impl AsRef<Path>,
        model_file: Option<String>,
        threads: Option<usize>,
    ) -> Result<Self> {
        let cpu_cores = num_cpus::get();

        let intra_threads = match threads {
            Some(0) => {
                return Err(AqiError::Config(
                    "Thread count must be at least 1".to_string(),
                ))
            }
            Some(n) => n,
            None => (cpu_cores * 3 / 4).max(1), // 使用75%的CPU核心
        };

        let model_file = model_file.unwrap_or_else(|| DEFAULT_MODEL_FILE.to_string());
        if model_file.trim().is_empty() {
            return Err(AqiError::Config("Model file name is empty".to_string()));
        }

        Ok(Self {
            model_path: models_dir.as_ref().join(model_file),
            input_size: DEFAULT_INPUT_SIZE,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            onnx_config: OnnxConfig {
                intra_threads,
                optimization_level: 3,
            },
        })
    }

    /// 获取模型路径
    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models").join(DEFAULT_MODEL_FILE),
            input_size: DEFAULT_INPUT_SIZE,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            onnx_config: OnnxConfig {
                intra_threads: (num_cpus::get() * 3 / 4).max(1),
                optimization_level: 3,
            },
        }
    }
}
