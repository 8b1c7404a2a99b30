use crate::aqi::AqiCategory;
use crate::models::Predictor;
use crate::utils::error::AqiError;
use crate::{Config, Result};
use ndarray::Array4;
use ort::{
    session::{builder::GraphOptimizationLevel, Session, SessionInputValue, SessionInputs},
    value::Tensor,
};
use parking_lot::Mutex;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// 空气质量分类模型（ResNet + ViT 双分支导出的ONNX）
pub struct AirQualityModel {
    session: Mutex<Session>,
    input_names: Vec<String>, // 动态发现的输入名称
    output_name: String,      // 动态发现的输出名称
    model_path: PathBuf,
}

impl AirQualityModel {
    pub fn new(config: &Config) -> Result<Self> {
        let model_path = config.model_path().to_path_buf();

        if !model_path.exists() {
            return Err(AqiError::ModelLoad(format!(
                "Model not found: {}",
                model_path.display()
            )));
        }

        tracing::info!("Loading air quality model from: {}", model_path.display());

        let session = Session::builder()?
            .with_optimization_level(optimization_level(config.onnx_config.optimization_level))?
            .with_intra_threads(config.onnx_config.intra_threads)?
            .commit_from_file(&model_path)?;

        if session.inputs.is_empty() {
            return Err(AqiError::ModelLoad("Model has no inputs".to_string()));
        }

        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        tracing::info!("Model inputs: {:?}", input_names);
        if input_names.len() > 1 {
            tracing::debug!(
                "Model declares {} inputs, binding the same tensor to each",
                input_names.len()
            );
        }

        let output_name = match session.outputs.first() {
            Some(output) => output.name.clone(),
            None => return Err(AqiError::ModelLoad("Model has no outputs".to_string())),
        };
        tracing::info!("Model output: '{}'", output_name);
        for (i, output) in session.outputs.iter().enumerate() {
            tracing::debug!("Output[{}]: '{}'", i, output.name);
        }

        Ok(Self {
            session: Mutex::new(session),
            input_names,
            output_name,
            model_path,
        })
    }

    /// 用全零张量做一次推理，确认输入签名和输出宽度
    pub fn verify(&self, input_size: u32) -> Result<()> {
        warm_up(self, input_size)
    }

    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    pub fn output_name(&self) -> &str {
        &self.output_name
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }
}

impl Predictor for AirQualityModel {
    fn predict(&self, tensor: &Array4<f32>) -> Result<Vec<f32>> {
        // 每个输入分支使用同一个张量
        let mut feeds: Vec<(Cow<'_, str>, SessionInputValue<'_>)> =
            Vec::with_capacity(self.input_names.len());
        for name in &self.input_names {
            let value = Tensor::from_array(tensor.clone())?;
            feeds.push((Cow::Borrowed(name.as_str()), value.into()));
        }

        let scores = {
            let mut session = self.session.lock();
            let outputs = session.run(SessionInputs::<0>::ValueMap(feeds))?;

            match outputs.get(&self.output_name) {
                Some(output) => output
                    .try_extract_array::<f32>()?
                    .iter()
                    .copied()
                    .collect::<Vec<f32>>(),
                None => {
                    let available_outputs: Vec<String> =
                        outputs.keys().map(|s| s.to_string()).collect();
                    return Err(AqiError::Inference(format!(
                        "Output '{}' not found. Available outputs: {:?}",
                        self.output_name, available_outputs
                    )));
                }
            }
        };

        Ok(scores)
    }
}

/// 预热检查：推理失败或输出宽度与等级表不符都视为模型不可用
pub(crate) fn warm_up<P: Predictor + ?Sized>(predictor: &P, input_size: u32) -> Result<()> {
    let size = input_size as usize;
    let zeros = Array4::<f32>::zeros((1, size, size, 3));

    let scores = predictor
        .predict(&zeros)
        .map_err(|e| AqiError::ModelLoad(format!("Warm-up inference failed: {}", e)))?;

    if scores.len() != AqiCategory::COUNT {
        return Err(AqiError::ModelLoad(format!(
            "Model produces {} scores, expected {}",
            scores.len(),
            AqiCategory::COUNT
        )));
    }

    tracing::debug!("Warm-up inference passed: {:?}", scores);
    Ok(())
}

fn optimization_level(level: i32) -> GraphOptimizationLevel {
    match level {
        i32::MIN..=0 => GraphOptimizationLevel::Disable,
        1 => GraphOptimizationLevel::Level1,
        2 => GraphOptimizationLevel::Level2,
        _ => GraphOptimizationLevel::Level3,
    }
}
