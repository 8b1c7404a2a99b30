use crate::{
    aqi::{AqiResult, AqiStats, ResultMapper},
    image::{ImageLoader, ImagePreprocessor},
    models::{AirQualityModel, ModelManager, Predictor},
    Config, Result,
};
use image::DynamicImage;
use std::sync::Arc;
use std::time::Instant;

/// 分类流水线：解码 → 缩放归一化 → 推理 → argmax → 查表
pub struct AqiPipeline<P> {
    predictor: P,
    loader: ImageLoader,
    preprocessor: ImagePreprocessor,
}

impl AqiPipeline<Arc<AirQualityModel>> {
    /// 基于全局已加载模型构建流水线
    pub fn from_manager() -> Result<Self> {
        let manager = ModelManager::instance()?;
        Ok(Self::new(manager.classifier(), manager.config()))
    }
}

impl<P: Predictor> AqiPipeline<P> {
    pub fn new(predictor: P, config: &Config) -> Self {
        Self {
            predictor,
            loader: ImageLoader::new(config.max_upload_size),
            preprocessor: ImagePreprocessor::new(config.input_size),
        }
    }

    pub fn with_preprocessor(mut self, preprocessor: ImagePreprocessor) -> Self {
        self.preprocessor = preprocessor;
        self
    }

    /// 处理上传的原始字节
    pub fn process_bytes(&self, bytes: &[u8]) -> Result<AqiResult> {
        let start_time = Instant::now();
        let image = self.loader.from_bytes(bytes)?;
        let decode_time = start_time.elapsed();

        self.run(&image, start_time, decode_time.as_millis() as u64)
    }

    /// 处理base64图像
    pub fn process_base64(&self, base64_data: &str) -> Result<AqiResult> {
        let start_time = Instant::now();
        let image = self.loader.from_base64(base64_data)?;
        let decode_time = start_time.elapsed();

        self.run(&image, start_time, decode_time.as_millis() as u64)
    }

    /// 处理已解码的图像
    pub fn process_image(&self, image: &DynamicImage) -> Result<AqiResult> {
        self.run(image, Instant::now(), 0)
    }

    fn run(&self, image: &DynamicImage, start_time: Instant, decode_time_ms: u64) -> Result<AqiResult> {
        let preprocess_start = Instant::now();
        let tensor = self.preprocessor.preprocess(image)?;
        let preprocess_time = preprocess_start.elapsed();

        let inference_start = Instant::now();
        let scores = self.predictor.predict(&tensor)?;
        let inference_time = inference_start.elapsed();

        let prediction = ResultMapper::map(&scores)?;
        let total_time = start_time.elapsed();

        tracing::info!(
            "Classified {}x{} image: {} [{}], score={:.4}, total_time={:.3}s",
            image.width(),
            image.height(),
            prediction.category,
            prediction.key,
            prediction.score,
            total_time.as_secs_f32()
        );

        let stats = AqiStats {
            decode_time_ms,
            preprocess_time_ms: preprocess_time.as_millis() as u64,
            inference_time_ms: inference_time.as_millis() as u64,
            source_width: image.width(),
            source_height: image.height(),
        };

        Ok(AqiResult::new(prediction, &scores, total_time.as_secs_f32()).with_stats(stats))
    }
}
