use crate::aqi::AqiCategory;
use serde::{Deserialize, Serialize};

/// 单次分类的展示结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AqiPrediction {
    pub category: AqiCategory,
    /// 类别键，如 "d_Unhealthy"
    pub key: String,
    pub label: String,
    /// AQI区间，如 "151-200"
    pub range: String,
    pub description: String,
    pub class_index: usize,
    /// 获胜类别的原始分数
    pub score: f32,
}

impl AqiPrediction {
    pub fn new(category: AqiCategory, score: f32) -> Self {
        Self {
            category,
            key: category.key().to_string(),
            label: category.label().to_string(),
            range: category.range().to_string(),
            description: category.description().to_string(),
            class_index: category.index(),
            score,
        }
    }
}

/// 各类别分数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub key: String,
    pub score: f32,
}

/// 完整的分类结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AqiResult {
    /// 处理耗时（秒）
    pub processing_time: f32,
    pub prediction: AqiPrediction,
    pub scores: Vec<CategoryScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<AqiStats>,
}

/// 处理统计信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AqiStats {
    pub decode_time_ms: u64,
    pub preprocess_time_ms: u64,
    pub inference_time_ms: u64,
    /// 原图尺寸
    pub source_width: u32,
    pub source_height: u32,
}

impl AqiResult {
    pub fn new(prediction: AqiPrediction, raw_scores: &[f32], processing_time: f32) -> Self {
        let scores = AqiCategory::ALL
            .iter()
            .zip(raw_scores)
            .map(|(category, &score)| CategoryScore {
                key: category.key().to_string(),
                score,
            })
            .collect();

        Self {
            processing_time,
            prediction,
            scores,
            stats: None,
        }
    }

    pub fn with_stats(mut self, stats: AqiStats) -> Self {
        self.stats = Some(stats);
        self
    }

    /// 与页面展示一致的文本形式
    pub fn to_text(&self) -> String {
        format!(
            "Prediction: {} ({})\n{}",
            self.prediction.label, self.prediction.range, self.prediction.description
        )
    }
}
