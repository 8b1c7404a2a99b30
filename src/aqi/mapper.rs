use crate::aqi::{AqiCategory, AqiPrediction};
use crate::utils::error::AqiError;
use crate::Result;

/// 返回最大值的索引；并列时取第一个
pub fn argmax(scores: &[f32]) -> Result<usize> {
    if scores.is_empty() {
        return Err(AqiError::Inference("Empty prediction vector".to_string()));
    }
    if let Some(pos) = scores.iter().position(|s| s.is_nan()) {
        return Err(AqiError::Inference(format!(
            "Prediction contains NaN at index {}",
            pos
        )));
    }

    let mut max_idx = 0;
    let mut max_val = scores[0];
    for (i, &score) in scores.iter().enumerate().skip(1) {
        if score > max_val {
            max_val = score;
            max_idx = i;
        }
    }

    Ok(max_idx)
}

/// 模型输出到空气质量等级的映射
pub struct ResultMapper;

impl ResultMapper {
    pub fn map(scores: &[f32]) -> Result<AqiPrediction> {
        if scores.len() != AqiCategory::COUNT {
            return Err(AqiError::Inference(format!(
                "Expected {} class scores, got {}",
                AqiCategory::COUNT,
                scores.len()
            )));
        }

        let index = argmax(scores)?;
        let category = AqiCategory::from_index(index)
            .ok_or_else(|| AqiError::Internal(format!("No category for index {}", index)))?;

        Ok(AqiPrediction::new(category, scores[index]))
    }
}
