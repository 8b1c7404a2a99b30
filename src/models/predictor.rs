use crate::Result;
use ndarray::Array4;
use std::sync::Arc;

/// 推理后端：输入 (1, H, W, 3) 张量，输出每个类别的分数
pub trait Predictor: Send + Sync {
    fn predict(&self, tensor: &Array4<f32>) -> Result<Vec<f32>>;
}

impl<P: Predictor + ?Sized> Predictor for Arc<P> {
    fn predict(&self, tensor: &Array4<f32>) -> Result<Vec<f32>> {
        (**self).predict(tensor)
    }
}

impl<P: Predictor + ?Sized> Predictor for Box<P> {
    fn predict(&self, tensor: &Array4<f32>) -> Result<Vec<f32>> {
        (**self).predict(tensor)
    }
}
