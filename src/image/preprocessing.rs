use crate::config::DEFAULT_INPUT_SIZE;
use crate::utils::error::AqiError;
use crate::Result;
use image::{imageops::FilterType, DynamicImage};
use ndarray::Array4;

/// 将解码后的图像转换为模型输入张量 (1, H, W, 3)，像素值归一化到 [0, 1]
#[derive(Debug, Clone, Copy)]
pub struct ImagePreprocessor {
    size: u32,
    filter: FilterType,
}

impl Default for ImagePreprocessor {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_SIZE)
    }
}

impl ImagePreprocessor {
    pub fn new(size: u32) -> Self {
        Self {
            size,
            // 与训练时的加载方式保持一致：最近邻缩放
            filter: FilterType::Nearest,
        }
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// 张量形状 (N, H, W, C)
    pub fn tensor_shape(&self) -> (usize, usize, usize, usize) {
        (1, self.size as usize, self.size as usize, 3)
    }

    pub fn preprocess(&self, image: &DynamicImage) -> Result<Array4<f32>> {
        if self.size == 0 {
            return Err(AqiError::ImageProcessing(
                "Target size must be non-zero".to_string(),
            ));
        }
        if image.width() == 0 || image.height() == 0 {
            return Err(AqiError::InvalidInput(format!(
                "Image has no pixels: {}x{}",
                image.width(),
                image.height()
            )));
        }

        // 先转RGB（丢弃alpha、灰度扩展为三通道），再拉伸到目标尺寸，不保持宽高比
        let rgb = image.to_rgb8();
        let resized = image::imageops::resize(&rgb, self.size, self.size, self.filter);

        let (width, height) = resized.dimensions();
        let raw = resized.into_raw();

        let tensor = Array4::from_shape_vec(
            (1, height as usize, width as usize, 3),
            raw.into_iter().map(|v| v as f32 / 255.0).collect(),
        )
        .map_err(|e| AqiError::ImageProcessing(format!("Tensor shape mismatch: {}", e)))?;

        Ok(tensor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        }))
    }

    fn assert_valid(tensor: &Array4<f32>) {
        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);
        assert!(tensor.iter().all(|v| (0.0..=1.0).contains(v)));
    }

    #[test]
    fn output_shape_is_fixed_for_any_input_size() {
        let pre = ImagePreprocessor::default();
        for (w, h) in [(1, 1), (31, 500), (224, 224), (1024, 768)] {
            assert_valid(&pre.preprocess(&gradient(w, h)).unwrap());
        }
    }

    #[test]
    fn divides_by_255_without_other_normalization() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(50, 40, Rgb([0, 51, 255])));
        let tensor = ImagePreprocessor::default().preprocess(&image).unwrap();
        assert_eq!(tensor[[0, 0, 0, 0]], 0.0);
        assert!((tensor[[0, 100, 100, 1]] - 0.2).abs() < 1e-6);
        assert_eq!(tensor[[0, 223, 223, 2]], 1.0);
    }

    #[test]
    fn alpha_is_dropped() {
        let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 0])));
        let tensor = ImagePreprocessor::default().preprocess(&image).unwrap();
        assert_valid(&tensor);
        assert_eq!(tensor[[0, 5, 5, 0]], 1.0);
        assert_eq!(tensor[[0, 5, 5, 1]], 0.0);
    }

    #[test]
    fn grayscale_is_expanded_to_three_channels() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(20, 20, Luma([102])));
        let tensor = ImagePreprocessor::default().preprocess(&image).unwrap();
        assert_valid(&tensor);
        for c in 0..3 {
            assert!((tensor[[0, 7, 7, c]] - 0.4).abs() < 1e-6);
        }
    }

    #[test]
    fn preprocessing_is_idempotent() {
        let pre = ImagePreprocessor::default();
        let image = gradient(300, 200);
        assert_eq!(pre.preprocess(&image).unwrap(), pre.preprocess(&image).unwrap());
    }

    #[test]
    fn custom_size_is_respected() {
        let tensor = ImagePreprocessor::new(32).preprocess(&gradient(64, 64)).unwrap();
        assert_eq!(tensor.shape(), &[1, 32, 32, 3]);
        assert_eq!(ImagePreprocessor::new(32).tensor_shape(), (1, 32, 32, 3));
    }

    #[test]
    fn smoothing_filter_keeps_solid_colors() {
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(97, 53, Rgb([51, 102, 204])));
        let tensor = ImagePreprocessor::default()
            .with_filter(FilterType::Triangle)
            .preprocess(&image)
            .unwrap();
        assert_valid(&tensor);
        assert!((tensor[[0, 111, 37, 0]] - 0.2).abs() < 1e-6);
        assert!((tensor[[0, 111, 37, 2]] - 0.8).abs() < 1e-6);
    }

    #[test]
    fn nearest_sampling_picks_pixel_centers() {
        // 6 -> 3 取第 1、3、5 列
        let image = DynamicImage::ImageRgb8(RgbImage::from_fn(6, 1, |x, _| Rgb([x as u8 * 10, 0, 0])));
        let tensor = ImagePreprocessor::new(3).preprocess(&image).unwrap();
        let picked: Vec<u8> = (0..3).map(|x| (tensor[[0, 0, x, 0]] * 255.0).round() as u8).collect();
        assert_eq!(picked, vec![10, 30, 50]);
    }

    #[test]
    fn zero_size_is_rejected() {
        let err = ImagePreprocessor::new(0).preprocess(&gradient(4, 4)).unwrap_err();
        assert!(matches!(err, AqiError::ImageProcessing(_)));
    }
}
