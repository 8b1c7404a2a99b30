use crate::config::DEFAULT_MAX_UPLOAD_SIZE;
use crate::utils::error::AqiError;
use crate::Result;
use base64::Engine;
use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// 上传图像加载器，只接受PNG和JPEG
#[derive(Debug, Clone)]
pub struct ImageLoader {
    max_size: usize,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_UPLOAD_SIZE)
    }
}

impl ImageLoader {
    pub fn new(max_size: usize) -> Self {
        Self { max_size }
    }

    /// 从base64字符串加载图像
    pub fn from_base64(&self, base64_data: &str) -> Result<DynamicImage> {
        // 移除可能的数据URL前缀 (data:image/xxx;base64,)
        let base64_clean = match base64_data.strip_prefix("data:") {
            Some(rest) => rest.split_once(',').map(|(_, data)| data).ok_or_else(|| {
                AqiError::InvalidInput("Data URL has no payload".to_string())
            })?,
            None => base64_data,
        };

        let image_bytes = base64::engine::general_purpose::STANDARD.decode(base64_clean.trim())?;

        self.from_bytes(&image_bytes)
    }

    /// 从字节流加载图像
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<DynamicImage> {
        if bytes.is_empty() {
            return Err(AqiError::InvalidInput("Empty image data".to_string()));
        }

        if bytes.len() > self.max_size {
            return Err(AqiError::FileTooLarge(bytes.len(), self.max_size));
        }

        let format = Self::detect_format(bytes).ok_or_else(|| {
            AqiError::UnsupportedFormat("unrecognized image data".to_string())
        })?;

        if !Self::is_supported_format(format) {
            return Err(AqiError::UnsupportedFormat(format!("{:?}", format)));
        }

        let image = image::load_from_memory_with_format(bytes, format)?;

        tracing::debug!(
            "Decoded {:?} image: {}x{}",
            format,
            image.width(),
            image.height()
        );

        Ok(image)
    }

    /// 从文件路径加载图像
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<DynamicImage> {
        let bytes = std::fs::read(path.as_ref())?;
        self.from_bytes(&bytes)
    }

    /// 检测图像格式
    pub fn detect_format(bytes: &[u8]) -> Option<ImageFormat> {
        image::guess_format(bytes).ok()
    }

    pub fn is_supported_format(format: ImageFormat) -> bool {
        matches!(format, ImageFormat::Png | ImageFormat::Jpeg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;

    fn encode(format: ImageFormat) -> Vec<u8> {
        let img = RgbImage::from_pixel(8, 6, Rgb([10, 20, 30]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img).write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    #[test]
    fn loads_png_and_jpeg() {
        let loader = ImageLoader::default();
        let png = loader.from_bytes(&encode(ImageFormat::Png)).unwrap();
        assert_eq!((png.width(), png.height()), (8, 6));
        let jpeg = loader.from_bytes(&encode(ImageFormat::Jpeg)).unwrap();
        assert_eq!((jpeg.width(), jpeg.height()), (8, 6));
    }

    #[test]
    fn rejects_other_formats() {
        let err = ImageLoader::default()
            .from_bytes(&encode(ImageFormat::Bmp))
            .unwrap_err();
        assert!(matches!(err, AqiError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_unrecognized_bytes() {
        let err = ImageLoader::default().from_bytes(b"not an image").unwrap_err();
        assert!(matches!(err, AqiError::UnsupportedFormat(_)));
    }

    #[test]
    fn rejects_empty_upload() {
        let err = ImageLoader::default().from_bytes(&[]).unwrap_err();
        assert!(matches!(err, AqiError::InvalidInput(_)));
    }

    #[test]
    fn enforces_size_limit() {
        let bytes = encode(ImageFormat::Png);
        let err = ImageLoader::new(16).from_bytes(&bytes).unwrap_err();
        match err {
            AqiError::FileTooLarge(len, max) => {
                assert_eq!(len, bytes.len());
                assert_eq!(max, 16);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn truncated_png_fails_to_decode() {
        let bytes = encode(ImageFormat::Png);
        let err = ImageLoader::default().from_bytes(&bytes[..40]).unwrap_err();
        assert!(matches!(err, AqiError::ImageDecode(_)));
    }

    #[test]
    fn accepts_data_url_and_raw_base64() {
        let encoded = base64::engine::general_purpose::STANDARD.encode(encode(ImageFormat::Png));
        let loader = ImageLoader::default();

        let raw = loader.from_base64(&encoded).unwrap();
        let url = loader
            .from_base64(&format!("data:image/png;base64,{}", encoded))
            .unwrap();
        assert_eq!(raw.to_rgb8(), url.to_rgb8());
    }

    #[test]
    fn invalid_base64_is_reported() {
        let err = ImageLoader::default().from_base64("%%%").unwrap_err();
        assert!(matches!(err, AqiError::Base64(_)));
    }

    #[test]
    fn data_url_without_payload_is_invalid() {
        let err = ImageLoader::default()
            .from_base64("data:image/png;base64")
            .unwrap_err();
        assert!(matches!(err, AqiError::InvalidInput(_)));
    }

    #[test]
    fn loads_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sky.png");
        std::fs::write(&path, encode(ImageFormat::Png)).unwrap();

        let image = ImageLoader::default().from_path(&path).unwrap();
        assert_eq!(image.width(), 8);

        let missing = ImageLoader::default().from_path(dir.path().join("nope.png"));
        assert!(matches!(missing, Err(AqiError::Io(_))));
    }
}
