use thiserror::Error;

#[derive(Error, Debug)]
pub enum AqiError {
    #[error("Model loading failed: {0}")]
    ModelLoad(String),

    #[error("Image processing failed: {0}")]
    ImageProcessing(String),

    #[error("Inference failed: {0}")]
    Inference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("File too large: {0} bytes, max allowed: {1} bytes")]
    FileTooLarge(usize, usize),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("Image decode error: {0}")]
    ImageDecode(#[from] image::ImageError),

    #[error("ORT error: {0}")]
    Ort(#[from] ort::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AqiError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AqiError::ModelLoad(_) => "MODEL_LOAD_ERROR",
            AqiError::ImageProcessing(_) => "IMAGE_PROCESSING_ERROR",
            AqiError::Inference(_) => "INFERENCE_ERROR",
            AqiError::InvalidInput(_) => "INVALID_INPUT",
            AqiError::FileTooLarge(_, _) => "FILE_TOO_LARGE",
            AqiError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            AqiError::Config(_) => "CONFIG_ERROR",
            AqiError::Io(_) => "IO_ERROR",
            AqiError::Base64(_) => "BASE64_DECODE_ERROR",
            AqiError::ImageDecode(_) => "IMAGE_DECODE_ERROR",
            AqiError::Ort(_) => "ORT_ERROR",
            AqiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// 是否为上传内容本身的问题（而非模型或运行时）
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AqiError::InvalidInput(_)
                | AqiError::FileTooLarge(_, _)
                | AqiError::UnsupportedFormat(_)
                | AqiError::Base64(_)
                | AqiError::ImageDecode(_)
        )
    }
}
