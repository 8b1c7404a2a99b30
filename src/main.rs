use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use onnx_aqi::{config::Config, AqiPipeline, AqiResult, ModelManager};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "onnx-aqi")]
#[command(about = "Classify air quality from sky images with an ONNX model")]
struct Args {
    /// Images to classify (JPEG or PNG)
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Model directory path
    #[arg(long, default_value = "models")]
    models_dir: PathBuf,

    /// Model file name inside the model directory
    #[arg(long)]
    model: Option<String>,

    /// Number of inference threads
    #[arg(long)]
    threads: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志系统
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting air quality classifier...");
    tracing::info!("Models directory: {}", args.models_dir.display());

    let config = Config::new(&args.models_dir, args.model, args.threads)?;

    // 模型加载失败直接退出
    ModelManager::init(config).context("failed to load air quality model")?;
    let pipeline = AqiPipeline::from_manager()?;

    for path in &args.images {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read {}", path.display()))?;

        let result = pipeline
            .process_bytes(&bytes)
            .with_context(|| format!("failed to classify {}", path.display()))?;

        render(path, &result, args.format)?;
    }

    Ok(())
}

fn render(path: &Path, result: &AqiResult, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            println!("{}", path.display());
            println!("{}", result.to_text());
        }
        OutputFormat::Json => {
            let value = serde_json::json!({
                "image": path.display().to_string(),
                "result": result,
            });
            println!("{}", serde_json::to_string(&value)?);
        }
    }
    Ok(())
}
