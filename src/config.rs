//! Embedding pipeline configuration

use serde::Deserialize;
use std::path::PathBuf;

use crate::engine::binding::{DEFAULT_INPUT_SIZE, OUTPUT_SIZE};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// OpenVINO device name, e.g. "CPU" or "GPU"
    pub device: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub path: PathBuf,
    pub labels: PathBuf,
    pub input_size: u32,
    pub quantized: bool,
    pub output_size: usize,
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path, e)))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Config(e.to_string()))
    }

    pub fn default_path() -> &'static str {
        "config.toml"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            inference: InferenceConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            device: "CPU".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("models/mobile_face_net.tflite"),
            labels: PathBuf::from("models/labelmap.txt"),
            input_size: DEFAULT_INPUT_SIZE,
            quantized: false,
            output_size: OUTPUT_SIZE,
        }
    }
}
