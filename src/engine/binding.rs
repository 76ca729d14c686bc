//! Immutable engine binding: tensor geometry, precision and label vocabulary

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::assets::load_labels;
use crate::config::ModelConfig;
use crate::error::Result;

/// Length of the embedding produced by MobileFaceNet
pub const OUTPUT_SIZE: usize = 192;

/// Input side length of MobileFaceNet
pub const DEFAULT_INPUT_SIZE: u32 = 112;

/// Per-channel mean subtracted in floating-point mode
pub const IMAGE_MEAN: f32 = 128.0;

/// Per-channel divisor applied in floating-point mode
pub const IMAGE_STD: f32 = 128.0;

/// How the input tensor stores each channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// One raw byte per channel
    Quantized,
    /// One normalized native-endian `f32` per channel
    Float,
}

impl Precision {
    pub fn from_quantized(is_quantized: bool) -> Self {
        if is_quantized {
            Precision::Quantized
        } else {
            Precision::Float
        }
    }

    pub fn bytes_per_channel(&self) -> usize {
        match self {
            Precision::Quantized => 1,
            Precision::Float => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Precision::Quantized => "quantized",
            Precision::Float => "float",
        }
    }
}

/// Configuration fixed when a model is bound. Never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineBinding {
    input_size: u32,
    precision: Precision,
    output_size: usize,
    labels: Vec<String>,
}

impl EngineBinding {
    pub fn new(input_size: u32, precision: Precision, labels: Vec<String>) -> Self {
        Self {
            input_size,
            precision,
            output_size: OUTPUT_SIZE,
            labels,
        }
    }

    /// Override the embedding length for models other than MobileFaceNet
    pub fn with_output_size(mut self, output_size: usize) -> Self {
        self.output_size = output_size;
        self
    }

    /// Read the label vocabulary and build the binding described by `config`
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let labels = load_labels(&config.labels)?;
        info!(
            "Loaded {} labels from {}",
            labels.len(),
            config.labels.display()
        );

        Ok(Self::new(
            config.input_size,
            Precision::from_quantized(config.quantized),
            labels,
        )
        .with_output_size(config.output_size))
    }

    pub fn input_size(&self) -> u32 {
        self.input_size
    }

    pub fn precision(&self) -> Precision {
        self.precision
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of pixels the encoder reads per call
    pub fn pixel_count(&self) -> usize {
        self.input_size as usize * self.input_size as usize
    }

    /// Exact byte length of the input tensor
    pub fn input_len(&self) -> usize {
        self.pixel_count() * 3 * self.precision.bytes_per_channel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_len_per_precision() {
        let float = EngineBinding::new(160, Precision::Float, Vec::new());
        assert_eq!(float.input_len(), 160 * 160 * 3 * 4);

        let quant = EngineBinding::new(160, Precision::Quantized, Vec::new());
        assert_eq!(quant.input_len(), 160 * 160 * 3);
    }

    #[test]
    fn test_default_output_size() {
        let binding = EngineBinding::new(112, Precision::Float, vec!["a".into()]);
        assert_eq!(binding.output_size(), OUTPUT_SIZE);
        assert_eq!(binding.with_output_size(512).output_size(), 512);
    }

    #[test]
    fn test_precision_from_flag() {
        assert_eq!(Precision::from_quantized(true), Precision::Quantized);
        assert_eq!(Precision::from_quantized(false), Precision::Float);
        assert_eq!(Precision::Float.as_str(), "float");
    }
}
