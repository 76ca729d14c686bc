//! Error types for the embedding pipeline

use thiserror::Error;

/// Every fault the pipeline can raise. None of them are retried internally.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to load configuration: {0}")]
    Config(String),

    #[error("failed to read label file {path}: {source}")]
    Labels {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to load model: {0:#}")]
    ModelLoad(#[source] anyhow::Error),

    #[error("image is {width}x{height}, engine expects {expected}x{expected}")]
    ShapeMismatch { expected: u32, width: u32, height: u32 },

    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    PixelCount { expected: usize, actual: usize },

    #[error("inference failed: {0:#}")]
    Inference(#[source] anyhow::Error),

    #[error("engine produced {actual} output values, expected {expected}")]
    OutputShape { expected: usize, actual: usize },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("invalid embedding: {0}")]
    EmbeddingFormat(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_message() {
        let err = Error::ShapeMismatch { expected: 112, width: 100, height: 112 };
        assert_eq!(err.to_string(), "image is 100x112, engine expects 112x112");
    }

    #[test]
    fn test_inference_keeps_context_chain() {
        let inner = anyhow::anyhow!("device lost").context("run request");
        let err = Error::Inference(inner);
        assert_eq!(err.to_string(), "inference failed: run request: device lost");
    }
}
