//! Face Embedder
//!
//! Runs a bound embedding model over a face crop and wraps the output in a
//! [`RecognitionResult`]. MobileFaceNet produces 192-dimensional vectors.

use std::time::Instant;

use ndarray::Array2;
use tracing::{debug, info};

use crate::embedding::Embedding;
use crate::error::{Error, Result};
use crate::pixels::PixelBuffer;
use crate::types::RecognitionResult;

use super::binding::EngineBinding;
use super::encoder::TensorEncoder;
use super::EmbeddingEngine;

/// Embedding pipeline over one engine handle.
///
/// Owns the reusable input tensor, so every call takes `&mut self`. Use
/// [`SharedEmbedder`](super::SharedEmbedder) to call one instance from
/// several threads.
pub struct FaceEmbedder<E: EmbeddingEngine> {
    engine: E,
    binding: EngineBinding,
    encoder: TensorEncoder,
}

impl<E: EmbeddingEngine> FaceEmbedder<E> {
    /// Bind a loaded engine. Allocates the input tensor and pixel scratch once.
    pub fn new(engine: E, binding: EngineBinding) -> Self {
        let encoder = TensorEncoder::new(binding.input_size(), binding.precision());
        info!(
            "Embedder bound: input {}x{}, {} precision, {} outputs, {} labels",
            binding.input_size(),
            binding.input_size(),
            binding.precision().as_str(),
            binding.output_size(),
            binding.labels().len()
        );

        Self {
            engine,
            binding,
            encoder,
        }
    }

    pub fn binding(&self) -> &EngineBinding {
        &self.binding
    }

    /// Extract embeddings from a face crop.
    ///
    /// Always returns exactly one result; the embedding is attached only
    /// when `keep_embedding` is set.
    pub fn recognize_image(
        &mut self,
        image: &PixelBuffer<'_>,
        keep_embedding: bool,
    ) -> Result<Vec<RecognitionResult>> {
        Ok(vec![self.extract(image, keep_embedding)?])
    }

    /// Single-result form of [`recognize_image`](Self::recognize_image)
    pub fn extract(
        &mut self,
        image: &PixelBuffer<'_>,
        keep_embedding: bool,
    ) -> Result<RecognitionResult> {
        let embedding = self.run(image)?;
        Ok(RecognitionResult::unmatched(keep_embedding.then_some(embedding)))
    }

    /// Run the model and return the embedding directly
    pub fn embed(&mut self, image: &PixelBuffer<'_>) -> Result<Embedding> {
        self.run(image)
    }

    /// Release the engine and buffers
    pub fn close(self) {
        info!("Releasing embedder ({} byte input tensor)", self.encoder.len());
    }

    fn run(&mut self, image: &PixelBuffer<'_>) -> Result<Embedding> {
        let start = Instant::now();
        let input = self.encoder.encode(image)?;
        let encoded = start.elapsed();

        let expected = self.binding.output_size();
        let mut output = Array2::<f32>::zeros((1, expected));
        let slot = output
            .as_slice_mut()
            .ok_or_else(|| Error::Inference(anyhow::anyhow!("output buffer is not contiguous")))?;

        let produced = self.engine.run(input, slot).map_err(Error::Inference)?;
        if produced != expected {
            return Err(Error::OutputShape {
                expected,
                actual: produced,
            });
        }

        debug!(
            "Embedding extracted: encode {:?}, total {:?}",
            encoded,
            start.elapsed()
        );

        Ok(Embedding::new(output.row(0).to_vec()))
    }
}
