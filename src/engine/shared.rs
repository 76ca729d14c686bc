//! Thread-safe handle over a single embedding pipeline
//!
//! Encode and infer run as one critical section under a `parking_lot`
//! mutex, so the reused input tensor is never written by two callers at once.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::embedding::Embedding;
use crate::error::Result;
use crate::pixels::PixelBuffer;
use crate::types::RecognitionResult;

use super::binding::EngineBinding;
use super::embedder::FaceEmbedder;
use super::EmbeddingEngine;

/// Cloneable, mutex-guarded [`FaceEmbedder`]
pub struct SharedEmbedder<E: EmbeddingEngine> {
    inner: Arc<Mutex<FaceEmbedder<E>>>,
    binding: EngineBinding,
}

impl<E: EmbeddingEngine> Clone for SharedEmbedder<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            binding: self.binding.clone(),
        }
    }
}

impl<E: EmbeddingEngine> SharedEmbedder<E> {
    pub fn new(embedder: FaceEmbedder<E>) -> Self {
        let binding = embedder.binding().clone();
        Self {
            inner: Arc::new(Mutex::new(embedder)),
            binding,
        }
    }

    pub fn binding(&self) -> &EngineBinding {
        &self.binding
    }

    pub fn recognize_image(
        &self,
        image: &PixelBuffer<'_>,
        keep_embedding: bool,
    ) -> Result<Vec<RecognitionResult>> {
        self.inner.lock().recognize_image(image, keep_embedding)
    }

    pub fn extract(&self, image: &PixelBuffer<'_>, keep_embedding: bool) -> Result<RecognitionResult> {
        self.inner.lock().extract(image, keep_embedding)
    }

    pub fn embed(&self, image: &PixelBuffer<'_>) -> Result<Embedding> {
        self.inner.lock().embed(image)
    }

    /// Take the pipeline back if this is the last handle
    pub fn try_into_inner(self) -> std::result::Result<FaceEmbedder<E>, Self> {
        let binding = self.binding;
        Arc::try_unwrap(self.inner)
            .map(Mutex::into_inner)
            .map_err(|inner| Self { inner, binding })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::binding::Precision;
    use std::thread;

    /// Echoes the first encoded byte into every output slot
    struct EchoEngine;

    impl EmbeddingEngine for EchoEngine {
        fn run(&mut self, input: &[u8], output: &mut [f32]) -> anyhow::Result<usize> {
            output.fill(input[0] as f32);
            Ok(output.len())
        }
    }

    fn shared() -> SharedEmbedder<EchoEngine> {
        let binding = EngineBinding::new(4, Precision::Quantized, Vec::new());
        SharedEmbedder::new(FaceEmbedder::new(EchoEngine, binding))
    }

    #[test]
    fn test_concurrent_calls_see_their_own_input() {
        let embedder = shared();

        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let embedder = embedder.clone();
                thread::spawn(move || {
                    let red = i * 10;
                    let image = PixelBuffer::filled(4, 4, red << 16);
                    for _ in 0..20 {
                        let embedding = embedder.embed(&image).unwrap();
                        assert!(embedding.as_slice().iter().all(|&v| v == red as f32));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }
    }

    #[test]
    fn test_try_into_inner() {
        let embedder = shared();
        let other = embedder.clone();

        let embedder = match embedder.try_into_inner() {
            Ok(_) => panic!("pipeline released while another handle is alive"),
            Err(embedder) => embedder,
        };
        drop(other);

        let inner = embedder.try_into_inner().ok().unwrap();
        assert_eq!(inner.binding().input_size(), 4);
    }

    #[test]
    fn test_recognize_through_handle() {
        let embedder = shared();
        let results = embedder
            .recognize_image(&PixelBuffer::filled(4, 4, 0x050000), true)
            .unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].embedding().unwrap().as_slice()[0], 5.0);
        assert!(embedder.extract(&PixelBuffer::filled(4, 4, 0), false).unwrap().embedding().is_none());
    }
}
