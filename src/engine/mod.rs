//! Inference engine module
//!
//! Provides the embedding pipeline:
//! - Fixed-layout tensor encoding
//! - Single-input, single-output synchronous inference
//! - Mutex-guarded sharing across threads

pub mod binding;
pub mod encoder;
pub mod embedder;
pub mod shared;
#[cfg(feature = "openvino")]
pub mod openvino;

pub use binding::{EngineBinding, Precision, OUTPUT_SIZE};
pub use embedder::FaceEmbedder;
pub use encoder::TensorEncoder;
pub use shared::SharedEmbedder;
#[cfg(feature = "openvino")]
pub use self::openvino::OpenVinoEngine;

/// A loaded model able to run one forward pass per call.
///
/// Implementations bind exactly one input and one output tensor. `input`
/// is the encoded NHWC tensor and `output` has room for exactly the bound
/// embedding length. Returns the number of values the model produced.
pub trait EmbeddingEngine: Send {
    fn run(&mut self, input: &[u8], output: &mut [f32]) -> anyhow::Result<usize>;
}

impl<E: EmbeddingEngine + ?Sized> EmbeddingEngine for Box<E> {
    fn run(&mut self, input: &[u8], output: &mut [f32]) -> anyhow::Result<usize> {
        (**self).run(input, output)
    }
}
