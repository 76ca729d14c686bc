//! Face Embedding Library
//!
//! Turns a cropped face image into a fixed-length embedding:
//! pixel buffer -> input tensor -> bound inference engine -> result record.

pub mod assets;
pub mod config;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod pixels;
pub mod types;
pub mod utils;

pub use config::Config;
pub use embedding::Embedding;
pub use engine::{EmbeddingEngine, EngineBinding, FaceEmbedder, Precision, SharedEmbedder, OUTPUT_SIZE};
pub use error::{Error, Result};
pub use pixels::PixelBuffer;
pub use types::{BoundingBox, RecognitionResult};
