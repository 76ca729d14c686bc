//! OpenVINO-backed embedding engine
//!
//! OpenVINO reads `.tflite`, `.onnx` and IR models directly, so the stock
//! MobileFaceNet file can be bound without conversion.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use openvino::{CompiledModel, Core, ElementType, InferRequest, Shape, Tensor};
use tracing::info;

use crate::config::Config;
use crate::error::{Error, Result};

use super::binding::{EngineBinding, Precision};
use super::embedder::FaceEmbedder;
use super::EmbeddingEngine;

/// Compiled model plus one reusable inference request
pub struct OpenVinoEngine {
    request: InferRequest,
    input: Tensor,
    _compiled: CompiledModel,
    _core: Core,
}

// SAFETY: the engine is only reachable through `&mut self`, so the OpenVINO
// handles are never touched from two threads at once.
unsafe impl Send for OpenVinoEngine {}

impl OpenVinoEngine {
    /// Read and compile `model_path` for `device`.
    ///
    /// The input tensor is shaped `[1, size, size, 3]` with `U8` or `F32`
    /// elements according to the binding's precision.
    pub fn load(model_path: &Path, device: &str, binding: &EngineBinding) -> Result<Self> {
        Self::try_load(model_path, device, binding).map_err(Error::ModelLoad)
    }

    fn try_load(model_path: &Path, device: &str, binding: &EngineBinding) -> anyhow::Result<Self> {
        let path = model_path
            .to_str()
            .with_context(|| format!("model path is not UTF-8: {}", model_path.display()))?;

        info!("Loading embedding model from {} on {}", path, device);
        let start = Instant::now();

        let mut core = Core::new().context("failed to initialize OpenVINO")?;
        let model = core
            .read_model_from_file(path, "")
            .with_context(|| format!("failed to read {}", path))?;
        let mut compiled = core
            .compile_model(&model, device.into())
            .with_context(|| format!("failed to compile model for {}", device))?;
        let request = compiled.create_infer_request()?;

        let size = binding.input_size() as i64;
        let shape = Shape::new(&[1, size, size, 3])?;
        let element_type = match binding.precision() {
            Precision::Quantized => ElementType::U8,
            Precision::Float => ElementType::F32,
        };
        let input = Tensor::new(element_type, &shape)?;

        info!("Embedding model loaded in {:?}", start.elapsed());

        Ok(Self {
            request,
            input,
            _compiled: compiled,
            _core: core,
        })
    }
}

impl EmbeddingEngine for OpenVinoEngine {
    fn run(&mut self, input: &[u8], output: &mut [f32]) -> anyhow::Result<usize> {
        let input_data = self.input.get_raw_data_mut()?;
        anyhow::ensure!(
            input_data.len() == input.len(),
            "input tensor holds {} bytes, got {}",
            input_data.len(),
            input.len()
        );
        input_data.copy_from_slice(input);

        self.request.set_input_tensor(&self.input)?;
        self.request.infer()?;

        let result = self.request.get_output_tensor()?;
        let raw = result.get_raw_data()?;
        let produced = raw.len() / std::mem::size_of::<f32>();

        for (slot, chunk) in output.iter_mut().zip(raw.chunks_exact(4)) {
            *slot = f32::from_ne_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }

        Ok(produced)
    }
}

impl FaceEmbedder<OpenVinoEngine> {
    /// Build the full pipeline from configuration: labels, model and buffers
    pub fn from_config(config: &Config) -> Result<Self> {
        let binding = EngineBinding::from_config(&config.model)?;
        let engine = OpenVinoEngine::load(&config.model.path, &config.inference.device, &binding)?;
        Ok(FaceEmbedder::new(engine, binding))
    }
}
