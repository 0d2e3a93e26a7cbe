//! Marian seq2seq translation model (candle)
//!
//! A model directory holds `config.json`, `model.safetensors`, and the
//! source/target tokenizers converted to `tokenizers` JSON format
//! (`tokenizer-source.json`, `tokenizer-target.json`). Decoding is greedy.

use std::fs;
use std::path::Path;

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::marian::{Config, MTModel};
use parking_lot::Mutex;
use tokenizers::Tokenizer;
use tracing::info;

use super::TranslationModel;
use crate::error::TranslationError;

/// Upper bound on generated tokens per call
const MAX_OUTPUT_TOKENS: usize = 256;

pub struct MarianModel {
    model: Mutex<MTModel>,
    config: Config,
    source_tokenizer: Tokenizer,
    target_tokenizer: Tokenizer,
    device: Device,
}

fn unavailable(e: impl std::fmt::Display) -> TranslationError {
    TranslationError::Unavailable(e.to_string())
}

fn failed(e: impl std::fmt::Display) -> TranslationError {
    TranslationError::Failed(e.to_string())
}

impl MarianModel {
    /// Load a model directory onto the CPU
    pub fn load(dir: &Path) -> Result<Self, TranslationError> {
        let device = Device::Cpu;

        let config_json = fs::read_to_string(dir.join("config.json")).map_err(unavailable)?;
        let config: Config = serde_json::from_str(&config_json).map_err(unavailable)?;

        let source_tokenizer =
            Tokenizer::from_file(dir.join("tokenizer-source.json")).map_err(unavailable)?;
        let target_tokenizer =
            Tokenizer::from_file(dir.join("tokenizer-target.json")).map_err(unavailable)?;

        let weights = fs::read(dir.join("model.safetensors")).map_err(unavailable)?;
        let vb = VarBuilder::from_buffered_safetensors(weights, DType::F32, &device)
            .map_err(unavailable)?;
        let model = MTModel::new(&config, vb).map_err(unavailable)?;

        info!(dir = %dir.display(), "translation model loaded");

        Ok(Self {
            model: Mutex::new(model),
            config,
            source_tokenizer,
            target_tokenizer,
            device,
        })
    }

    fn generate(&self, source_ids: &[u32]) -> candle_core::Result<Vec<u32>> {
        let mut model = self.model.lock();
        model.reset_kv_cache();

        let input = Tensor::new(source_ids, &self.device)?.unsqueeze(0)?;
        let encoder_xs = model.encoder().forward(&input, 0)?;

        let mut tokens = vec![self.config.decoder_start_token_id];
        for step in 0..MAX_OUTPUT_TOKENS {
            // After the first step the KV cache holds the prefix
            let context = if step == 0 { tokens.len() } else { 1 };
            let start = tokens.len() - context;
            let input = Tensor::new(&tokens[start..], &self.device)?.unsqueeze(0)?;
            let logits = model.decode(&input, &encoder_xs, start)?;
            let logits = logits.squeeze(0)?;
            let logits = logits.get(logits.dim(0)? - 1)?;
            let next = logits.argmax(0)?.to_scalar::<u32>()?;

            if next == self.config.eos_token_id || next == self.config.forced_eos_token_id {
                break;
            }
            tokens.push(next);
        }

        Ok(tokens.split_off(1))
    }
}

impl TranslationModel for MarianModel {
    fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let encoding = self.source_tokenizer.encode(text, true).map_err(failed)?;
        let mut source_ids = encoding.get_ids().to_vec();
        source_ids.push(self.config.eos_token_id);

        let output_ids = self.generate(&source_ids).map_err(failed)?;
        self.target_tokenizer
            .decode(&output_ids, true)
            .map_err(failed)
    }
}
