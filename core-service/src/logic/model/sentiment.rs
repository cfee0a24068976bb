//! Sentiment Classifier - ONNX Runtime Integration
//!
//! Binary DistilBERT-style classifier exported to ONNX.
//! Model dir layout: `sentiment/model.onnx` + `sentiment/vocab.txt`.
//! Without the `onnx` feature the loader always reports the backend as
//! disabled and the phishing detector runs on heuristics alone.

use super::{ModelError, TextClassifier, TextVerdict};
use crate::logic::config::ModelConfig;

/// Output index -> label
pub const SENTIMENT_LABELS: [&str; 2] = ["NEGATIVE", "POSITIVE"];

/// Load the sentiment classifier described by `config`
pub fn load_sentiment_classifier(config: &ModelConfig) -> Result<Box<dyn TextClassifier>, ModelError> {
    if !config.enabled {
        return Err(ModelError::Disabled);
    }

    let model_path = config.sentiment_model_path();
    let vocab_path = config.sentiment_vocab_path();

    if !model_path.exists() {
        return Err(ModelError::NotFound(model_path.display().to_string()));
    }
    if let Some(expected) = &config.sentiment_sha256 {
        super::checksum::verify_checksum(&model_path, expected)?;
    }

    let tokenizer = super::WordPieceTokenizer::from_vocab_file(&vocab_path)?;
    load_backend(&model_path, tokenizer)
}

#[cfg(feature = "onnx")]
fn load_backend(
    model_path: &std::path::Path,
    tokenizer: super::WordPieceTokenizer,
) -> Result<Box<dyn TextClassifier>, ModelError> {
    Ok(Box::new(onnx::OnnxSentimentClassifier::load(model_path, tokenizer)?))
}

#[cfg(not(feature = "onnx"))]
fn load_backend(
    _model_path: &std::path::Path,
    _tokenizer: super::WordPieceTokenizer,
) -> Result<Box<dyn TextClassifier>, ModelError> {
    Err(ModelError::BackendDisabled("onnx"))
}

/// Numerically stable softmax
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|l| (l - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.iter().map(|e| e / sum).collect()
}

/// Highest-probability label from raw logits
pub fn verdict_from_logits(logits: &[f32]) -> Result<TextVerdict, ModelError> {
    if logits.len() != SENTIMENT_LABELS.len() {
        return Err(ModelError::Inference(format!(
            "expected {} logits, got {}",
            SENTIMENT_LABELS.len(),
            logits.len()
        )));
    }
    if logits.iter().any(|l| !l.is_finite()) {
        return Err(ModelError::Inference("non-finite logits".to_string()));
    }

    let probs = softmax(logits);
    let (idx, confidence) = probs
        .iter()
        .copied()
        .enumerate()
        .fold((0, f32::NEG_INFINITY), |best, (i, p)| if p > best.1 { (i, p) } else { best });

    Ok(TextVerdict {
        label: SENTIMENT_LABELS[idx].to_string(),
        confidence,
    })
}

// ============================================================================
// ONNX IMPLEMENTATION
// ============================================================================

#[cfg(feature = "onnx")]
mod onnx {
    use std::path::Path;

    use ndarray::Array2;
    use ort::session::{builder::GraphOptimizationLevel, Session};
    use ort::value::Value;
    use parking_lot::Mutex;

    use super::{verdict_from_logits, ModelError, TextClassifier, TextVerdict};
    use crate::constants::SENTIMENT_MAX_TOKENS;
    use crate::logic::model::WordPieceTokenizer;

    pub struct OnnxSentimentClassifier {
        // ort needs &mut Session to run
        session: Mutex<Session>,
        output_name: String,
        tokenizer: WordPieceTokenizer,
    }

    impl OnnxSentimentClassifier {
        pub fn load(model_path: &Path, tokenizer: WordPieceTokenizer) -> Result<Self, ModelError> {
            log::info!("Loading sentiment model from: {}", model_path.display());

            let session = Session::builder()
                .map_err(|e| ModelError::Load(format!("Failed to create session builder: {}", e)))?
                .with_optimization_level(GraphOptimizationLevel::Level3)
                .map_err(|e| ModelError::Load(format!("Failed to set optimization: {}", e)))?
                .commit_from_file(model_path)
                .map_err(|e| ModelError::Load(format!("Failed to load model: {}", e)))?;

            let output_name = session
                .outputs
                .first()
                .map(|o| o.name.clone())
                .ok_or_else(|| ModelError::Load("No output defined".to_string()))?;

            Ok(Self {
                session: Mutex::new(session),
                output_name,
                tokenizer,
            })
        }
    }

    impl TextClassifier for OnnxSentimentClassifier {
        fn classify(&self, text: &str) -> Result<TextVerdict, ModelError> {
            let ids = self.tokenizer.encode(text, SENTIMENT_MAX_TOKENS);
            let len = ids.len();

            let input_ids = Array2::<i64>::from_shape_vec((1, len), ids)
                .map_err(|e| ModelError::Inference(format!("Array error: {}", e)))?;
            let attention_mask = Array2::<i64>::from_elem((1, len), 1);

            let input_ids = Value::from_array(input_ids)
                .map_err(|e| ModelError::Inference(format!("Tensor error: {}", e)))?;
            let attention_mask = Value::from_array(attention_mask)
                .map_err(|e| ModelError::Inference(format!("Tensor error: {}", e)))?;

            let mut session = self.session.lock();
            let outputs = session
                .run(ort::inputs![
                    "input_ids" => input_ids,
                    "attention_mask" => attention_mask,
                ])
                .map_err(|e| ModelError::Inference(format!("Inference failed: {}", e)))?;

            let output = outputs
                .get(&self.output_name)
                .ok_or_else(|| ModelError::Inference("No output".to_string()))?;

            let (_, logits) = output
                .try_extract_tensor::<f32>()
                .map_err(|e| ModelError::Inference(format!("Extract error: {}", e)))?;

            verdict_from_logits(logits)
        }
    }
}
