//! Network Anomaly Detector
//!
//! Isolation forest score when the model is live, fixed heuristics
//! otherwise. A model score of exactly 0 also falls back to heuristics.

use crate::logic::config::ModelConfig;
use crate::logic::explain::explain_network;
use crate::logic::model::{IsolationForest, ModelError, ModelHandle, ModelStatus, OutlierScorer};
use crate::logic::signals::network::{self, MODEL_OUTLIER_FLAG};
use crate::logic::threat::{clamp_score, AnalysisResult, AnomalyRules, NetworkFlow, SignalContribution};

pub type OutlierHandle = ModelHandle<Box<dyn OutlierScorer>>;

pub struct AnomalyDetector {
    rules: AnomalyRules,
    model: OutlierHandle,
}

impl AnomalyDetector {
    /// Detector whose isolation forest is fitted on first use
    pub fn new(rules: AnomalyRules, model_config: &ModelConfig) -> Self {
        let enabled = model_config.enabled;
        let handle = ModelHandle::new("outlier", move || {
            if !enabled {
                return Err(ModelError::Disabled);
            }
            let forest = IsolationForest::pretrained_default()?;
            Ok(Box::new(forest) as Box<dyn OutlierScorer>)
        });
        Self::with_model(rules, handle)
    }

    /// Detector with a caller-supplied model handle
    pub fn with_model(rules: AnomalyRules, model: OutlierHandle) -> Self {
        Self { rules, model }
    }

    /// Default rules, no model
    pub fn heuristic_only() -> Self {
        Self::with_model(AnomalyRules::default(), ModelHandle::absent("outlier"))
    }

    pub fn analyze(&self, flow: &NetworkFlow) -> AnalysisResult {
        let mut signals: Vec<SignalContribution> = Vec::new();
        let mut score = self.model_score(flow).unwrap_or(0.0);

        if score == 0.0 {
            if let Some(signal) = network::heuristic_signal(flow, &self.rules) {
                score = clamp_score(signal.weight);
                signals.push(signal);
            }
        } else if score > self.rules.medium_tier_above {
            signals.push(SignalContribution::new(MODEL_OUTLIER_FLAG, score));
        }

        let (tier, explanation) = explain_network(score, flow, &self.rules);

        log::debug!(
            "Flow {} -> {} ({} packets, {}) scored {:.1} [{}]",
            flow.source_port,
            flow.dest_port,
            flow.packet_count,
            flow.protocol,
            score,
            tier
        );

        AnalysisResult {
            score,
            flags: signals.into_iter().map(|s| s.label).collect(),
            explanation,
            risk_tier: Some(tier),
        }
    }

    /// Model anomaly score in [0, 100]; `None` if unavailable or failed
    fn model_score(&self, flow: &NetworkFlow) -> Option<f64> {
        let model = self.model.get()?;
        match model.decision_function(&network::feature_vector(flow)) {
            Ok(decision) => Some(network::decision_to_score(decision)),
            Err(e) => {
                log::debug!("Outlier scoring failed ({}), using heuristics", e);
                None
            }
        }
    }

    pub fn rules(&self) -> &AnomalyRules {
        &self.rules
    }

    pub fn model_status(&self) -> ModelStatus {
        self.model.status()
    }
}

impl Default for AnomalyDetector {
    fn default() -> Self {
        Self::heuristic_only()
    }
}
