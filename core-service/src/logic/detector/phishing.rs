//! Email Phishing Detector
//!
//! URL, sender and urgency heuristics plus an optional sentiment model.
//! All signals are evaluated and their weights summed.

use once_cell::sync::Lazy;

use crate::constants::SENTIMENT_MAX_CHARS;
use crate::logic::config::{ConfigError, ModelConfig};
use crate::logic::explain::explain_email;
use crate::logic::model::{load_sentiment_classifier, ModelHandle, ModelStatus, TextClassifier};
use crate::logic::signals::email::{self, truncate_chars};
use crate::logic::signals::UrgencyMatcher;
use crate::logic::threat::rules::DEFAULT_URGENCY_PATTERN;
use crate::logic::threat::{aggregate, AnalysisResult, EmailMessage, PhishingRules, SignalContribution};

static DEFAULT_URGENCY: Lazy<UrgencyMatcher> = Lazy::new(|| {
    UrgencyMatcher::new(DEFAULT_URGENCY_PATTERN).expect("default urgency pattern is valid")
});

pub type SentimentHandle = ModelHandle<Box<dyn TextClassifier>>;

pub struct PhishingDetector {
    rules: PhishingRules,
    urgency: UrgencyMatcher,
    model: SentimentHandle,
}

impl PhishingDetector {
    /// Detector whose sentiment model is loaded from `model_config` on first use
    pub fn new(rules: PhishingRules, model_config: &ModelConfig) -> Result<Self, ConfigError> {
        let config = model_config.clone();
        let handle = ModelHandle::new("sentiment", move || load_sentiment_classifier(&config));
        Self::with_model(rules, handle)
    }

    /// Detector with a caller-supplied model handle
    pub fn with_model(rules: PhishingRules, model: SentimentHandle) -> Result<Self, ConfigError> {
        let urgency = UrgencyMatcher::new(&rules.urgency_pattern)?;
        Ok(Self { rules, urgency, model })
    }

    /// Default rules, no model
    pub fn heuristic_only() -> Self {
        Self {
            rules: PhishingRules::default(),
            urgency: DEFAULT_URGENCY.clone(),
            model: ModelHandle::absent("sentiment"),
        }
    }

    pub fn analyze(&self, email: &EmailMessage) -> AnalysisResult {
        let mut signals = email::url_signals(&email.urls, &self.rules);
        signals.extend(email::sender_signal(&email.sender, &self.rules));
        signals.extend(self.model_signal(&email.body));
        signals.extend(email::urgency_signal(&email.body, &email.subject, &self.urgency, &self.rules));

        let agg = aggregate(&signals);
        let explanation = explain_email(agg.score, &self.rules).to_string();

        log::debug!(
            "Email from {} scored {:.1} ({} signals, {} flags)",
            email.sender,
            agg.score,
            signals.len(),
            agg.flags.len()
        );

        AnalysisResult {
            score: agg.score,
            flags: agg.flags,
            explanation,
            risk_tier: None,
        }
    }

    /// Sentiment signal; an unavailable or failing model contributes nothing
    fn model_signal(&self, body: &str) -> Option<SignalContribution> {
        let model = self.model.get()?;
        match model.classify(truncate_chars(body, SENTIMENT_MAX_CHARS)) {
            Ok(verdict) => email::sentiment_signal(&verdict, &self.rules),
            Err(e) => {
                log::debug!("Sentiment inference failed ({}), skipping model signal", e);
                None
            }
        }
    }

    pub fn rules(&self) -> &PhishingRules {
        &self.rules
    }

    pub fn model_status(&self) -> ModelStatus {
        self.model.status()
    }
}

impl Default for PhishingDetector {
    fn default() -> Self {
        Self::heuristic_only()
    }
}
