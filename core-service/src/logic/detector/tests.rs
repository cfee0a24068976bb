//! Detector-level tests
//!
//! Reference scenarios, invariants, and model fakes.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use super::{AnomalyDetector, PhishingDetector};
use crate::logic::config::ModelConfig;
use crate::logic::explain::engine::{
    EMAIL_HIGH_RISK, EMAIL_MEDIUM_RISK, EMAIL_NO_THREAT, NETWORK_MEDIUM_RISK, NETWORK_NORMAL,
};
use crate::logic::model::{
    ModelError, ModelHandle, ModelState, OutlierScorer, TextClassifier, TextVerdict,
};
use crate::logic::signals::email::{NEGATIVE_SENTIMENT_FLAG, URGENCY_FLAG};
use crate::logic::signals::network::MODEL_OUTLIER_FLAG;
use crate::logic::threat::{AnomalyRules, EmailMessage, NetworkFlow, PhishingRules, RiskTier};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// ============================================================================
// FAKES
// ============================================================================

struct FixedClassifier {
    label: &'static str,
    confidence: f32,
    last_input_chars: Mutex<usize>,
}

impl FixedClassifier {
    fn new(label: &'static str, confidence: f32) -> Self {
        Self {
            label,
            confidence,
            last_input_chars: Mutex::new(0),
        }
    }
}

impl TextClassifier for FixedClassifier {
    fn classify(&self, text: &str) -> Result<TextVerdict, ModelError> {
        *self.last_input_chars.lock() = text.chars().count();
        Ok(TextVerdict {
            label: self.label.to_string(),
            confidence: self.confidence,
        })
    }
}

impl TextClassifier for Arc<FixedClassifier> {
    fn classify(&self, text: &str) -> Result<TextVerdict, ModelError> {
        self.as_ref().classify(text)
    }
}

struct FailingClassifier;

impl TextClassifier for FailingClassifier {
    fn classify(&self, _text: &str) -> Result<TextVerdict, ModelError> {
        Err(ModelError::Inference("runtime exploded".to_string()))
    }
}

struct FixedScorer(f64);

impl OutlierScorer for FixedScorer {
    fn decision_function(&self, _features: &[f64]) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

struct FailingScorer;

impl OutlierScorer for FailingScorer {
    fn decision_function(&self, _features: &[f64]) -> Result<f64, ModelError> {
        Err(ModelError::Inference("bad tensor".to_string()))
    }
}

fn phishing_with(classifier: Box<dyn TextClassifier>) -> PhishingDetector {
    PhishingDetector::with_model(
        PhishingRules::default(),
        ModelHandle::ready("sentiment", classifier),
    )
    .unwrap()
}

fn anomaly_with(scorer: Box<dyn OutlierScorer>) -> AnomalyDetector {
    AnomalyDetector::with_model(AnomalyRules::default(), ModelHandle::ready("outlier", scorer))
}

fn phishing_email() -> EmailMessage {
    EmailMessage {
        sender: "x@free-prize.com".to_string(),
        subject: "URGENT".to_string(),
        body: "account suspended, act now".to_string(),
        urls: vec!["http://a.com/verify-login".to_string()],
    }
}

fn clean_email() -> EmailMessage {
    EmailMessage {
        sender: "a@b.com".to_string(),
        subject: "Hi".to_string(),
        body: "Let's meet for coffee.".to_string(),
        urls: vec![],
    }
}

fn flow(source_port: u16, dest_port: u16, packet_count: u64, protocol: &str) -> NetworkFlow {
    NetworkFlow {
        source_port,
        dest_port,
        packet_count,
        protocol: protocol.to_string(),
    }
}

// ============================================================================
// EMAIL
// ============================================================================

#[test]
fn test_phishing_heuristics_only() {
    init_logging();
    let detector = PhishingDetector::heuristic_only();
    let result = detector.analyze(&phishing_email());

    assert_eq!(result.score, 85.0);
    assert_eq!(result.explanation, EMAIL_HIGH_RISK);
    assert_eq!(result.risk_tier, None);
    assert_eq!(result.flags.len(), 3);
    assert!(result.has_flag("Suspicious URL content: http://a.com/verify-login"));
    assert!(result.has_flag("Suspicious sender domain: x@free-prize.com"));
    assert!(result.has_flag(URGENCY_FLAG));
}

#[test]
fn test_clean_email() {
    let result = PhishingDetector::heuristic_only().analyze(&clean_email());
    assert_eq!(result.score, 0.0);
    assert!(result.flags.is_empty());
    assert_eq!(result.explanation, EMAIL_NO_THREAT);
}

#[test]
fn test_long_url_only() {
    let url = format!("http://{}.com", "a".repeat(95));
    let email = EmailMessage {
        urls: vec![url.clone()],
        ..clean_email()
    };
    let result = PhishingDetector::heuristic_only().analyze(&email);

    assert_eq!(result.score, 10.0);
    assert_eq!(result.explanation, EMAIL_NO_THREAT);
    let preview: String = url.chars().take(50).collect();
    assert!(result.has_flag(&format!("Unusually long URL: {}...", preview)));
}

#[test]
fn test_duplicate_urls_flag_once_but_score_twice() {
    let email = EmailMessage {
        urls: vec![
            "http://x.com/verify".to_string(),
            "http://x.com/verify".to_string(),
        ],
        ..clean_email()
    };
    let result = PhishingDetector::heuristic_only().analyze(&email);
    assert_eq!(result.score, 50.0);
    assert_eq!(result.flags.len(), 1);
    assert_eq!(result.explanation, EMAIL_MEDIUM_RISK);
}

#[test]
fn test_score_is_clamped() {
    let email = EmailMessage {
        urls: (0..10).map(|i| format!("http://bank{}.com/login", i)).collect(),
        ..phishing_email()
    };
    let result = PhishingDetector::heuristic_only().analyze(&email);
    assert_eq!(result.score, 100.0);
    assert_eq!(result.flags.len(), 12);
}

#[test]
fn test_negative_sentiment_adds_weight() {
    let detector = phishing_with(Box::new(FixedClassifier::new("NEGATIVE", 0.95)));

    let result = detector.analyze(&clean_email());
    assert_eq!(result.score, 30.0);
    assert!(result.has_flag(NEGATIVE_SENTIMENT_FLAG));
    assert_eq!(result.explanation, EMAIL_NO_THREAT);

    let result = detector.analyze(&phishing_email());
    assert_eq!(result.score, 100.0);
    assert_eq!(result.flags.len(), 4);
}

#[test]
fn test_positive_or_unsure_sentiment_adds_nothing() {
    let positive = phishing_with(Box::new(FixedClassifier::new("POSITIVE", 0.99)));
    assert_eq!(positive.analyze(&clean_email()).score, 0.0);

    let unsure = phishing_with(Box::new(FixedClassifier::new("NEGATIVE", 0.6)));
    assert_eq!(unsure.analyze(&clean_email()).score, 0.0);
}

#[test]
fn test_model_sees_truncated_body() {
    let classifier = Arc::new(FixedClassifier::new("POSITIVE", 0.5));
    let detector = phishing_with(Box::new(classifier.clone()));

    let email = EmailMessage {
        body: "é".repeat(2000),
        ..clean_email()
    };
    detector.analyze(&email);
    assert_eq!(*classifier.last_input_chars.lock(), 512);
}

#[test]
fn test_failing_classifier_is_ignored() {
    let detector = phishing_with(Box::new(FailingClassifier));
    let result = detector.analyze(&phishing_email());
    assert_eq!(result.score, 85.0);
    assert!(!result.has_flag(NEGATIVE_SENTIMENT_FLAG));
}

#[test]
fn test_missing_sentiment_model_degrades() {
    init_logging();
    let dir = tempfile::tempdir().unwrap();
    let config = ModelConfig {
        model_dir: PathBuf::from(dir.path()),
        enabled: true,
        sentiment_sha256: None,
    };
    let detector = PhishingDetector::new(PhishingRules::default(), &config).unwrap();
    assert_eq!(detector.model_status().state, ModelState::NotStarted);

    let result = detector.analyze(&phishing_email());
    assert_eq!(result.score, 85.0);
    assert_eq!(detector.model_status().state, ModelState::Unavailable);
}

#[test]
fn test_injected_rules() {
    let rules = PhishingRules {
        url_keywords: vec!["invoice".to_string()],
        sender_blocklist: vec!["@evil.test".to_string()],
        ..Default::default()
    };
    let detector = PhishingDetector::with_model(rules, ModelHandle::absent("sentiment")).unwrap();

    let email = EmailMessage {
        sender: "boss@EVIL.test".to_string(),
        urls: vec!["http://pay.example/Invoice".to_string(), "http://a.com/verify".to_string()],
        ..clean_email()
    };
    let result = detector.analyze(&email);
    assert_eq!(result.score, 65.0);
    assert_eq!(result.flags.len(), 2);
}

#[test]
fn test_invalid_pattern_rejected_at_construction() {
    let rules = PhishingRules {
        urgency_pattern: "(".to_string(),
        ..Default::default()
    };
    assert!(PhishingDetector::with_model(rules, ModelHandle::absent("sentiment")).is_err());
}

#[test]
fn test_email_idempotent() {
    let detector = phishing_with(Box::new(FixedClassifier::new("NEGATIVE", 0.9)));
    let first = detector.analyze(&phishing_email());
    let second = detector.analyze(&phishing_email());
    assert_eq!(first, second);
}

// ============================================================================
// NETWORK
// ============================================================================

#[test]
fn test_ssh_fallback_is_medium() {
    let result = AnomalyDetector::heuristic_only().analyze(&flow(443, 22, 150, "TCP"));
    assert_eq!(result.score, 60.0);
    assert_eq!(result.risk_tier, Some(RiskTier::Medium));
    assert_eq!(result.explanation, NETWORK_MEDIUM_RISK);
    assert!(result.has_flag("Remote access traffic on port 22: 150 packets"));
}

#[test]
fn test_volumetric_fallback_is_medium() {
    let result = AnomalyDetector::heuristic_only().analyze(&flow(5353, 8080, 5000, "UDP"));
    assert_eq!(result.score, 75.0);
    assert_eq!(result.risk_tier, Some(RiskTier::Medium));
    assert!(result.has_flag("High packet volume: 5000 packets"));
}

#[test]
fn test_quiet_flow_is_low() {
    let result = AnomalyDetector::heuristic_only().analyze(&flow(50000, 443, 20, "HTTPS"));
    assert_eq!(result.score, 0.0);
    assert_eq!(result.risk_tier, Some(RiskTier::Low));
    assert_eq!(result.explanation, NETWORK_NORMAL);
    assert!(result.flags.is_empty());
}

#[test]
fn test_model_score_high_tier() {
    // d = -0.4 -> (1 - 0.1) * 100 = 90
    let detector = anomaly_with(Box::new(FixedScorer(-0.4)));
    let result = detector.analyze(&flow(443, 3389, 20, "TCP"));

    assert!((result.score - 90.0).abs() < 1e-9);
    assert_eq!(result.risk_tier, Some(RiskTier::High));
    assert!(result.explanation.contains("port 3389"));
    assert!(result.explanation.contains("(20)"));
    assert!(result.has_flag(MODEL_OUTLIER_FLAG));
}

#[test]
fn test_model_nonzero_score_skips_heuristics() {
    // d = 0.1 -> 40, heuristics not consulted even for a volumetric flow
    let detector = anomaly_with(Box::new(FixedScorer(0.1)));
    let result = detector.analyze(&flow(443, 22, 5000, "TCP"));

    assert!((result.score - 40.0).abs() < 1e-9);
    assert_eq!(result.risk_tier, Some(RiskTier::Low));
    assert!(result.flags.is_empty());
}

#[test]
fn test_model_exact_zero_falls_back() {
    // d = 0.5 -> exactly 0
    let detector = anomaly_with(Box::new(FixedScorer(0.5)));
    let result = detector.analyze(&flow(443, 22, 5000, "UDP"));
    assert_eq!(result.score, 75.0);
}

#[test]
fn test_failing_scorer_falls_back() {
    let detector = anomaly_with(Box::new(FailingScorer));
    let result = detector.analyze(&flow(443, 23, 150, "TCP"));
    assert_eq!(result.score, 60.0);
}

#[test]
fn test_panicking_loader_degrades_once() {
    init_logging();
    let loads = Arc::new(Mutex::new(0usize));
    let counter = loads.clone();
    let handle = ModelHandle::new("outlier", move || -> Result<Box<dyn OutlierScorer>, ModelError> {
        *counter.lock() += 1;
        panic!("corrupt model");
    });
    let detector = AnomalyDetector::with_model(AnomalyRules::default(), handle);

    for _ in 0..3 {
        assert_eq!(detector.analyze(&flow(443, 22, 150, "TCP")).score, 60.0);
    }
    assert_eq!(*loads.lock(), 1);
    assert_eq!(detector.model_status().state, ModelState::Unavailable);
}

#[test]
fn test_disabled_model_config() {
    let detector = AnomalyDetector::new(AnomalyRules::default(), &ModelConfig::disabled());
    let result = detector.analyze(&flow(443, 22, 150, "TCP"));
    assert_eq!(result.score, 60.0);
    assert_eq!(detector.model_status().state, ModelState::Unavailable);
}

#[test]
fn test_real_isolation_forest() {
    init_logging();
    let config = ModelConfig {
        enabled: true,
        ..ModelConfig::disabled()
    };
    let detector = AnomalyDetector::new(AnomalyRules::default(), &config);
    assert_eq!(detector.model_status().state, ModelState::NotStarted);

    let input = flow(443, 22, 150, "TCP");
    let first = detector.analyze(&input);
    let second = detector.analyze(&input);

    assert_eq!(detector.model_status().state, ModelState::Ready);
    assert!((0.0..=100.0).contains(&first.score));
    assert!(first.risk_tier.is_some());
    assert_eq!(first, second);
}

#[test]
fn test_concurrent_analyze_is_consistent() {
    let config = ModelConfig {
        enabled: true,
        ..ModelConfig::disabled()
    };
    let detector = Arc::new(AnomalyDetector::new(AnomalyRules::default(), &config));
    let input = flow(1234, 23, 900, "ICMP");

    let threads: Vec<_> = (0..8)
        .map(|_| {
            let d = detector.clone();
            let f = input.clone();
            std::thread::spawn(move || d.analyze(&f))
        })
        .collect();

    let results: Vec<_> = threads.into_iter().map(|t| t.join().unwrap()).collect();
    assert!(results.windows(2).all(|w| w[0] == w[1]));
    assert_eq!(detector.model_status().state, ModelState::Ready);
}

#[test]
fn test_scores_always_bounded() {
    let detectors = [
        AnomalyDetector::heuristic_only(),
        anomaly_with(Box::new(FixedScorer(-3.0))),
        anomaly_with(Box::new(FixedScorer(3.0))),
    ];
    for d in &detectors {
        for packets in [0, 101, 1001, u64::MAX] {
            for port in [0, 22, 23, 65535] {
                let r = d.analyze(&flow(port, port, packets, "tcp"));
                assert!((0.0..=100.0).contains(&r.score));
            }
        }
    }
}
