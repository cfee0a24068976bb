//! Email Signal Extraction
//!
//! Extract phishing signals from URLs, sender and text.

use regex::{Regex, RegexBuilder};

use crate::logic::model::TextVerdict;
use crate::logic::threat::{PhishingRules, SignalContribution};
use crate::constants::NEGATIVE_LABEL;

/// Label of the sentiment model signal
pub const NEGATIVE_SENTIMENT_FLAG: &str = "Negative sentiment/Urgency detected by AI";

/// Label of the urgency heuristic
pub const URGENCY_FLAG: &str = "Urgency/Scarcity language detected";

/// Compiled urgency pattern
#[derive(Debug, Clone)]
pub struct UrgencyMatcher {
    regex: Regex,
}

impl UrgencyMatcher {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()?;
        Ok(Self { regex })
    }

    /// Body and subject are joined without a separator before matching
    pub fn is_match(&self, body: &str, subject: &str) -> bool {
        let text = format!("{}{}", body, subject).to_lowercase();
        self.regex.is_match(&text)
    }
}

/// Keyword and length checks, applied independently to every URL
pub fn url_signals(urls: &[String], rules: &PhishingRules) -> Vec<SignalContribution> {
    let keywords: Vec<String> = rules.url_keywords.iter().map(|k| k.to_lowercase()).collect();
    let mut signals = Vec::new();

    for url in urls {
        let lowered = url.to_lowercase();
        if keywords.iter().any(|k| !k.is_empty() && lowered.contains(k.as_str())) {
            signals.push(SignalContribution::new(
                format!("Suspicious URL content: {}", url),
                rules.suspicious_url_weight,
            ));
        }

        if url.chars().count() > rules.long_url_length {
            let preview: String = url.chars().take(rules.long_url_preview_chars).collect();
            signals.push(SignalContribution::new(
                format!("Unusually long URL: {}...", preview),
                rules.long_url_weight,
            ));
        }
    }

    signals
}

/// Sender address contains a blocklisted domain
pub fn sender_signal(sender: &str, rules: &PhishingRules) -> Option<SignalContribution> {
    let lowered = sender.to_lowercase();
    let blocked = rules
        .sender_blocklist
        .iter()
        .any(|d| !d.is_empty() && lowered.contains(&d.to_lowercase()));

    blocked.then(|| {
        SignalContribution::new(
            format!("Suspicious sender domain: {}", sender),
            rules.blocked_sender_weight,
        )
    })
}

/// Urgency/scarcity wording in body or subject
pub fn urgency_signal(
    body: &str,
    subject: &str,
    matcher: &UrgencyMatcher,
    rules: &PhishingRules,
) -> Option<SignalContribution> {
    matcher
        .is_match(body, subject)
        .then(|| SignalContribution::new(URGENCY_FLAG, rules.urgency_weight))
}

/// Confident NEGATIVE verdict from the sentiment model
pub fn sentiment_signal(verdict: &TextVerdict, rules: &PhishingRules) -> Option<SignalContribution> {
    let negative = verdict.label == NEGATIVE_LABEL
        && verdict.confidence > rules.negative_sentiment_confidence;

    negative.then(|| SignalContribution::new(NEGATIVE_SENTIMENT_FLAG, rules.negative_sentiment_weight))
}

/// First `max_chars` characters of the body (char boundary safe)
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
