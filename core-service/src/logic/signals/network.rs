//! Network Signal Extraction
//!
//! Protocol encoding, model feature vector and fallback heuristics.

use crate::constants::FLOW_FEATURE_COUNT;
use crate::logic::threat::{clamp_score, AnomalyRules, NetworkFlow, SignalContribution};

/// Label added when the outlier model alone pushes a flow past the medium tier
pub const MODEL_OUTLIER_FLAG: &str = "Traffic flagged as statistical outlier by AI";

/// Fixed protocol lookup, unknown -> 0
pub fn protocol_code(protocol: &str) -> u8 {
    match protocol.to_ascii_uppercase().as_str() {
        "TCP" => 1,
        "UDP" => 2,
        "ICMP" => 3,
        "HTTP" => 4,
        "HTTPS" => 5,
        _ => 0,
    }
}

/// [source_port, dest_port, packet_count, protocol_code]
pub fn feature_vector(flow: &NetworkFlow) -> [f64; FLOW_FEATURE_COUNT] {
    [
        flow.source_port as f64,
        flow.dest_port as f64,
        flow.packet_count as f64,
        protocol_code(&flow.protocol) as f64,
    ]
}

/// Map an outlier decision value (~[-0.5, 0.5], higher = more normal)
/// onto a 0-100 anomaly score.
pub fn decision_to_score(decision: f64) -> f64 {
    clamp_score((1.0 - (decision + 0.5)) * 100.0)
}

/// Fallback heuristics. First matching rule wins.
pub fn heuristic_signal(flow: &NetworkFlow, rules: &AnomalyRules) -> Option<SignalContribution> {
    if flow.packet_count > rules.volumetric_packet_threshold {
        return Some(SignalContribution::new(
            format!("High packet volume: {} packets", flow.packet_count),
            rules.volumetric_score,
        ));
    }

    if rules.remote_access_ports.contains(&flow.dest_port)
        && flow.packet_count > rules.remote_access_packet_threshold
    {
        return Some(SignalContribution::new(
            format!(
                "Remote access traffic on port {}: {} packets",
                flow.dest_port, flow.packet_count
            ),
            rules.remote_access_score,
        ));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flow(dest_port: u16, packet_count: u64) -> NetworkFlow {
        NetworkFlow {
            source_port: 443,
            dest_port,
            packet_count,
            protocol: "TCP".to_string(),
        }
    }

    #[test]
    fn test_protocol_code() {
        assert_eq!(protocol_code("tcp"), 1);
        assert_eq!(protocol_code("UDP"), 2);
        assert_eq!(protocol_code("Icmp"), 3);
        assert_eq!(protocol_code("http"), 4);
        assert_eq!(protocol_code("HTTPS"), 5);
        assert_eq!(protocol_code("QUIC"), 0);
        assert_eq!(protocol_code(""), 0);
    }

    #[test]
    fn test_feature_vector_layout() {
        let f = feature_vector(&flow(22, 150));
        assert_eq!(f, [443.0, 22.0, 150.0, 1.0]);
    }

    #[test]
    fn test_decision_mapping() {
        assert_eq!(decision_to_score(0.5), 0.0);
        assert_eq!(decision_to_score(-0.5), 100.0);
        assert!((decision_to_score(0.0) - 50.0).abs() < 1e-9);
        // out of nominal range is clamped
        assert_eq!(decision_to_score(-2.0), 100.0);
        assert_eq!(decision_to_score(2.0), 0.0);
    }

    #[test]
    fn test_volumetric_wins_over_remote_access() {
        let rules = AnomalyRules::default();
        let s = heuristic_signal(&flow(22, 5000), &rules).unwrap();
        assert_eq!(s.weight, 75.0);
    }

    #[test]
    fn test_remote_access_ports() {
        let rules = AnomalyRules::default();
        assert_eq!(heuristic_signal(&flow(22, 150), &rules).unwrap().weight, 60.0);
        assert_eq!(heuristic_signal(&flow(23, 101), &rules).unwrap().weight, 60.0);
        assert!(heuristic_signal(&flow(23, 100), &rules).is_none());
        assert!(heuristic_signal(&flow(80, 500), &rules).is_none());
    }

    #[test]
    fn test_thresholds_are_exclusive() {
        let rules = AnomalyRules::default();
        assert!(heuristic_signal(&flow(80, 1000), &rules).is_none());
        assert!(heuristic_signal(&flow(80, 1001), &rules).is_some());
    }
}
