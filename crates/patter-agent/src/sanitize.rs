// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Field sanitization: clamps, validates, and defaults every segmented
//! message regardless of which backend produced it.

use std::str::FromStr;

use patter_core::Phase;

use crate::segment::SegmentedMessage;

/// Delay applied when a backend omits the delay or sends a non-finite value.
pub const DEFAULT_DELAY_SECONDS: i64 = 10;
/// Lower pacing bound.
pub const MIN_DELAY_SECONDS: i64 = 5;
/// Upper pacing bound.
pub const MAX_DELAY_SECONDS: i64 = 60;
/// Confidence applied when a backend omits the score or sends a non-finite
/// value.
pub const DEFAULT_CONFIDENCE: f64 = 0.5;

/// A message whose fields all satisfy the domain constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizedMessage {
    pub text: String,
    pub phase: Option<Phase>,
    pub delay_seconds: i64,
    pub approval_required: bool,
    pub confidence_score: f64,
}

/// Sanitizes a batch in order. Entries whose text is empty after trimming
/// are dropped -- only reachable on the free-text path, since the structured
/// schema's minimum text length keeps empties out there.
pub fn sanitize_batch(segments: Vec<SegmentedMessage>) -> Vec<SanitizedMessage> {
    segments
        .into_iter()
        .filter_map(|segment| {
            let text = segment.text.trim().to_string();
            if text.is_empty() {
                return None;
            }
            Some(SanitizedMessage {
                text,
                phase: parse_phase(segment.phase.as_deref()),
                delay_seconds: clamp_delay(segment.delay_seconds),
                approval_required: segment.approval_required.unwrap_or(false),
                confidence_score: sanitize_confidence(segment.confidence_score),
            })
        })
        .collect()
}

/// Rounds to the nearest whole second and clamps into [5, 60]; absent or
/// non-finite values default to 10.
pub fn clamp_delay(raw: Option<f64>) -> i64 {
    match raw {
        Some(delay) if delay.is_finite() => {
            (delay.round() as i64).clamp(MIN_DELAY_SECONDS, MAX_DELAY_SECONDS)
        }
        _ => DEFAULT_DELAY_SECONDS,
    }
}

/// Rounds to two decimals and clamps into [0, 1]; absent or non-finite
/// values default to 0.5.
pub fn sanitize_confidence(raw: Option<f64>) -> f64 {
    match raw {
        Some(score) if score.is_finite() => ((score * 100.0).round() / 100.0).clamp(0.0, 1.0),
        _ => DEFAULT_CONFIDENCE,
    }
}

/// Passes a phase through only when it names one of the fixed stages;
/// anything else reads as unspecified.
fn parse_phase(raw: Option<&str>) -> Option<Phase> {
    raw.and_then(|value| Phase::from_str(value).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_segment(text: &str) -> SegmentedMessage {
        SegmentedMessage {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn delay_rounds_and_clamps() {
        assert_eq!(clamp_delay(Some(7.4)), 7);
        assert_eq!(clamp_delay(Some(7.5)), 8);
        assert_eq!(clamp_delay(Some(2.0)), 5);
        assert_eq!(clamp_delay(Some(4.99)), 5);
        assert_eq!(clamp_delay(Some(60.0)), 60);
        assert_eq!(clamp_delay(Some(300.0)), 60);
        assert_eq!(clamp_delay(Some(-12.0)), 5);
    }

    #[test]
    fn non_finite_or_missing_delay_defaults_to_ten() {
        assert_eq!(clamp_delay(None), 10);
        assert_eq!(clamp_delay(Some(f64::NAN)), 10);
        assert_eq!(clamp_delay(Some(f64::INFINITY)), 10);
        assert_eq!(clamp_delay(Some(f64::NEG_INFINITY)), 10);
    }

    #[test]
    fn confidence_rounds_to_two_decimals_and_clamps() {
        assert_eq!(sanitize_confidence(Some(0.916)), 0.92);
        assert_eq!(sanitize_confidence(Some(0.914)), 0.91);
        assert_eq!(sanitize_confidence(Some(1.7)), 1.0);
        assert_eq!(sanitize_confidence(Some(-0.3)), 0.0);
    }

    #[test]
    fn non_finite_or_missing_confidence_defaults() {
        assert_eq!(sanitize_confidence(None), 0.5);
        assert_eq!(sanitize_confidence(Some(f64::NAN)), 0.5);
        assert_eq!(sanitize_confidence(Some(f64::INFINITY)), 0.5);
    }

    #[test]
    fn known_phase_passes_through_unknown_is_unspecified() {
        let batch = sanitize_batch(vec![
            SegmentedMessage {
                phase: Some("DISCOVERY".into()),
                ..text_segment("a")
            },
            SegmentedMessage {
                phase: Some("coming-soon".into()),
                ..text_segment("b")
            },
            text_segment("c"),
        ]);
        assert_eq!(batch[0].phase, Some(Phase::Discovery));
        assert_eq!(batch[1].phase, None);
        assert_eq!(batch[2].phase, None);
    }

    #[test]
    fn approval_defaults_to_false() {
        let batch = sanitize_batch(vec![
            text_segment("a"),
            SegmentedMessage {
                approval_required: Some(true),
                ..text_segment("b")
            },
        ]);
        assert!(!batch[0].approval_required);
        assert!(batch[1].approval_required);
    }

    #[test]
    fn text_is_trimmed_and_empty_entries_dropped() {
        let batch = sanitize_batch(vec![
            text_segment("  We're in network!  "),
            text_segment("   "),
            text_segment("Perfect"),
        ]);
        let texts: Vec<&str> = batch.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["We're in network!", "Perfect"]);
    }

    #[test]
    fn order_is_preserved() {
        let batch = sanitize_batch(vec![
            text_segment("first"),
            text_segment("second"),
            text_segment("third"),
        ]);
        let texts: Vec<&str> = batch.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }
}
