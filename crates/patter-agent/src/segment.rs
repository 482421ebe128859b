// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response segmentation: both raw output shapes normalize into one ordered
//! list of message records.

use std::sync::LazyLock;

use patter_core::{PipelineError, RawOutput};
use regex::Regex;
use tracing::debug;

/// Matches the single delimited block in free-text output. `(?s)` so the
/// block interior may span lines; lazy so a stray second closing tag is
/// ignored rather than swallowing text between blocks.
static RESPONSE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<response>(.*?)</response>").expect("response block pattern")
});

/// Separator between individual messages inside a response block.
const MESSAGE_SEPARATOR: &str = "|||";

/// Substituted when free-text output yields no usable message. A well-formed
/// request never produces zero messages.
pub const FALLBACK_MESSAGE: &str =
    "I hear you! Let me know if you have any questions about care at our clinic.";

/// One segmented message before sanitization. Free-text segments carry only
/// text; structured segments arrive fully populated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SegmentedMessage {
    pub text: String,
    pub phase: Option<String>,
    pub delay_seconds: Option<f64>,
    pub approval_required: Option<bool>,
    pub confidence_score: Option<f64>,
}

impl SegmentedMessage {
    fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

/// Normalizes a backend's raw output into an ordered message list.
///
/// Free-text path: the interior of the delimited block split on `|||`,
/// trimmed, empties dropped; no block means the whole trimmed output is one
/// message; an empty result substitutes the fixed fallback. Structured path:
/// one segment per schema message; an empty array is an internal error since
/// the schema declares a minimum of one.
pub fn segment(output: &RawOutput) -> Result<Vec<SegmentedMessage>, PipelineError> {
    match output {
        RawOutput::FreeText(text) => {
            let mut messages: Vec<SegmentedMessage> =
                match RESPONSE_BLOCK.captures(text).map(|c| c[1].to_string()) {
                    Some(block) => block
                        .split(MESSAGE_SEPARATOR)
                        .map(str::trim)
                        .filter(|piece| !piece.is_empty())
                        .map(SegmentedMessage::from_text)
                        .collect(),
                    None => {
                        let trimmed = text.trim();
                        if trimmed.is_empty() {
                            Vec::new()
                        } else {
                            vec![SegmentedMessage::from_text(trimmed)]
                        }
                    }
                };

            if messages.is_empty() {
                debug!("free-text output yielded no messages, using fallback");
                messages.push(SegmentedMessage::from_text(FALLBACK_MESSAGE));
            }
            Ok(messages)
        }
        RawOutput::Structured(reply) => {
            if reply.messages.is_empty() {
                return Err(PipelineError::internal(
                    "structured backend returned an empty message array",
                ));
            }
            Ok(reply
                .messages
                .iter()
                .map(|message| SegmentedMessage {
                    text: message.text.clone(),
                    phase: message.phase.clone(),
                    delay_seconds: message.response_delay_seconds,
                    approval_required: message.approval_required,
                    confidence_score: message.confidence_score,
                })
                .collect())
        }
    }
}
