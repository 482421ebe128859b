// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Declared output schema for structured generation.
//!
//! The schema is the contract the backend must satisfy: an analysis string,
//! 1-4 message objects, and a next-action hint. The sanitizer still clamps
//! every field afterwards; the schema narrows what a compliant model can
//! return, it does not replace defense at the boundary.

use serde_json::{Value, json};

/// The conversation stages a structured message may carry.
pub const PHASES: [&str; 6] = [
    "INITIAL_CONTACT",
    "DISCOVERY",
    "QUALIFICATION",
    "CONNECTION",
    "POSITIONING",
    "CONVERSION",
];

/// Minimum messages per reply batch.
pub const MIN_MESSAGES: usize = 1;
/// Maximum messages per reply batch.
pub const MAX_MESSAGES: usize = 4;

/// Builds the `response_format` value for the chat completions request:
/// a strict JSON schema named `agent_reply`.
pub fn response_format() -> Value {
    json!({
        "type": "json_schema",
        "json_schema": {
            "name": "agent_reply",
            "strict": true,
            "schema": {
                "type": "object",
                "additionalProperties": false,
                "required": ["analysis", "messages", "next_action"],
                "properties": {
                    "analysis": {
                        "type": "string",
                        "description": "Read of the conversation state and why the reply fits."
                    },
                    "messages": {
                        "type": "array",
                        "minItems": MIN_MESSAGES,
                        "maxItems": MAX_MESSAGES,
                        "items": {
                            "type": "object",
                            "additionalProperties": false,
                            "required": [
                                "text",
                                "phase",
                                "response_delay_seconds",
                                "approval_required",
                                "confidence_score"
                            ],
                            "properties": {
                                "text": {"type": "string"},
                                "phase": {"type": "string", "enum": PHASES},
                                "response_delay_seconds": {
                                    "type": "integer",
                                    "minimum": 5,
                                    "maximum": 60
                                },
                                "approval_required": {"type": "boolean"},
                                "confidence_score": {
                                    "type": "number",
                                    "minimum": 0,
                                    "maximum": 1
                                }
                            }
                        }
                    },
                    "next_action": {
                        "type": "object",
                        "additionalProperties": false,
                        "required": ["should_offer_scheduling_link", "notes"],
                        "properties": {
                            "should_offer_scheduling_link": {"type": "boolean"},
                            "notes": {"type": "string"}
                        }
                    }
                }
            }
        }
    })
}
