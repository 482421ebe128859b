// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt assembly: transcript + persona + turn index -> the two strings a
//! backend needs.
//!
//! Assembly is pure. History is never truncated here; a backend whose
//! context window overflows must fail, not silently drop turns.

use patter_core::{AssembledPrompt, BackendKind, TranscriptEntry};
use serde_json::json;

use crate::prompts;

/// Renders the transcript as sender/message/timestamp blocks for the
/// free-text backend.
pub fn render_transcript_lines(transcript: &[TranscriptEntry]) -> String {
    transcript
        .iter()
        .map(|entry| {
            format!(
                "sender: {}\nmessage: {}\ntimestamp: {}",
                entry.sender, entry.text, entry.timestamp
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Renders the transcript as a JSON array of role-tagged messages for the
/// structured backend. The role derives from whether the sender matches the
/// fixed agent identity.
pub fn render_transcript_json(agent_name: &str, transcript: &[TranscriptEntry]) -> String {
    let history: Vec<_> = transcript
        .iter()
        .map(|entry| {
            json!({
                "role": if entry.is_agent(agent_name) { "agent" } else { "prospect" },
                "sender": entry.sender,
                "message": entry.text,
                "timestamp": entry.timestamp,
            })
        })
        .collect();

    // Pretty-printing a Vec<Value> cannot fail.
    serde_json::to_string_pretty(&history).unwrap_or_else(|_| "[]".to_string())
}

/// Assembles the system and user prompts for one generation turn.
///
/// `next_message_index` is `transcript.len() + 1`: it only gives the backend
/// a sense of turn progress and is never stored.
pub fn assemble(
    kind: BackendKind,
    agent_name: &str,
    display_name: &str,
    transcript: &[TranscriptEntry],
) -> AssembledPrompt {
    let next_message_index = transcript.len() as u32 + 1;
    match kind {
        BackendKind::FreeText => AssembledPrompt {
            system_prompt: prompts::FREE_TEXT_SYSTEM_PROMPT.to_string(),
            user_prompt: prompts::free_text_message_prompt(
                display_name,
                next_message_index,
                &render_transcript_lines(transcript),
            ),
        },
        BackendKind::Structured => AssembledPrompt {
            system_prompt: prompts::STRUCTURED_SYSTEM_PROMPT.to_string(),
            user_prompt: prompts::structured_message_prompt(
                display_name,
                next_message_index,
                &render_transcript_json(agent_name, transcript),
            ),
        },
    }
}

#[cfg(test)]
mod tests {
    use patter_core::{ConversationId, EntryId};

    use super::*;

    fn entry(sender: &str, text: &str, timestamp: &str) -> TranscriptEntry {
        TranscriptEntry {
            id: EntryId(format!("e-{timestamp}")),
            conversation_id: ConversationId("c-1".into()),
            sender: sender.into(),
            text: text.into(),
            timestamp: timestamp.into(),
            agent: None,
        }
    }

    fn transcript() -> Vec<TranscriptEntry> {
        vec![
            entry("Dr. Reyes", "Thanks for the follow Caty!", "2026-01-01T00:00:01.000Z"),
            entry(
                "Dr. Reyes",
                "Here for the content or do you have questions about care?",
                "2026-01-01T00:00:02.000Z",
            ),
            entry("Caty", "Do y'all take insurance or HSA?", "2026-01-01T00:00:03.000Z"),
        ]
    }

    #[test]
    fn line_rendering_includes_every_entry_in_order() {
        let rendered = render_transcript_lines(&transcript());
        let first = rendered.find("Thanks for the follow").unwrap();
        let last = rendered.find("insurance or HSA").unwrap();
        assert!(first < last);
        assert_eq!(rendered.matches("sender: ").count(), 3);
        assert!(rendered.contains("timestamp: 2026-01-01T00:00:03.000Z"));
    }

    #[test]
    fn json_rendering_derives_roles_from_agent_identity() {
        let rendered = render_transcript_json("Dr. Reyes", &transcript());
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        let history = parsed.as_array().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0]["role"], "agent");
        assert_eq!(history[1]["role"], "agent");
        assert_eq!(history[2]["role"], "prospect");
        assert_eq!(history[2]["sender"], "Caty");
        assert_eq!(history[2]["message"], "Do y'all take insurance or HSA?");
    }

    #[test]
    fn next_message_index_is_transcript_length_plus_one() {
        let prompt = assemble(
            BackendKind::FreeText,
            "Dr. Reyes",
            "Caty",
            &transcript(),
        );
        assert!(prompt.user_prompt.contains("<message_number>4</message_number>"));
    }

    #[test]
    fn free_text_and_structured_use_their_own_system_prompts() {
        let free = assemble(BackendKind::FreeText, "Dr. Reyes", "Caty", &transcript());
        let structured = assemble(BackendKind::Structured, "Dr. Reyes", "Caty", &transcript());
        assert!(free.system_prompt.contains("<response>"));
        assert!(structured.system_prompt.contains("\"analysis\""));
        assert_ne!(free.user_prompt, structured.user_prompt);
    }

    #[test]
    fn history_is_never_truncated() {
        let long: Vec<TranscriptEntry> = (0..500)
            .map(|i| entry("Caty", &format!("message number {i}"), "2026-01-01T00:00:01.000Z"))
            .collect();
        let prompt = assemble(BackendKind::FreeText, "Dr. Reyes", "Caty", &long);
        assert!(prompt.user_prompt.contains("message number 0"));
        assert!(prompt.user_prompt.contains("message number 499"));
    }
}
