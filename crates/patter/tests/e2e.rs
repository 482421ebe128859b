// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end scenarios for the response pipeline against real SQLite
//! storage, with deterministic mock backends standing in for the model
//! APIs.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::SecretString;

use patter_agent::ResponsePipeline;
use patter_core::{
    BackendKind, Credentials, NextAction, RawOutput, StructuredMessage, StructuredReply,
    TranscriptStore,
};
use patter_test_utils::harness::{TempStore, append_counterpart_message, seed_conversation};
use patter_test_utils::mock_backend::MockBackend;

const AGENT_NAME: &str = "Dr. Reyes";

fn credentials() -> Credentials {
    Credentials {
        anthropic: Some(SecretString::from("sk-ant-test")),
        openai: Some(SecretString::from("sk-oai-test")),
    }
}

fn pipeline(
    store: &TempStore,
    free_text: Arc<MockBackend>,
    structured: Arc<MockBackend>,
    credentials: Credentials,
) -> ResponsePipeline {
    ResponsePipeline::new(store.arc(), free_text, structured, credentials, AGENT_NAME)
}

fn parse_ts(value: &str) -> DateTime<Utc> {
    value.parse().expect("RFC 3339 timestamp")
}

// Scenario A: a free-text reply with a delimited three-segment block
// persists three entries in order with increasing respond-at timestamps.
#[tokio::test]
async fn scenario_a_free_text_three_segment_batch() {
    let store = TempStore::open().await;
    let id = seed_conversation(&store, AGENT_NAME, "Caty", BackendKind::FreeText).await;
    append_counterpart_message(&store, &id, "Caty", "Do y'all take insurance or HSA?").await;

    let free_text = Arc::new(MockBackend::free_text().with_outputs(vec![RawOutput::FreeText(
        "<response>Great question|||Both|||Which insurance carrier do you have?</response>".into(),
    )]));
    let pipeline = pipeline(
        &store,
        free_text,
        Arc::new(MockBackend::structured()),
        credentials(),
    );

    let before = Utc::now();
    let result = pipeline.respond_to(&id.0).await.unwrap();

    assert_eq!(result.message, "Great question");
    assert_eq!(
        result.all_messages,
        vec!["Great question", "Both", "Which insurance carrier do you have?"]
    );

    // Verify persistence by physical write sequence, not timestamps.
    let written = store.inner().list_entries_in_write_order(&id).await.unwrap();
    assert_eq!(written.len(), 6); // 2 openers + 1 counterpart turn + 3 generated
    let generated: Vec<_> = written.iter().filter(|e| e.agent.is_some()).collect();
    assert_eq!(generated.len(), 3);

    let mut previous = before;
    for (entry, expected) in generated.iter().zip(&result.all_messages) {
        assert_eq!(&entry.text, expected);
        assert_eq!(entry.sender, AGENT_NAME);
        let meta = entry.agent.as_ref().unwrap();
        let respond_at = parse_ts(&meta.respond_at);
        assert!(respond_at > previous, "respond-at must increase");
        assert!(respond_at > before, "respond-at is in the future");
        previous = respond_at;
    }
}

// Scenario B: an empty transcript fails with NotFound and writes nothing.
#[tokio::test]
async fn scenario_b_empty_transcript_is_not_found() {
    let store = TempStore::open().await;
    let id = store
        .create_bare_conversation("Caty", BackendKind::FreeText)
        .await;

    let free_text = Arc::new(MockBackend::free_text());
    let pipeline = pipeline(
        &store,
        free_text.clone(),
        Arc::new(MockBackend::structured()),
        credentials(),
    );

    let err = pipeline.respond_to(&id.0).await.unwrap_err();
    assert_eq!(err.code(), "not-found");
    assert_eq!(free_text.calls(), 0);

    let entries = store.store.list_entries(&id).await.unwrap();
    assert!(entries.is_empty(), "no writes may occur");
}

// Scenario C: an absent credential fails before any model call is attempted.
#[tokio::test]
async fn scenario_c_missing_credential_fails_before_model_call() {
    let store = TempStore::open().await;
    let id = seed_conversation(&store, AGENT_NAME, "Caty", BackendKind::FreeText).await;

    let free_text = Arc::new(MockBackend::free_text());
    let structured = Arc::new(MockBackend::structured());
    let pipeline = pipeline(
        &store,
        free_text.clone(),
        structured.clone(),
        Credentials::default(),
    );

    let err = pipeline.respond_to(&id.0).await.unwrap_err();
    assert_eq!(err.code(), "failed-precondition");
    assert_eq!(free_text.calls(), 0, "no model call may be attempted");
    assert_eq!(structured.calls(), 0);

    let entries = store.store.list_entries(&id).await.unwrap();
    assert_eq!(entries.len(), 2, "only the seeded openers remain");
}

// Scenario D: structured delays of 5 and 60 seconds produce respond-at
// deltas of exactly 5s then 60s from the batch start.
#[tokio::test]
async fn scenario_d_structured_delays_accumulate_exactly() {
    let store = TempStore::open().await;
    let id = seed_conversation(&store, AGENT_NAME, "Joy", BackendKind::Structured).await;
    append_counterpart_message(&store, &id, "Joy", "Is there a link to get set up?").await;

    let reply = StructuredReply {
        analysis: "Ready to convert.".into(),
        messages: vec![
            StructuredMessage {
                text: "Absolutely!".into(),
                phase: Some("CONVERSION".into()),
                response_delay_seconds: Some(5.0),
                approval_required: Some(false),
                confidence_score: Some(0.97),
            },
            StructuredMessage {
                text: "You can schedule your new patient exam right from that link".into(),
                phase: Some("CONVERSION".into()),
                response_delay_seconds: Some(60.0),
                approval_required: Some(false),
                confidence_score: Some(0.95),
            },
        ],
        next_action: NextAction {
            should_offer_scheduling_link: true,
            notes: "Send the link.".into(),
        },
    };
    let structured =
        Arc::new(MockBackend::structured().with_outputs(vec![RawOutput::Structured(reply)]));
    let pipeline = pipeline(
        &store,
        Arc::new(MockBackend::free_text()),
        structured,
        credentials(),
    );

    let before = Utc::now();
    let result = pipeline.respond_to(&id.0).await.unwrap();
    let after = Utc::now();
    assert_eq!(result.all_messages.len(), 2);

    let entries = store.store.list_entries(&id).await.unwrap();
    let generated: Vec<_> = entries.iter().filter(|e| e.agent.is_some()).collect();
    assert_eq!(generated.len(), 2);

    let first = parse_ts(&generated[0].agent.as_ref().unwrap().respond_at);
    let second = parse_ts(&generated[1].agent.as_ref().unwrap().respond_at);

    // The batch start is a single snapshot between `before` and `after`:
    // first = start + 5s, second = start + 65s. The persisted form truncates
    // to milliseconds, hence the 10ms slack on the lower bound.
    assert!(first >= before + chrono::Duration::milliseconds(4_990));
    assert!(first <= after + chrono::Duration::seconds(5));
    assert_eq!(second - first, chrono::Duration::seconds(60));

    // Backend-specific side information rides along on the result and on
    // every persisted entry of the batch.
    assert_eq!(result.analysis.as_deref(), Some("Ready to convert."));
    assert!(result.next_action.as_ref().unwrap().should_offer_scheduling_link);
    for entry in &generated {
        let meta = entry.agent.as_ref().unwrap();
        assert_eq!(meta.analysis.as_deref(), Some("Ready to convert."));
        assert!(meta.next_action.as_ref().unwrap().should_offer_scheduling_link);
    }
}

// Persistence order: the transcript's write sequence matches generation
// order even when every entry shares one wall-clock timestamp window.
#[tokio::test]
async fn write_sequence_matches_generation_order() {
    let store = TempStore::open().await;
    let id = seed_conversation(&store, AGENT_NAME, "Toni", BackendKind::FreeText).await;

    let free_text = Arc::new(MockBackend::free_text().with_outputs(vec![RawOutput::FreeText(
        "<response>one|||two|||three|||four</response>".into(),
    )]));
    let pipeline = pipeline(
        &store,
        free_text,
        Arc::new(MockBackend::structured()),
        credentials(),
    );

    let result = pipeline.respond_to(&id.0).await.unwrap();

    let physical = store.inner().list_entries_in_write_order(&id).await.unwrap();
    let generated_texts: Vec<&str> = physical
        .iter()
        .filter(|e| e.agent.is_some())
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(generated_texts, vec!["one", "two", "three", "four"]);
    assert_eq!(result.all_messages, generated_texts);
}

// A second turn sees the first turn's entries in its history.
#[tokio::test]
async fn consecutive_turns_accumulate_transcript() {
    let store = TempStore::open().await;
    let id = seed_conversation(&store, AGENT_NAME, "Caty", BackendKind::FreeText).await;

    let free_text = Arc::new(MockBackend::free_text().with_outputs(vec![
        RawOutput::FreeText("<response>Great question|||Both</response>".into()),
        RawOutput::FreeText("<response>We're in network!</response>".into()),
    ]));
    let pipeline = pipeline(
        &store,
        free_text,
        Arc::new(MockBackend::structured()),
        credentials(),
    );

    append_counterpart_message(&store, &id, "Caty", "Do y'all take insurance?").await;
    pipeline.respond_to(&id.0).await.unwrap();

    append_counterpart_message(&store, &id, "Caty", "Blue cross blue shield").await;
    let second = pipeline.respond_to(&id.0).await.unwrap();
    assert_eq!(second.message, "We're in network!");

    // 2 openers + 2 counterpart turns + 2 + 1 generated.
    let entries = store.store.list_entries(&id).await.unwrap();
    assert_eq!(entries.len(), 7);
}
