// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Transcript entry append/read operations.
//!
//! Entries are append-only. The read path orders by timestamp with rowid as
//! a tiebreak, so entries written in the same millisecond still read back in
//! write order.

use std::str::FromStr;

use patter_core::{
    AgentMetadata, ConversationId, EntryId, NextAction, Phase, PipelineError, TranscriptEntry,
};
use rusqlite::{Row, params};

use crate::database::Database;

/// Append one entry.
pub async fn insert_entry(db: &Database, entry: &TranscriptEntry) -> Result<(), PipelineError> {
    let e = entry.clone();
    let next_action_json = match &e.agent {
        Some(meta) => match &meta.next_action {
            Some(action) => Some(serde_json::to_string(action).map_err(|err| {
                PipelineError::wrap("cannot serialize next_action", err)
            })?),
            None => None,
        },
        None => None,
    };

    db.connection()
        .call(move |conn| {
            let meta = e.agent.as_ref();
            conn.execute(
                "INSERT INTO entries
                     (id, conversation_id, sender, text, timestamp,
                      response_delay_seconds, respond_at, approval_required,
                      confidence_score, phase, model, analysis, next_action)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    e.id.0,
                    e.conversation_id.0,
                    e.sender,
                    e.text,
                    e.timestamp,
                    meta.map(|m| m.response_delay_seconds),
                    meta.map(|m| m.respond_at.clone()),
                    meta.map(|m| m.approval_required),
                    meta.map(|m| m.confidence_score),
                    meta.and_then(|m| m.phase).map(|p| p.to_string()),
                    meta.and_then(|m| m.model.clone()),
                    meta.and_then(|m| m.analysis.clone()),
                    next_action_json,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get all entries for a conversation in chronological order.
pub async fn list_for_conversation(
    db: &Database,
    conversation_id: &ConversationId,
) -> Result<Vec<TranscriptEntry>, PipelineError> {
    list_with_order(db, conversation_id, "timestamp ASC, rowid ASC").await
}

/// Get all entries for a conversation in physical write order, ignoring
/// timestamps. Lets tests verify persistence order independently of the
/// timestamp sort key.
pub async fn list_in_write_order(
    db: &Database,
    conversation_id: &ConversationId,
) -> Result<Vec<TranscriptEntry>, PipelineError> {
    list_with_order(db, conversation_id, "rowid ASC").await
}

async fn list_with_order(
    db: &Database,
    conversation_id: &ConversationId,
    order_by: &'static str,
) -> Result<Vec<TranscriptEntry>, PipelineError> {
    let conversation_id = conversation_id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT id, conversation_id, sender, text, timestamp,
                        response_delay_seconds, respond_at, approval_required,
                        confidence_score, phase, model, analysis, next_action
                 FROM entries WHERE conversation_id = ?1
                 ORDER BY {order_by}"
            ))?;
            let rows = stmt.query_map(params![conversation_id], entry_from_row)?;
            let mut entries = Vec::new();
            for row in rows {
                entries.push(row?);
            }
            Ok(entries)
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Map one row to a [`TranscriptEntry`].
///
/// The metadata bundle is considered present iff `respond_at` is non-null;
/// agent-generated entries always carry the full bundle, counterpart and
/// seed entries carry none of it.
fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<TranscriptEntry> {
    let respond_at: Option<String> = row.get(6)?;
    let agent = match respond_at {
        Some(respond_at) => {
            let phase: Option<String> = row.get(9)?;
            let next_action: Option<String> = row.get(12)?;
            Some(AgentMetadata {
                response_delay_seconds: row.get(5)?,
                respond_at,
                approval_required: row.get(7)?,
                confidence_score: row.get(8)?,
                phase: phase.as_deref().and_then(|p| Phase::from_str(p).ok()),
                model: row.get(10)?,
                analysis: row.get(11)?,
                next_action: next_action
                    .as_deref()
                    .and_then(|json| serde_json::from_str::<NextAction>(json).ok()),
            })
        }
        None => None,
    };

    Ok(TranscriptEntry {
        id: EntryId(row.get(0)?),
        conversation_id: ConversationId(row.get(1)?),
        sender: row.get(2)?,
        text: row.get(3)?,
        timestamp: row.get(4)?,
        agent,
    })
}
