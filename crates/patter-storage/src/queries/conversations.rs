// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation read/create operations.
//!
//! The summary columns (`last_message`, `unread`, `total_messages`) are
//! mutated by the external summary trigger, never by the pipeline; this
//! module only writes them at creation time.

use std::str::FromStr;

use patter_core::{BackendKind, Conversation, ConversationId, PipelineError};
use rusqlite::params;

use crate::database::Database;

/// Insert a new conversation record.
pub async fn create_conversation(
    db: &Database,
    conversation: &Conversation,
) -> Result<(), PipelineError> {
    let c = conversation.clone();
    db.connection()
        .call(move |conn| {
            conn.execute(
                "INSERT INTO conversations
                     (id, display_name, backend, last_message, unread, total_messages,
                      created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    c.id.0,
                    c.display_name,
                    c.backend.to_string(),
                    c.last_message,
                    c.unread,
                    c.total_messages,
                    c.created_at,
                    c.updated_at,
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(crate::database::map_tr_err)
}

/// Get a conversation by id.
pub async fn get_conversation(
    db: &Database,
    id: &ConversationId,
) -> Result<Option<Conversation>, PipelineError> {
    let id = id.0.clone();
    db.connection()
        .call(move |conn| {
            let mut stmt = conn.prepare(
                "SELECT id, display_name, backend, last_message, unread, total_messages,
                        created_at, updated_at
                 FROM conversations WHERE id = ?1",
            )?;
            let result = stmt.query_row(params![id], |row| {
                let backend_raw: String = row.get(2)?;
                let backend = BackendKind::from_str(&backend_raw).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(
                        2,
                        rusqlite::types::Type::Text,
                        Box::new(e),
                    )
                })?;
                Ok(Conversation {
                    id: ConversationId(row.get(0)?),
                    display_name: row.get(1)?,
                    backend,
                    last_message: row.get(3)?,
                    unread: row.get(4)?,
                    total_messages: row.get(5)?,
                    created_at: row.get(6)?,
                    updated_at: row.get(7)?,
                })
            });
            match result {
                Ok(conversation) => Ok(Some(conversation)),
                Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                Err(e) => Err(e.into()),
            }
        })
        .await
        .map_err(crate::database::map_tr_err)
}
