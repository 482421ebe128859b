// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delivery scheduling: each message in a batch gets a respond-at timestamp
//! from a running total of per-message delays.

use chrono::{DateTime, Duration, Utc};

use crate::sanitize::SanitizedMessage;

/// A sanitized message with its assigned delivery time.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledMessage {
    pub message: SanitizedMessage,
    pub respond_at: DateTime<Utc>,
}

/// Walks the batch in order, accumulating delay seconds from zero.
///
/// `now` is a single snapshot taken at batch start -- not re-read per entry,
/// so the schedule stays internally consistent even when persistence is
/// slow. Every delay is at least 5 seconds, which makes the timestamps
/// strictly increasing within a batch.
pub fn schedule(messages: Vec<SanitizedMessage>, now: DateTime<Utc>) -> Vec<ScheduledMessage> {
    let mut cumulative_seconds: i64 = 0;
    messages
        .into_iter()
        .map(|message| {
            cumulative_seconds += message.delay_seconds;
            ScheduledMessage {
                respond_at: now + Duration::seconds(cumulative_seconds),
                message,
            }
        })
        .collect()
}
