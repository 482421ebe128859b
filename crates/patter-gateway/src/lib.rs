// SPDX-FileCopyrightText: 2026 Patter Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Patter agent.
//!
//! One operation crosses this boundary: `POST /v1/conversations/{id}/respond`
//! invokes the response pipeline and returns the aggregate generation
//! result. A `GET /health` endpoint reports process and storage health for
//! supervisors.

pub mod handlers;
pub mod server;

pub use server::{GatewayState, ServerConfig, router, start_server};
