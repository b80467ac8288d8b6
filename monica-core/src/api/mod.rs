// SPDX-FileCopyrightText: 2026 Mattia Egloff <mattia.egloff@pm.me>
//
// SPDX-License-Identifier: GPL-3.0-or-later

//! Client API Layer
//!
//! Coordinates the session, the contact sync and event callbacks on top of
//! the network and storage layers.
//!
//! # Module Structure
//!
//! - [`auth`] - Credential validation and the session state
//! - [`error`] - Unified error type
//! - [`events`] - Event system for callbacks
//! - [`sync_controller`] - Server-to-cache sync and remote writes
//! - [`monica`] - Main orchestrator

pub mod auth;
pub mod error;
pub mod events;
pub mod monica;
pub mod sync_controller;

// Error types
pub use error::{ClientError, ClientResult};

// Events
pub use events::{CallbackHandler, ClientEvent, EventDispatcher, EventHandler};

// Controllers
pub use auth::{AuthController, AuthState};
pub use sync_controller::SyncController;

// Orchestrator
pub use monica::{MonicaClient, MonicaClientBuilder};
