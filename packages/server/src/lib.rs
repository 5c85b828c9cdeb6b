//! Single-room WebSocket chat relay.
//!
//! Clients connect, receive the full history, and then receive every new
//! message and system notice as it is produced. Join, leave and send events
//! are additionally recorded in an activity log available on request.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod bootstrap;
pub mod config;
