//! workshop-mcp: MCP companion for self-paced coding workshops
//!
//! Tracks where a learner is in a workshop and moves their playground to the
//! right exercise step.
//!
//! # Architecture
//!
//! The crate is split between pure resolution logic and the plumbing around it:
//!
//! - **Progress resolution**: rank course units, find the next incomplete
//!   lesson, resolve partial step coordinates, advance the playground
//! - **Workshop access**: traits for progress, outline, playground and
//!   notifications, with an in-memory implementation loaded from a manifest
//! - **MCP tools**: `set_playground`, `get_what_is_next`, `update_progress`
//!   and friends, served over stdio
//!
//! # Modules
//!
//! - [`config`]: Configuration loading and validation
//! - [`error`]: Configuration error types
//! - [`mcp`]: MCP protocol implementation
//! - [`notifications`]: Notification visibility rules
//! - [`progress`]: Ranking and next-unit resolution
//! - [`workshop`]: Workshop data access

pub mod config;
pub mod error;
pub mod mcp;
pub mod notifications;
pub mod progress;
pub mod workshop;
