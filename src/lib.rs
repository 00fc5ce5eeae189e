//! Content Studio - web console for the content builder agent service
//!
//! Content Studio is a thin browser front end: it forwards a user's
//! content-generation request to a remote agent backend over HTTP, records
//! the exchange in an in-memory conversation transcript, and previews the
//! artifacts the agent wrote to a shared file store (a markdown document
//! and up to two images).
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                     Content Studio                       │
//! │                                                          │
//! │  browser ──► api (axum) ──► agent (POST /run_agent) ───┐ │
//! │                 │                                      │ │
//! │                 ▼                                      │ │
//! │              session (thread id + transcript)          │ │
//! │                 │                                      │ │
//! │                 ▼                                      │ │
//! │          artifacts (path resolution, pure)             │ │
//! │                 │                                      │ │
//! │                 ▼                                      │ │
//! │          preview (GET /files/<path>) ──────────────────┤ │
//! │                 │                                      │ │
//! │                 ▼                                      ▼ │
//! │          render (minijinja page)          agent backend  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`]: axum router and request handlers
//! - [`session`]: conversation state (thread id + transcript)
//! - [`agent`]: request/response client for the agent backend
//! - [`artifacts`]: artifact path resolution from reply metadata
//! - [`preview`]: read-only artifact fetches against the file store
//! - [`render`]: page model and HTML rendering
//! - [`config`]: environment-driven configuration

pub mod agent;
pub mod api;
pub mod artifacts;
pub mod config;
pub mod error;
pub mod preview;
pub mod render;
pub mod session;

pub use config::StudioConfig;
pub use error::{Error, Result};
