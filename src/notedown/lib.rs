//! # Notedown Architecture
//!
//! Notedown is a **UI-agnostic note library**: a directory of Markdown files, a
//! renderer that turns the active buffer into a styled HTML document, and an
//! edit session that writes every change straight back to disk. The bundled
//! CLI is one client of it; a desktop shell or a web view would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Client (cli/, wired by main.rs)                            │
//! │  - Parses arguments, prints results, owns exit codes        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - listNotes / selectNote / requestNewNote / onBufferChanged│
//! │  - Turns failures into user-facing messages                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Edit Session (session.rs)                                  │
//! │  - Idle / Active(name) state, buffer, rendered view         │
//! │  - One edit = one render + one save                         │
//! └─────────────────────────────────────────────────────────────┘
//!                 │                                │
//!                 ▼                                ▼
//! ┌──────────────────────────────┐  ┌──────────────────────────┐
//! │  Rendering (render/)         │  │  Storage (store/)        │
//! │  - Markdown → safe HTML      │  │  - NoteStore trait       │
//! │  - HTML shell + style sheet  │  │  - FileStore, InMemory   │
//! └──────────────────────────────┘  └──────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes Rust arguments and returns `Result`s. It
//! never writes to stdout/stderr and never exits the process. Diagnostics go
//! through `tracing`; the client decides whether a subscriber is installed.
//!
//! ## Single Writer
//!
//! Everything runs synchronously on the caller's thread. Each edit finishes
//! its render and its save before the next one is accepted, so the file on
//! disk matches the buffer after every event.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade external clients call
//! - [`session`]: Edit session state machine
//! - [`render`]: Markdown renderer, document wrapper and themes
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Note types and the new-note template
//! - [`names`]: Note-name validation
//! - [`config`]: Settings file and data directory layout
//! - [`logging`]: Subscriber setup for binaries
//! - [`error`]: Error types

pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod names;
pub mod render;
pub mod session;
pub mod store;
