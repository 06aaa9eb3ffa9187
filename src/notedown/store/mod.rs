//! # Storage Layer
//!
//! The [`NoteStore`] trait is the catalog of notes the edit session reads from
//! and writes through to. Notes are identified by name only; the name is the
//! filename stem for file-backed stores.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, one file per note
//!   - Content in `<dir>/<name><ext>` (default extension `.md`)
//!   - Raw Markdown, no front-matter or sidecar metadata
//!   - Saves are written to a hidden temp file and renamed into place
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence, insertion-ordered
//!
//! ## Storage Format
//!
//! ```text
//! notes/
//! ├── todo.md
//! ├── groceries.md
//! └── Meeting 2024-05-01.md
//! ```
//!
//! ## Consistency
//!
//! There is a single local writer and no locking. `create` refuses existing
//! names, `save` refuses missing ones, so a save can never conjure a note the
//! user did not create.

use crate::error::Result;
use crate::model::{Note, NoteSummary};
use std::path::PathBuf;

pub mod fs;
pub mod memory;

/// Abstract interface for note storage.
pub trait NoteStore {
    /// Names of all notes currently in the store, in the medium's natural order.
    fn list(&self) -> Result<Vec<String>>;

    /// Names plus modification times, newest first.
    fn summaries(&self) -> Result<Vec<NoteSummary>>;

    /// Whether a note with this name exists.
    fn exists(&self, name: &str) -> Result<bool>;

    /// Create a note with the template body.
    ///
    /// Fails with `AlreadyExists` without touching the existing note, or with
    /// `InvalidName` when the name cannot be mapped to a safe filename.
    fn create(&mut self, name: &str) -> Result<Note>;

    /// Full current content of the named note.
    fn load(&self, name: &str) -> Result<String>;

    /// Replace the named note's content entirely. Fails with `NotFound` if the
    /// note does not exist.
    fn save(&mut self, name: &str, content: &str) -> Result<()>;

    /// Where the note lives. Virtual for non-file stores.
    fn note_path(&self, name: &str) -> Result<PathBuf>;
}
