//! # Edit Session
//!
//! The session owns the working copy of the active note and keeps three
//! things in step: the buffer, the rendered view, and the file on disk.
//!
//! ```text
//!            load_note / new_note
//!   Idle ───────────────────────────▶ Active(name)
//!                                      │   ▲
//!                                      └───┘ load_note / new_note / edit
//! ```
//!
//! - `load_note` is a read. It replaces the buffer and re-renders but never
//!   saves, so opening a note cannot rewrite it.
//! - `edit` is the only path that persists. Every edit renders and then
//!   saves the whole buffer (write-through), so a crash between two edits
//!   loses nothing that was already typed.
//! - With no active note, edits are dropped: nothing is queued and nothing
//!   touches the store.
//!
//! A failed transition (missing note, name collision) leaves the previous
//! state, buffer and view exactly as they were.
//!
//! After a failed save the buffer is the only copy of the edit. Switching
//! notes is refused with `UnsavedChanges` until a later edit saves it or the
//! client calls `discard_changes`.

use crate::error::{NoteError, Result};
use crate::model::word_count;
use crate::render::{render, DocumentWrapper};
use crate::store::NoteStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Active(String),
}

/// Outcome of the last attempt to persist the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveStatus {
    /// Buffer matches what was just loaded or created; nothing to write yet.
    Clean,
    /// Last edit was written.
    Saved,
    /// Last edit could not be written; the buffer stays authoritative and the
    /// next edit writes it again.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// No active note; the edit was discarded.
    Dropped,
    /// Buffer rendered and written to the store.
    Saved,
}

pub struct EditSession<S: NoteStore> {
    store: S,
    wrapper: DocumentWrapper,
    state: SessionState,
    buffer: String,
    document: String,
    save_status: SaveStatus,
}

impl<S: NoteStore> EditSession<S> {
    pub fn new(store: S, wrapper: DocumentWrapper) -> Self {
        let document = wrapper.wrap("");
        Self {
            store,
            wrapper,
            state: SessionState::Idle,
            buffer: String::new(),
            document,
            save_status: SaveStatus::Clean,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn active_note(&self) -> Option<&str> {
        match &self.state {
            SessionState::Active(name) => Some(name),
            SessionState::Idle => None,
        }
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// The current rendered view.
    pub fn rendered_document(&self) -> &str {
        &self.document
    }

    pub fn save_status(&self) -> SaveStatus {
        self.save_status
    }

    pub fn word_count(&self) -> usize {
        word_count(&self.buffer)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn wrapper(&self) -> &DocumentWrapper {
        &self.wrapper
    }

    /// Swap the document wrapper (theme change) and re-render the buffer.
    pub fn set_wrapper(&mut self, wrapper: DocumentWrapper) {
        self.wrapper = wrapper;
        self.refresh_view();
    }

    /// Make `name` the active note. Reads only; never saves.
    pub fn load_note(&mut self, name: &str) -> Result<()> {
        self.ensure_nothing_unsaved()?;
        let content = self.store.load(name)?;
        self.activate(name, content);
        tracing::debug!(note = name, "loaded note");
        Ok(())
    }

    /// Create `name` in the store and make it the active note.
    pub fn new_note(&mut self, name: &str) -> Result<()> {
        self.ensure_nothing_unsaved()?;
        let note = self.store.create(name)?;
        self.activate(&note.name, note.content);
        Ok(())
    }

    /// Apply a change from the editing surface: update the buffer, re-render,
    /// and write the buffer through to the store.
    ///
    /// When the save fails the buffer and view still reflect `new_content`;
    /// the error is returned so the client can report it.
    pub fn edit(&mut self, new_content: &str) -> Result<EditOutcome> {
        let Some(name) = self.active_note().map(str::to_string) else {
            tracing::debug!("edit with no active note dropped");
            return Ok(EditOutcome::Dropped);
        };

        self.buffer = new_content.to_string();
        self.refresh_view();
        self.persist(&name)?;
        Ok(EditOutcome::Saved)
    }

    /// Drop an edit that could not be saved and go back to the stored text.
    /// If the note is gone from the store the session returns to Idle.
    pub fn discard_changes(&mut self) -> Result<()> {
        let Some(name) = self.active_note().map(str::to_string) else {
            return Ok(());
        };

        match self.store.load(&name) {
            Ok(content) => self.activate(&name, content),
            Err(NoteError::NotFound(_)) => {
                self.state = SessionState::Idle;
                self.buffer.clear();
                self.save_status = SaveStatus::Clean;
                self.refresh_view();
            }
            Err(err) => return Err(err),
        }
        tracing::info!(note = %name, "discarded unsaved changes");
        Ok(())
    }

    fn ensure_nothing_unsaved(&self) -> Result<()> {
        match (&self.state, self.save_status) {
            (SessionState::Active(name), SaveStatus::Failed) => {
                Err(NoteError::UnsavedChanges(name.clone()))
            }
            _ => Ok(()),
        }
    }

    fn activate(&mut self, name: &str, content: String) {
        self.state = SessionState::Active(name.to_string());
        self.buffer = content;
        self.save_status = SaveStatus::Clean;
        self.refresh_view();
    }

    fn refresh_view(&mut self) {
        self.document = self.wrapper.wrap(&render(&self.buffer));
    }

    fn persist(&mut self, name: &str) -> Result<()> {
        match self.store.save(name, &self.buffer) {
            Ok(()) => {
                self.save_status = SaveStatus::Saved;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(note = name, error = %err, "autosave failed");
                self.save_status = SaveStatus::Failed;
                Err(err)
            }
        }
    }
}
