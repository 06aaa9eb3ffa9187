//! # API Facade
//!
//! The API layer is the boundary external clients (a desktop shell, the CLI)
//! call into. It maps the client-facing operations onto the edit session:
//!
//! | Client operation      | Method                          |
//! |-----------------------|---------------------------------|
//! | `listNotes`           | [`NotesApi::list_notes`]        |
//! | `selectNote`          | [`NotesApi::select_note`]       |
//! | `requestNewNote`      | [`NotesApi::request_new_note`]  |
//! | `onBufferChanged`     | [`NotesApi::on_buffer_changed`] |
//! | `getRenderedDocument` | [`NotesApi::rendered_document`] |
//!
//! ## Failures Are Data
//!
//! Selecting a missing note or creating a duplicate is an everyday event, not
//! a crash. State-changing calls therefore always return a [`CmdResult`]: on
//! failure it carries a warning [`CmdMessage`] with the text to show (e.g.
//! "Note already exists!") and the underlying [`NoteError`] in `failure`,
//! while the session stays where it was.
//!
//! ## Generic Over NoteStore
//!
//! `NotesApi<S: NoteStore>`: production uses `FileStore`, tests use
//! `InMemoryStore`.

use crate::config::{DataPaths, Settings};
use crate::error::{NoteError, Result};
use crate::model::NoteSummary;
use crate::render::theme::ThemeCatalog;
use crate::render::DocumentWrapper;
use crate::session::{EditOutcome, EditSession, SaveStatus};
use crate::store::fs::FileStore;
use crate::store::NoteStore;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    /// Set when the state changed and the preview should be refreshed.
    pub document: Option<String>,
    pub messages: Vec<CmdMessage>,
    /// The error behind a warning/error message, for clients that branch on it.
    pub failure: Option<NoteError>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_document(mut self, document: String) -> Self {
        self.document = Some(document);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.failure.is_none()
    }

    fn failed(message: CmdMessage, err: NoteError) -> Self {
        Self {
            document: None,
            messages: vec![message],
            failure: Some(err),
        }
    }
}

/// The main API facade for notedown operations.
pub struct NotesApi<S: NoteStore> {
    session: EditSession<S>,
    settings: Settings,
    catalog: ThemeCatalog,
    settings_dir: Option<PathBuf>,
}

impl NotesApi<FileStore> {
    /// Open the file-backed store under `paths`, reading settings and themes from there.
    pub fn open(paths: &DataPaths) -> Result<Self> {
        paths.ensure()?;
        let settings = Settings::load(paths.settings_dir())?;
        let store = FileStore::new(paths.notes_dir());
        let catalog = ThemeCatalog::new(paths.themes_dir());
        Ok(Self::new(store, settings, catalog).with_settings_dir(paths.settings_dir().to_path_buf()))
    }
}

impl<S: NoteStore> NotesApi<S> {
    pub fn new(store: S, settings: Settings, catalog: ThemeCatalog) -> Self {
        let wrapper = DocumentWrapper::new(catalog.resolve(&settings));
        Self {
            session: EditSession::new(store, wrapper),
            settings,
            catalog,
            settings_dir: None,
        }
    }

    /// Persist settings changes to this directory.
    pub fn with_settings_dir(mut self, dir: PathBuf) -> Self {
        self.settings_dir = Some(dir);
        self
    }

    pub fn session(&self) -> &EditSession<S> {
        &self.session
    }

    pub fn list_notes(&self) -> Result<Vec<String>> {
        self.session.store().list()
    }

    pub fn list_recent(&self) -> Result<Vec<NoteSummary>> {
        self.session.store().summaries()
    }

    pub fn select_note(&mut self, name: &str) -> CmdResult {
        match self.session.load_note(name) {
            Ok(()) => CmdResult::default().with_document(self.rendered_document().to_string()),
            Err(err) => CmdResult::failed(CmdMessage::warning(err.user_message()), err),
        }
    }

    pub fn request_new_note(&mut self, name: &str) -> CmdResult {
        match self.session.new_note(name) {
            Ok(()) => {
                let mut result =
                    CmdResult::default().with_document(self.rendered_document().to_string());
                result.add_message(CmdMessage::success(format!("Note created: {}", name)));
                result
            }
            Err(err) => CmdResult::failed(CmdMessage::warning(err.user_message()), err),
        }
    }

    pub fn on_buffer_changed(&mut self, text: &str) -> CmdResult {
        match self.session.edit(text) {
            Ok(EditOutcome::Saved) => {
                CmdResult::default().with_document(self.rendered_document().to_string())
            }
            Ok(EditOutcome::Dropped) => {
                let mut result = CmdResult::default();
                result.add_message(CmdMessage::info("No note selected; change not saved."));
                result
            }
            // The view still reflects the edit; only persistence failed
            Err(err) => {
                let message = CmdMessage::error(format!("Autosave failed: {}", err.user_message()));
                let mut result = CmdResult::failed(message, err);
                result.document = Some(self.rendered_document().to_string());
                result
            }
        }
    }

    /// Give up on an edit that could not be saved, so another note can be
    /// opened.
    pub fn discard_changes(&mut self) -> CmdResult {
        let name = self.active_note().map(str::to_string);
        match self.session.discard_changes() {
            Ok(()) => {
                let mut result =
                    CmdResult::default().with_document(self.rendered_document().to_string());
                if let Some(name) = name {
                    result.add_message(CmdMessage::info(format!(
                        "Unsaved changes to {} discarded.",
                        name
                    )));
                }
                result
            }
            Err(err) => CmdResult::failed(CmdMessage::error(err.user_message()), err),
        }
    }

    pub fn rendered_document(&self) -> &str {
        self.session.rendered_document()
    }

    pub fn active_note(&self) -> Option<&str> {
        self.session.active_note()
    }

    pub fn save_status(&self) -> SaveStatus {
        self.session.save_status()
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn theme_names(&self) -> Vec<String> {
        self.catalog.names()
    }

    /// Change a setting, persist it, and re-render with the new style sheet.
    pub fn set_setting(&mut self, key: &str, value: &str) -> Result<CmdResult> {
        let mut updated = self.settings.clone();
        updated.set(key, value)?;

        if let Some(dir) = &self.settings_dir {
            updated.save(dir)?;
        }
        self.settings = updated;

        let stylesheet = self.catalog.resolve(&self.settings);
        self.session.set_wrapper(DocumentWrapper::new(stylesheet));

        let mut result = CmdResult::default().with_document(self.rendered_document().to_string());
        result.add_message(CmdMessage::success(format!(
            "{} = {}",
            key,
            self.settings.get(key)?
        )));
        Ok(result)
    }
}
