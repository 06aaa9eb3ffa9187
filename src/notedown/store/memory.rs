use super::NoteStore;
use crate::error::{NoteError, Result};
use crate::model::{Note, NoteSummary};
use crate::names::validate_note_name;
use std::path::PathBuf;

/// In-memory storage for testing and development.
/// Does NOT persist data. Keeps notes in creation order.
#[derive(Default)]
pub struct InMemoryStore {
    notes: Vec<Note>,
    writes: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `create` and `save` calls, for asserting on write traffic.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn find(&self, name: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut Note> {
        self.notes.iter_mut().find(|n| n.name == name)
    }
}

impl NoteStore for InMemoryStore {
    fn list(&self) -> Result<Vec<String>> {
        Ok(self.notes.iter().map(|n| n.name.clone()).collect())
    }

    fn summaries(&self) -> Result<Vec<NoteSummary>> {
        // No clock here: most recently written sits last in the vec
        Ok(self
            .notes
            .iter()
            .rev()
            .map(|n| NoteSummary {
                name: n.name.clone(),
                modified: None,
            })
            .collect())
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.find(name).is_some())
    }

    fn create(&mut self, name: &str) -> Result<Note> {
        validate_note_name(name).map_err(|reason| NoteError::invalid_name(name, reason))?;
        if self.find(name).is_some() {
            return Err(NoteError::AlreadyExists(name.to_string()));
        }

        let note = Note::from_template(name);
        self.notes.push(note.clone());
        self.writes += 1;
        Ok(note)
    }

    fn load(&self, name: &str) -> Result<String> {
        self.find(name)
            .map(|n| n.content.clone())
            .ok_or_else(|| NoteError::NotFound(name.to_string()))
    }

    fn save(&mut self, name: &str, content: &str) -> Result<()> {
        let note = self
            .find_mut(name)
            .ok_or_else(|| NoteError::NotFound(name.to_string()))?;
        note.content = content.to_string();

        // Move to the back so summaries() reports it as most recent
        if let Some(pos) = self.notes.iter().position(|n| n.name == name) {
            let note = self.notes.remove(pos);
            self.notes.push(note);
        }
        self.writes += 1;
        Ok(())
    }

    fn note_path(&self, name: &str) -> Result<PathBuf> {
        validate_note_name(name).map_err(|reason| NoteError::invalid_name(name, reason))?;
        Ok(PathBuf::from(format!("memory://{}", name)))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn with_notes(mut self, count: usize) -> Self {
            for i in 0..count {
                let name = format!("Test Note {}", i + 1);
                self.store.create(&name).unwrap();
                self.store
                    .save(&name, &format!("# {}\n\nContent for note {}", name, i + 1))
                    .unwrap();
            }
            self
        }

        pub fn with_note(mut self, name: &str, content: &str) -> Self {
            self.store.create(name).unwrap();
            self.store.save(name, content).unwrap();
            self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::StoreFixture;
    use super::*;

    #[test]
    fn test_list_keeps_creation_order() {
        let fixture = StoreFixture::new().with_notes(3);
        assert_eq!(
            fixture.store.list().unwrap(),
            vec!["Test Note 1", "Test Note 2", "Test Note 3"]
        );
    }

    #[test]
    fn test_summaries_most_recent_first() {
        let mut store = StoreFixture::new().with_notes(3).store;
        store.save("Test Note 1", "touched").unwrap();

        let names: Vec<_> = store
            .summaries()
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Test Note 1", "Test Note 3", "Test Note 2"]);
    }

    #[test]
    fn test_create_collision() {
        let mut store = StoreFixture::new().with_note("x", "first").store;
        let writes = store.write_count();

        assert!(matches!(
            store.create("x"),
            Err(NoteError::AlreadyExists(_))
        ));
        assert_eq!(store.load("x").unwrap(), "first");
        assert_eq!(store.write_count(), writes);
    }

    #[test]
    fn test_save_unknown_note() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            store.save("nope", "text"),
            Err(NoteError::NotFound(_))
        ));
        assert_eq!(store.write_count(), 0);
    }

    #[test]
    fn test_invalid_name_rejected() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            store.create("a/b"),
            Err(NoteError::InvalidName { .. })
        ));
        assert!(store.list().unwrap().is_empty());
    }
}
