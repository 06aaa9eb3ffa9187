use super::NoteStore;
use crate::error::{NoteError, Result};
use crate::model::{sort_recent_first, Note, NoteSummary};
use crate::names::{validate_existing_name, validate_note_name};
use chrono::{DateTime, Utc};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_FILE_EXT: &str = ".md";

pub struct FileStore {
    root: PathBuf,
    file_ext: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            file_ext: DEFAULT_FILE_EXT.to_string(),
        }
    }

    pub fn with_file_ext(mut self, ext: &str) -> Self {
        if ext.starts_with('.') {
            self.file_ext = ext.to_string();
        } else {
            self.file_ext = format!(".{}", ext);
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn file_ext(&self) -> &str {
        &self.file_ext
    }

    fn note_filename(&self, name: &str) -> String {
        format!("{}{}", name, self.file_ext)
    }

    /// Validates the name before it is ever joined onto the root.
    ///
    /// Lookups accept anything that stays inside the root, so every name
    /// `list` reports can be loaded. Only `create` applies the full rules.
    fn path_for(&self, name: &str) -> Result<PathBuf> {
        validate_existing_name(name).map_err(|reason| NoteError::invalid_name(name, reason))?;
        Ok(self.root.join(self.note_filename(name)))
    }

    fn ensure_dir(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).map_err(NoteError::Io)?;
        }
        Ok(())
    }

    /// Stem of a directory entry if it looks like a note file.
    fn note_name_of(&self, path: &Path) -> Option<String> {
        if !path.is_file() {
            return None;
        }
        let file_name = path.file_name()?.to_str()?;
        if file_name.starts_with('.') {
            return None;
        }
        let stem = file_name.strip_suffix(self.file_ext.as_str())?;
        validate_existing_name(stem).ok()?;
        Some(stem.to_string())
    }

    fn entries(&self) -> Result<Vec<PathBuf>> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(NoteError::Io)? {
            let entry = entry.map_err(NoteError::Io)?;
            paths.push(entry.path());
        }
        Ok(paths)
    }

    /// Write to a hidden sibling then rename, so a crash never leaves half a note.
    ///
    /// The rename lands on the symlink's target, not the link, and the new
    /// file carries the old one's permissions.
    fn write_atomic(&self, target: &Path, content: &str) -> Result<()> {
        let target = fs::canonicalize(target).map_err(NoteError::Io)?;
        let permissions = fs::metadata(&target).map_err(NoteError::Io)?.permissions();
        let dir = target.parent().unwrap_or(self.root.as_path());
        let tmp_path = dir.join(format!(".note-{}.tmp", Uuid::new_v4()));

        let written = write_new_file(&tmp_path, content, permissions)
            .and_then(|()| fs::rename(&tmp_path, &target));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp_path);
            return Err(NoteError::Io(err));
        }
        Ok(())
    }
}

fn write_new_file(path: &Path, content: &str, permissions: fs::Permissions) -> std::io::Result<()> {
    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)?;
    // Narrow the mode before any content is written
    file.set_permissions(permissions)?;
    file.write_all(content.as_bytes())?;
    file.sync_all()
}

impl NoteStore for FileStore {
    fn list(&self) -> Result<Vec<String>> {
        Ok(self
            .entries()?
            .iter()
            .filter_map(|path| self.note_name_of(path))
            .collect())
    }

    fn summaries(&self) -> Result<Vec<NoteSummary>> {
        let mut summaries = Vec::new();
        for path in self.entries()? {
            if let Some(name) = self.note_name_of(&path) {
                let modified = fs::metadata(&path)
                    .and_then(|meta| meta.modified())
                    .ok()
                    .map(DateTime::<Utc>::from);
                summaries.push(NoteSummary { name, modified });
            }
        }
        sort_recent_first(&mut summaries);
        Ok(summaries)
    }

    fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.path_for(name)?.is_file())
    }

    fn create(&mut self, name: &str) -> Result<Note> {
        validate_note_name(name).map_err(|reason| NoteError::invalid_name(name, reason))?;
        let path = self.path_for(name)?;
        self.ensure_dir(&self.root)?;

        let note = Note::from_template(name);

        // create_new keeps the existence check and the write in one step
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::AlreadyExists => {
                return Err(NoteError::AlreadyExists(name.to_string()));
            }
            Err(err) => return Err(NoteError::Io(err)),
        };
        file.write_all(note.content.as_bytes())
            .map_err(NoteError::Io)?;

        tracing::info!(note = name, path = %path.display(), "created note");
        Ok(note)
    }

    fn load(&self, name: &str) -> Result<String> {
        let path = self.path_for(name)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                Err(NoteError::NotFound(name.to_string()))
            }
            Err(err) => Err(NoteError::Io(err)),
        }
    }

    fn save(&mut self, name: &str, content: &str) -> Result<()> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(NoteError::NotFound(name.to_string()));
        }

        self.write_atomic(&path, content)?;
        tracing::debug!(note = name, bytes = content.len(), "saved note");
        Ok(())
    }

    fn note_path(&self, name: &str) -> Result<PathBuf> {
        self.path_for(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::NameError;
    use tempfile::TempDir;

    fn setup() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("notes"));
        (dir, store)
    }

    #[test]
    fn test_list_on_missing_dir_is_empty() {
        let (_dir, store) = setup();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_create_writes_template() {
        let (_dir, mut store) = setup();
        let note = store.create("todo").unwrap();

        assert_eq!(note.content, "# todo\n\nStart writing...");
        let on_disk = fs::read_to_string(store.root().join("todo.md")).unwrap();
        assert_eq!(on_disk, note.content);
        assert_eq!(store.list().unwrap(), vec!["todo".to_string()]);
    }

    #[test]
    fn test_create_collision_keeps_content() {
        let (_dir, mut store) = setup();
        store.create("x").unwrap();
        store.save("x", "edited").unwrap();

        let err = store.create("x").unwrap_err();
        assert!(matches!(err, NoteError::AlreadyExists(ref n) if n == "x"));
        assert_eq!(store.load("x").unwrap(), "edited");
    }

    #[test]
    fn test_create_invalid_name_touches_nothing() {
        let (_dir, mut store) = setup();
        let err = store.create("../outside").unwrap_err();
        assert!(matches!(
            err,
            NoteError::InvalidName {
                reason: NameError::LeadingDot,
                ..
            }
        ));
        assert!(!store.root().exists());
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let (_dir, store) = setup();
        assert!(matches!(
            store.load("ghost"),
            Err(NoteError::NotFound(ref n)) if n == "ghost"
        ));
    }

    #[test]
    fn test_save_missing_is_not_found() {
        let (_dir, mut store) = setup();
        assert!(matches!(
            store.save("ghost", "boo"),
            Err(NoteError::NotFound(_))
        ));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_save_round_trip_is_exact() {
        let (_dir, mut store) = setup();
        store.create("raw").unwrap();

        let text = "# Title\r\n\n  trailing spaces  \n\n```\nunterminated";
        store.save("raw", text).unwrap();
        assert_eq!(store.load("raw").unwrap(), text);
    }

    #[test]
    fn test_save_is_idempotent_and_leaves_no_tmp_files() {
        let (_dir, mut store) = setup();
        store.create("n").unwrap();
        store.save("n", "same").unwrap();
        let first = fs::read(store.root().join("n.md")).unwrap();
        store.save("n", "same").unwrap();
        let second = fs::read(store.root().join("n.md")).unwrap();
        assert_eq!(first, second);

        for entry in fs::read_dir(store.root()).unwrap() {
            let name = entry.unwrap().file_name().to_string_lossy().to_string();
            assert!(!name.ends_with(".tmp"), "leftover tmp file: {}", name);
        }
    }

    #[test]
    fn test_list_ignores_foreign_entries() {
        let (_dir, mut store) = setup();
        store.create("keep").unwrap();
        fs::write(store.root().join("image.png"), b"png").unwrap();
        fs::write(store.root().join(".hidden.md"), "x").unwrap();
        fs::create_dir(store.root().join("folder.md")).unwrap();

        assert_eq!(store.list().unwrap(), vec!["keep".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn test_every_listed_name_loads() {
        let (_dir, mut store) = setup();
        store.create("todo").unwrap();
        for file in ["Q&A: plan.md", "draft .md", "v1..md", "con.md"] {
            fs::write(store.root().join(file), file).unwrap();
        }

        let mut names = store.list().unwrap();
        names.sort();
        assert_eq!(names, vec!["Q&A: plan", "con", "draft ", "todo", "v1."]);
        for name in &names {
            assert!(store.load(name).is_ok(), "cannot load {:?}", name);
            store.save(name, "edited").unwrap();
            assert_eq!(store.load(name).unwrap(), "edited");
        }
        assert_eq!(store.summaries().unwrap().len(), names.len());

        // New notes still follow the strict rules
        assert!(matches!(
            store.create("Q&A: other"),
            Err(NoteError::InvalidName { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_save_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, mut store) = setup();
        store.create("diary").unwrap();
        let path = store.root().join("diary.md");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        store.save("diary", "secret").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        assert_eq!(store.load("diary").unwrap(), "secret");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_through_symlink_keeps_link() {
        let (dir, mut store) = setup();
        fs::create_dir_all(store.root()).unwrap();
        let real = dir.path().join("synced.md");
        fs::write(&real, "old").unwrap();
        let link = store.root().join("synced.md");
        std::os::unix::fs::symlink(&real, &link).unwrap();

        assert_eq!(store.list().unwrap(), vec!["synced".to_string()]);
        store.save("synced", "new").unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert_eq!(fs::read_to_string(&real).unwrap(), "new");
        assert_eq!(store.load("synced").unwrap(), "new");
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .filter(|n| n.ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        let mut store = FileStore::new(dir.path().to_path_buf()).with_file_ext("txt");
        assert_eq!(store.file_ext(), ".txt");

        store.create("plain").unwrap();
        assert!(dir.path().join("plain.txt").exists());
        assert_eq!(store.list().unwrap(), vec!["plain".to_string()]);
    }

    #[test]
    fn test_summaries_have_mtimes() {
        let (_dir, mut store) = setup();
        store.create("a").unwrap();
        store.create("b").unwrap();

        let summaries = store.summaries().unwrap();
        assert_eq!(summaries.len(), 2);
        assert!(summaries.iter().all(|s| s.modified.is_some()));
    }

    #[test]
    fn test_note_path() {
        let (_dir, store) = setup();
        assert_eq!(
            store.note_path("todo").unwrap(),
            store.root().join("todo.md")
        );
        assert!(store.note_path("a/b").is_err());
    }
}
