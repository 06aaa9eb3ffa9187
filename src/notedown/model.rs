use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder line written under the heading of every new note.
pub const TEMPLATE_PLACEHOLDER: &str = "Start writing...";

/// A named unit of Markdown text stored as one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub name: String,
    pub content: String,
}

impl Note {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// A freshly created note: its name as a top-level heading, then the placeholder.
    pub fn from_template(name: &str) -> Self {
        Self::new(name, template_body(name))
    }
}

/// Initial content for a note created under `name`.
pub fn template_body(name: &str) -> String {
    format!("# {}\n\n{}", name, TEMPLATE_PLACEHOLDER)
}

/// Listing entry: a note name plus its last modification time, when the
/// backing medium reports one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSummary {
    pub name: String,
    pub modified: Option<DateTime<Utc>>,
}

/// Orders summaries newest first; entries without a timestamp go last, ties by name.
pub fn sort_recent_first(summaries: &mut [NoteSummary]) {
    summaries.sort_by(|a, b| match (a.modified, b.modified) {
        (Some(x), Some(y)) => y.cmp(&x).then_with(|| a.name.cmp(&b.name)),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.name.cmp(&b.name),
    });
}

/// Whitespace-separated word count, as shown in an editor status bar.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
