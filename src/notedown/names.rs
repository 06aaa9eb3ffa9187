//! Note name validation.
//!
//! A note's name is also its filename stem, so it has to survive the trip to
//! disk on every common filesystem and must never point outside the notes
//! directory.
//!
//! Valid names:
//! - Are non-empty and carry no leading or trailing whitespace
//! - Do not start or end with a dot
//! - Contain no path separators, control characters, or `< > : " | ? *`
//! - Are not a reserved device name (`CON`, `NUL`, `COM1`, ...)
//! - Are at most [`MAX_NAME_BYTES`] bytes long
//!
//! Those rules gate new names. Files already in the notes directory were
//! possibly written by other tools, so lookups use the looser
//! [`validate_existing_name`], which only keeps names inside the directory.

/// Upper bound on the UTF-8 length of a note name.
pub const MAX_NAME_BYTES: usize = 200;

const FORBIDDEN_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

const RESERVED_NAMES: &[&str] = &["CON", "PRN", "AUX", "NUL"];

/// Validates a note name according to the rules above.
///
/// # Examples
/// ```
/// use notedown::names::validate_note_name;
///
/// assert!(validate_note_name("todo").is_ok());
/// assert!(validate_note_name("Meeting notes 2024-05-01").is_ok());
/// assert!(validate_note_name("заметка").is_ok());
///
/// assert!(validate_note_name("").is_err());
/// assert!(validate_note_name("../escape").is_err());
/// assert!(validate_note_name(".hidden").is_err());
/// assert!(validate_note_name("con").is_err());
/// ```
pub fn validate_note_name(name: &str) -> Result<(), NameError> {
    if name.trim().is_empty() {
        return Err(NameError::Empty);
    }

    if name.len() > MAX_NAME_BYTES {
        return Err(NameError::TooLong(name.len()));
    }

    if name.trim() != name {
        return Err(NameError::SurroundingWhitespace);
    }

    if name.starts_with('.') {
        return Err(NameError::LeadingDot);
    }

    if name.ends_with('.') {
        return Err(NameError::TrailingDot);
    }

    for ch in name.chars() {
        if ch == '/' || ch == '\\' {
            return Err(NameError::PathSeparator(ch));
        }
        if ch.is_control() {
            return Err(NameError::ControlCharacter);
        }
        if FORBIDDEN_CHARS.contains(&ch) {
            return Err(NameError::InvalidCharacter(ch));
        }
    }

    if is_reserved(name) {
        return Err(NameError::Reserved(name.to_string()));
    }

    Ok(())
}

/// Checks a name that refers to a note already on disk.
///
/// Only rejects what could address a file outside the notes directory or a
/// hidden file: empty names, a leading dot (`.`, `..`), path separators
/// and NUL.
///
/// # Examples
/// ```
/// use notedown::names::validate_existing_name;
///
/// assert!(validate_existing_name("Q&A: plan").is_ok());
/// assert!(validate_existing_name("draft ").is_ok());
/// assert!(validate_existing_name("con").is_ok());
///
/// assert!(validate_existing_name("..").is_err());
/// assert!(validate_existing_name("a/b").is_err());
/// ```
pub fn validate_existing_name(name: &str) -> Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }

    if name.starts_with('.') {
        return Err(NameError::LeadingDot);
    }

    for ch in name.chars() {
        if ch == '/' || ch == '\\' {
            return Err(NameError::PathSeparator(ch));
        }
        if ch == '\0' {
            return Err(NameError::ControlCharacter);
        }
    }

    Ok(())
}

/// Device names are reserved with or without an extension (`nul.txt` too).
fn is_reserved(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name).trim_end();
    let upper = stem.to_ascii_uppercase();

    if RESERVED_NAMES.contains(&upper.as_str()) {
        return true;
    }

    for prefix in ["COM", "LPT"] {
        if let Some(digit) = upper.strip_prefix(prefix) {
            if digit.len() == 1 && matches!(digit.as_bytes()[0], b'1'..=b'9') {
                return true;
            }
        }
    }

    false
}

/// Error type for note name validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// Name is empty or whitespace only
    Empty,
    /// Name exceeds the byte limit
    TooLong(usize),
    /// Name starts or ends with whitespace
    SurroundingWhitespace,
    /// Name starts with a dot (hidden file)
    LeadingDot,
    /// Name ends with a dot
    TrailingDot,
    /// Name contains `/` or `\`
    PathSeparator(char),
    /// Name contains a control character
    ControlCharacter,
    /// Name contains a character some filesystems reject
    InvalidCharacter(char),
    /// Name is a reserved device name
    Reserved(String),
}

impl std::fmt::Display for NameError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NameError::Empty => write!(f, "name cannot be empty"),
            NameError::TooLong(len) => write!(
                f,
                "name is {} bytes long (at most {} allowed)",
                len, MAX_NAME_BYTES
            ),
            NameError::SurroundingWhitespace => {
                write!(f, "name cannot start or end with whitespace")
            }
            NameError::LeadingDot => write!(f, "name cannot start with a dot"),
            NameError::TrailingDot => write!(f, "name cannot end with a dot"),
            NameError::PathSeparator(ch) => {
                write!(f, "name cannot contain the path separator '{}'", ch)
            }
            NameError::ControlCharacter => write!(f, "name cannot contain control characters"),
            NameError::InvalidCharacter(ch) => {
                write!(f, "name contains invalid character '{}'", ch)
            }
            NameError::Reserved(name) => write!(f, "\"{}\" is a reserved name", name),
        }
    }
}

impl std::error::Error for NameError {}
