//! Terminal output: message coloring and the note listing.

use chrono::{DateTime, Utc};
use colored::*;
use notedown::api::{CmdMessage, MessageLevel};
use notedown::model::NoteSummary;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const TIME_WIDTH: usize = 16;

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
            MessageLevel::Error => eprintln!("{}", message.content.red()),
        }
    }
}

pub fn print_names(names: &[String]) {
    if names.is_empty() {
        println!("No notes found.");
        return;
    }
    for name in names {
        println!("{}", name);
    }
}

pub fn print_recent(summaries: &[NoteSummary]) {
    if summaries.is_empty() {
        println!("No notes found.");
        return;
    }

    let now = Utc::now();
    for summary in summaries {
        let time_ago = summary
            .modified
            .map(|t| format_time_ago(t, now))
            .unwrap_or_default();
        println!("{}", format_row(&summary.name, &time_ago));
    }
}

/// One listing row: name on the left, relative time right-aligned.
/// Widths are computed before coloring so escape codes don't skew them.
pub fn format_row(name: &str, time_ago: &str) -> String {
    let available = LINE_WIDTH.saturating_sub(TIME_WIDTH);
    let name_display = truncate_to_width(name, available);
    let padding = available.saturating_sub(name_display.width());
    let time = format!("{:>width$}", time_ago, width = TIME_WIDTH);
    format!("{}{}{}", name_display, " ".repeat(padding), time.dimmed())
}

pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

pub fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    formatter.convert(duration.to_std().unwrap_or_default())
}
