//! # CLI Behavior
//!
//! This is **one possible client** for notedown, standing in for an editor
//! window. Each invocation is one short session: it opens the store, performs
//! one operation through the API facade, and prints the outcome.
//!
//! - `notedown` / `notedown list [--recent]`: the note list
//! - `notedown new <name>`: create from the template
//! - `notedown show <name>`: the rendered HTML document (what a preview pane shows)
//! - `notedown edit <name>`: select the note, then apply one buffer change from
//!   `--content` or stdin; render and save happen together
//! - `notedown render [FILE]`: render arbitrary Markdown without the store
//! - `notedown config [key] [value]`: theme and mode
//!
//! Data lives under `$NOTEDOWN_HOME` when set, otherwise the platform data dir.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and format output
//! - `render`: Terminal output (messages, listings)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
