use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "notedown", bin_name = "notedown", version)]
#[command(about = "Markdown notes with live HTML rendering and autosave", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List notes
    #[command(alias = "ls")]
    List {
        /// Newest first, with modification times
        #[arg(short, long)]
        recent: bool,
    },

    /// Create a new note from the template
    #[command(alias = "n")]
    New {
        /// Name of the note (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,
    },

    /// Print the rendered HTML document for a note
    #[command(alias = "s")]
    Show {
        /// Name of the note
        name: String,
    },

    /// Print a note's raw Markdown
    Cat {
        /// Name of the note
        name: String,
    },

    /// Replace a note's content (from --content or stdin) and save it
    #[command(alias = "e")]
    Edit {
        /// Name of the note
        name: String,

        /// New content; read from stdin when omitted
        #[arg(short, long)]
        content: Option<String>,

        /// Print the rendered document after saving
        #[arg(short, long)]
        print: bool,
    },

    /// Render Markdown from a file or stdin without touching the store
    Render {
        /// File to render; stdin when omitted
        file: Option<std::path::PathBuf>,

        /// Emit only the HTML fragment, without the styled document shell
        #[arg(long)]
        fragment: bool,
    },

    /// Get or set settings (theme, mode)
    Config {
        /// Setting name (theme or mode)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_command_parses() {
        let cli = Cli::try_parse_from(["notedown"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_new_joins_words() {
        let cli = Cli::try_parse_from(["notedown", "new", "Meeting", "notes"]).unwrap();
        match cli.command {
            Some(Commands::New { name }) => assert_eq!(name.join(" "), "Meeting notes"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_edit_with_content() {
        let cli =
            Cli::try_parse_from(["notedown", "-v", "e", "todo", "--content", "# hi", "-p"]).unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Edit {
                name,
                content,
                print,
            }) => {
                assert_eq!(name, "todo");
                assert_eq!(content.as_deref(), Some("# hi"));
                assert!(print);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_new_requires_name() {
        assert!(Cli::try_parse_from(["notedown", "new"]).is_err());
    }
}
