use super::render::{print_messages, print_names, print_recent};
use super::setup::{Cli, Commands};
use clap::Parser;
use notedown::api::{CmdResult, NotesApi};
use notedown::config::{DataPaths, Settings};
use notedown::error::{NoteError, Result};
use notedown::logging;
use notedown::render::render;
use notedown::store::fs::FileStore;
use notedown::store::NoteStore;
use std::io::{IsTerminal, Read};
use std::path::Path;

struct AppContext {
    api: NotesApi<FileStore>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let paths = DataPaths::discover()?;
    tracing::debug!(root = %paths.root.display(), "data root");
    let mut ctx = AppContext {
        api: NotesApi::open(&paths)?,
    };

    match cli.command {
        Some(Commands::List { recent }) => handle_list(&ctx, recent),
        Some(Commands::New { name }) => handle_new(&mut ctx, &name.join(" ")),
        Some(Commands::Show { name }) => handle_show(&mut ctx, &name),
        Some(Commands::Cat { name }) => handle_cat(&ctx, &name),
        Some(Commands::Edit {
            name,
            content,
            print,
        }) => handle_edit(&mut ctx, &name, content, print),
        Some(Commands::Render { file, fragment }) => handle_render(&ctx, file.as_deref(), fragment),
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value),
        None => handle_list(&ctx, false),
    }
}

/// Prints the result's messages, or hands its failure back to `main`.
fn finish(result: CmdResult) -> Result<()> {
    match result.failure {
        Some(err) => Err(err),
        None => {
            print_messages(&result.messages);
            Ok(())
        }
    }
}

fn handle_list(ctx: &AppContext, recent: bool) -> Result<()> {
    if recent {
        print_recent(&ctx.api.list_recent()?);
    } else {
        print_names(&ctx.api.list_notes()?);
    }
    Ok(())
}

fn handle_new(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.request_new_note(name);
    finish(result)
}

fn handle_show(ctx: &mut AppContext, name: &str) -> Result<()> {
    let result = ctx.api.select_note(name);
    if let Some(document) = &result.document {
        print!("{}", document);
    }
    finish(result)
}

fn handle_cat(ctx: &AppContext, name: &str) -> Result<()> {
    let content = ctx.api.session().store().load(name)?;
    print!("{}", content);
    Ok(())
}

fn handle_edit(
    ctx: &mut AppContext,
    name: &str,
    content: Option<String>,
    print: bool,
) -> Result<()> {
    // Select first: an edit with no active note would be dropped
    finish(ctx.api.select_note(name))?;

    let content = match content {
        Some(text) => text,
        None => read_stdin()?,
    };

    let result = ctx.api.on_buffer_changed(&content);
    if print {
        if let Some(document) = &result.document {
            print!("{}", document);
        }
    } else if result.is_ok() {
        println!(
            "Saved {} ({} words)",
            name,
            ctx.api.session().word_count()
        );
    }
    finish(result)
}

fn handle_render(ctx: &AppContext, file: Option<&Path>, fragment: bool) -> Result<()> {
    let source = match file {
        Some(path) => std::fs::read_to_string(path).map_err(NoteError::Io)?,
        None => read_stdin()?,
    };

    let html = render(&source);
    if fragment {
        print!("{}", html);
    } else {
        print!("{}", ctx.api.session().wrapper().wrap(&html));
    }
    Ok(())
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<()> {
    match (key, value) {
        (None, _) => {
            let settings = ctx.api.settings();
            for key in Settings::KEYS {
                println!("{} = {}", key, settings.get(key)?);
            }
            println!("themes: {}", ctx.api.theme_names().join(", "));
            Ok(())
        }
        (Some(key), None) => {
            println!("{} = {}", key, ctx.api.settings().get(&key)?);
            Ok(())
        }
        (Some(key), Some(value)) => {
            let result = ctx.api.set_setting(&key, &value)?;
            finish(result)
        }
    }
}

fn read_stdin() -> Result<String> {
    let mut stdin = std::io::stdin();
    if stdin.is_terminal() {
        return Err(NoteError::Api(
            "No content given (use --content or pipe text on stdin)".to_string(),
        ));
    }
    let mut buffer = String::new();
    stdin.read_to_string(&mut buffer).map_err(NoteError::Io)?;
    Ok(buffer)
}
