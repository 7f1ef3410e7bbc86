mod init;
pub use init::cmd_init;

use std::path::{Path, PathBuf};

use chrono::Local;

use crate::cli::commands::*;
use crate::cli::output::*;
use crate::io::config_io;
use crate::io::document_io::{
    self, load_document, load_document_strict, load_json_document, save_document,
};
use crate::model::node::OutlineNode;
use crate::model::path::NodePath;
use crate::ops::{agenda, node_ops, progress};
use crate::parse::{KeywordSet, serialize};

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub fn dispatch(cli: Cli) -> CmdResult {
    let cwd = std::env::current_dir()?;
    let ctx = Context {
        json: cli.json,
        config: cli.config,
        cwd,
    };

    match cli.command {
        Commands::Init(args) => cmd_init(args, &ctx.cwd),
        Commands::Parse(args) => cmd_parse(&ctx, &args.file),
        Commands::Fmt(args) => cmd_fmt(&ctx, &args.file, args.write),
        Commands::FromJson(args) => cmd_from_json(&args.file),
        Commands::Toggle(args) => cmd_toggle(&ctx, args),
        Commands::Progress(args) => cmd_progress(&ctx, &args.file, args.recursive),
        Commands::Agenda(args) => cmd_agenda(&ctx, &args.file),
    }
}

/// Settings shared by every command
struct Context {
    json: bool,
    config: Option<PathBuf>,
    cwd: PathBuf,
}

impl Context {
    fn keywords(&self) -> Result<KeywordSet, config_io::ConfigError> {
        config_io::load_keywords(self.config.as_deref(), &self.cwd)
    }

    fn load(&self, file: &Path) -> Result<OutlineNode, Box<dyn std::error::Error>> {
        let keywords = self.keywords()?;
        Ok(load_document(file, &keywords)?)
    }

    /// Load a document that will be saved back to `file`.
    fn load_for_write(&self, file: &Path) -> Result<OutlineNode, Box<dyn std::error::Error>> {
        let keywords = self.keywords()?;
        Ok(load_document_strict(file, &keywords)?)
    }
}

/// Print a serialized document, ending with a newline unless it is empty.
fn print_document(root: &OutlineNode) {
    let text = serialize(root);
    if !text.is_empty() {
        println!("{}", text);
    }
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

fn cmd_parse(ctx: &Context, file: &Path) -> CmdResult {
    let root = ctx.load(file)?;
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&root)?);
    } else {
        for line in format_tree(&root) {
            println!("{}", line);
        }
    }
    Ok(())
}

fn cmd_from_json(file: &Path) -> CmdResult {
    let root = load_json_document(file)?;
    print_document(&root);
    Ok(())
}

fn cmd_progress(ctx: &Context, file: &Path, recursive: bool) -> CmdResult {
    let keywords = ctx.keywords()?;
    let root = load_document(file, &keywords)?;
    let report = progress::progress_report(&root, &keywords, recursive);

    let entries = report
        .iter()
        .filter_map(|(path, p)| root.get(path).map(|node| (path, node, *p)));

    if ctx.json {
        let out: Vec<ProgressJson> = entries
            .map(|(path, node, p)| progress_to_json(path, node, p))
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        for (path, node, p) in entries {
            println!("{}", format_progress_line(path, node, p));
        }
    }
    Ok(())
}

fn cmd_agenda(ctx: &Context, file: &Path) -> CmdResult {
    let root = ctx.load(file)?;
    let items = agenda::agenda(&root, Local::now().naive_local());
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else if items.is_empty() {
        println!("No scheduled or deadline items.");
    } else {
        for item in &items {
            println!("{}", format_agenda_line(item));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

fn cmd_fmt(ctx: &Context, file: &Path, write: bool) -> CmdResult {
    if write {
        let root = ctx.load_for_write(file)?;
        save_document(file, &root)?;
    } else {
        print_document(&ctx.load(file)?);
    }
    Ok(())
}

fn cmd_toggle(ctx: &Context, args: ToggleArgs) -> CmdResult {
    if document_io::is_stdin(&args.file) && args.write {
        return Err(document_io::DocumentError::WriteToStdin.into());
    }
    let keywords = ctx.keywords()?;
    let path: NodePath = args.path.parse()?;
    let mut root = if args.write {
        load_document_strict(&args.file, &keywords)?
    } else {
        load_document(&args.file, &keywords)?
    };
    let kind = node_ops::toggle_state(&mut root, &path, &keywords)?;

    if args.write {
        save_document(&args.file, &root)?;
        if ctx.json {
            let out = ToggleJson {
                path,
                kind: kind.to_string(),
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
        } else {
            println!("{} -> {}", path, kind);
        }
    } else {
        print_document(&root);
    }
    Ok(())
}
