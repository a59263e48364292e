use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::info;

use sticky_notes::config::{default_config_path, load_config, Config};
use sticky_notes::logging;
use sticky_notes::notes::{JsonNoteStore, Note, NoteId, NoteLibrary};

const PREVIEW_CHARS: usize = 48;

#[derive(Debug, Parser)]
#[command(version, about = "Manage sticky notes from the command line")]
struct Cli {
    /// Config file (defaults to config.json in the data directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List notes, most recently edited first
    List,
    /// Create an empty note
    New {
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete a note by id
    Delete { id: String },
    /// Print one note as JSON
    Show { id: String },
    /// Print the config, notes and log locations
    Paths,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = load_config(&config_path);
    let data_dir = config.data_dir();
    let _guard = logging::init(&data_dir.join("logs"));

    let store = Arc::new(JsonNoteStore::in_dir(&data_dir));
    let notes_path = store.path().to_path_buf();
    let library = NoteLibrary::load(store);
    info!(notes = library.len(), path = %notes_path.display(), "Notes loaded");

    match cli.command {
        Command::List => {
            list(&config, &library);
            Ok(())
        }
        Command::New { title } => {
            let note = match title {
                Some(title) => library.insert(Note::with_title(title)),
                None => library.create_note(),
            }
            .context("Failed to save new note")?;
            println!("{}", note.id);
            Ok(())
        }
        Command::Delete { id } => {
            let id = parse_id(&id)?;
            let note = library
                .delete(id)
                .with_context(|| format!("Failed to delete note {}", id))?;
            let settings = config.window_settings();
            println!("Deleted {} ({})", note.id, settings.display_title(&note.title));
            Ok(())
        }
        Command::Show { id } => {
            let id = parse_id(&id)?;
            let Some(note) = library.get(id) else {
                bail!("No note with id {}", id);
            };
            let json = serde_json::to_string_pretty(&note).context("Failed to encode note")?;
            println!("{}", json);
            Ok(())
        }
        Command::Paths => {
            println!("config: {}", config_path.display());
            println!("notes:  {}", notes_path.display());
            println!("log:    {}", logging::log_path(&data_dir.join("logs")).display());
            Ok(())
        }
    }
}

fn list(config: &Config, library: &NoteLibrary) {
    let settings = config.window_settings();
    for note in library.snapshot() {
        println!(
            "{}  {:<24}  {}  {}",
            note.id,
            settings.display_title(&note.title),
            note.updated_at.format("%Y-%m-%d %H:%M"),
            note.preview(PREVIEW_CHARS)
        );
    }
}

fn parse_id(raw: &str) -> anyhow::Result<NoteId> {
    NoteId::parse(raw).with_context(|| format!("'{}' is not a note id", raw))
}
