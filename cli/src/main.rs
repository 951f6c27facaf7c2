use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use stage::export;
use stage::store::ProjectRecord;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("project file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid project JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "stagegrid", about = "Stage formation inspection and export CLI")]
struct Cli {
    /// Path to a project record JSON file.
    #[arg(long, env = "STAGEGRID_PROJECT")]
    project: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the project's character roster.
    Show,
    /// Export the formation as a scene document.
    Export {
        /// Output path; stdout when omitted.
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let record = load_project(&cli.project)?;

    match cli.command {
        Command::Show => run_show(&record),
        Command::Export { output } => run_export(&record, output.as_deref()),
    }
}

fn load_project(path: &std::path::Path) -> Result<ProjectRecord, CliError> {
    let raw = fs::read_to_string(path)?;
    let record: ProjectRecord = serde_json::from_str(&raw)?;
    tracing::info!(
        project = %record.id,
        characters = record.characters.len(),
        "project loaded"
    );
    Ok(record)
}

fn run_show(record: &ProjectRecord) -> Result<(), CliError> {
    println!("{} ({})", record.name, record.id);
    if record.characters.is_empty() {
        println!("  no characters placed");
        return Ok(());
    }
    for character in &record.characters {
        println!(
            "  [{}] {} {} at ({}, {}) heading {}\u{b0}",
            character.id, character.name, character.color, character.x, character.y, character.angle
        );
    }
    Ok(())
}

fn run_export(record: &ProjectRecord, output: Option<&std::path::Path>) -> Result<(), CliError> {
    let timestamp = chrono::Utc::now().to_rfc3339();
    let json = export::scene_json(&record.characters, &timestamp)?;
    match output {
        Some(path) => {
            fs::write(path, &json)?;
            tracing::info!(path = %path.display(), "scene exported");
        }
        None => {
            io::stdout().write_all(json.as_bytes())?;
            println!();
        }
    }
    Ok(())
}
