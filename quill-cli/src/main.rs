//! Quill CLI - Command-line workbench for drafting book manuscripts

mod commands;
mod config;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{ChapterCommand, ProviderCommand, SectionCommand};
use config::Settings;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse a 1-based position argument (must be at least 1)
fn parse_position(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("positions start at 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "quill")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Project file to work on
    #[arg(short, long, global = true, default_value = config::DEFAULT_PROJECT_FILE)]
    project: PathBuf,

    /// Directory for saved projects and provider settings
    /// (defaults to $QUILL_DATA_DIR, then ./quill_data)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new project file with one empty chapter
    New {
        /// Project title
        title: String,

        /// Genre (roman, sachbuch, drehbuch, lyrik)
        #[arg(short, long, default_value = "roman")]
        genre: String,

        /// Overwrite an existing project file
        #[arg(long)]
        force: bool,
    },

    /// Display information about the project
    Info {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rename the project
    Title {
        /// New project title
        title: String,
    },

    /// Change the project's genre
    Genre {
        /// Genre (roman, sachbuch, drehbuch, lyrik)
        genre: String,
    },

    /// List the book formats available for a genre
    Formats {
        /// Genre to list (defaults to the project's genre)
        #[arg(short, long)]
        genre: Option<String>,
    },

    /// Select the book format used for page estimates
    Format {
        /// Format name from `quill formats`
        name: Option<String>,

        /// Clear the selected format
        #[arg(long, conflicts_with = "name")]
        clear: bool,
    },

    /// Estimate the printed pages of a chapter
    Preview {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,
    },

    /// Manage chapters
    #[command(subcommand)]
    Chapter(ChapterCommand),

    /// Manage the sections of a chapter
    #[command(subcommand)]
    Section(SectionCommand),

    /// List the writing styles offered for the project's genre
    Styles,

    /// Print the generation prompt for a chapter
    Prompt {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,

        /// Writing style (see `quill styles`)
        #[arg(short, long)]
        style: String,
    },

    /// Generate text for a chapter and stage it for review
    Generate {
        /// Chapter position (1-based)
        #[arg(value_parser = parse_position)]
        chapter: usize,

        /// Writing style (see `quill styles`)
        #[arg(short, long)]
        style: String,

        /// Simulated backend latency in milliseconds
        #[arg(long, default_value = "1500")]
        latency_ms: u64,
    },

    /// Show the staged text
    Staged {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Edit the staged text, summary or comment
    Stage {
        /// Replace the staged text
        #[arg(long)]
        output: Option<String>,

        /// Summary carried into the committed section
        #[arg(long)]
        summary: Option<String>,

        /// Comment carried into the committed section
        #[arg(long)]
        comment: Option<String>,
    },

    /// Append the staged text to its chapter as a new section
    Commit,

    /// Throw away the staged text
    Discard,

    /// Export the manuscript as a Markdown document
    Export {
        /// Output file (defaults to the project title as <slug>.md)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include chapter prompts and section notes
        #[arg(long)]
        include_prompts: bool,
    },

    /// Save the project to the data directory under its title
    Save,

    /// Load a saved project into the project file
    Load {
        /// Title of the saved project
        title: String,
    },

    /// List saved projects
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a saved project from the data directory
    Delete {
        /// Title of the saved project
        title: String,
    },

    /// Export the project as a JSON file
    ExportProject {
        /// Output file (defaults to <slug>.lmm.json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import a project from an exported JSON file
    ImportProject {
        /// Exported project file
        input: PathBuf,
    },

    /// Configure language-model providers
    #[command(subcommand)]
    Provider(ProviderCommand),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "quill_cli=debug,quill_core=debug"
    } else {
        "quill_cli=info,quill_core=warn"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let settings = Settings::resolve(cli.project, cli.data_dir);

    match cli.command {
        Commands::New {
            title,
            genre,
            force,
        } => commands::new_project(&settings, &title, &genre, force),

        Commands::Info { json } => commands::info(&settings, json),

        Commands::Title { title } => commands::set_title(&settings, title),

        Commands::Genre { genre } => commands::set_genre(&settings, &genre),

        Commands::Formats { genre } => commands::formats(&settings, genre.as_deref()),

        Commands::Format { name, clear } => commands::select_format(&settings, name.as_deref(), clear),

        Commands::Preview { chapter } => commands::preview(&settings, chapter),

        Commands::Chapter(command) => commands::chapter(&settings, command),

        Commands::Section(command) => commands::section(&settings, command),

        Commands::Styles => commands::styles(&settings),

        Commands::Prompt { chapter, style } => commands::prompt(&settings, chapter, &style),

        Commands::Generate {
            chapter,
            style,
            latency_ms,
        } => commands::generate(&settings, chapter, &style, latency_ms).await,

        Commands::Staged { json } => commands::staged(&settings, json),

        Commands::Stage {
            output,
            summary,
            comment,
        } => commands::stage(&settings, output, summary, comment),

        Commands::Commit => commands::commit(&settings),

        Commands::Discard => commands::discard(&settings),

        Commands::Export {
            output,
            include_prompts,
        } => commands::export(&settings, output, include_prompts),

        Commands::Save => commands::save(&settings).await,

        Commands::Load { title } => commands::load(&settings, &title).await,

        Commands::List { json } => commands::list(&settings, json).await,

        Commands::Delete { title } => commands::delete(&settings, &title).await,

        Commands::ExportProject { output } => commands::export_project(&settings, output),

        Commands::ImportProject { input } => commands::import_project(&settings, &input),

        Commands::Provider(command) => commands::provider(&settings, command).await,
    }
}
