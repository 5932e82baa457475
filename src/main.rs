use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use harrow::commands::{classify, document, field, init, stage};
use harrow::models::document::DocumentType;
use harrow::models::field::FieldType;
use harrow::models::project::Direction;
use harrow::validation::{clap_id_validator, clap_name_validator};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "harrow")]
#[command(about = "Project stage and document lifecycle CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Data directory for catalog and document snapshots
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the default stage configuration
    Init {
        /// Overwrite an existing catalog snapshot
        #[arg(long)]
        force: bool,
    },

    /// Manage a project type's stage pipeline
    Stage {
        #[command(subcommand)]
        command: StageCommands,
    },

    /// Manage a stage's data-entry form schema
    Field {
        #[command(subcommand)]
        command: FieldCommands,
    },

    /// Classify a document type against a project
    Classify {
        /// Document type name (e.g. "Geotag Photos")
        document_type: String,

        /// Project type name (e.g. Machinery)
        project_type: String,

        /// The project's current status label
        project_status: String,
    },

    /// Manage documents and their version history
    Doc {
        #[command(subcommand)]
        command: DocCommands,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum StageCommands {
    /// List configured pipelines
    List {
        /// Only show this project type
        #[arg(short, long, value_parser = clap_name_validator)]
        project_type: Option<String>,
    },

    /// Append a stage to a project type's pipeline
    Add {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_name_validator)]
        name: String,
    },

    /// Rename a stage
    Rename {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,

        #[arg(value_parser = clap_name_validator)]
        name: String,
    },

    /// Remove a stage and its form fields
    Remove {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,
    },

    /// Move a stage one step up or down
    Move {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,

        /// Direction: up or down
        direction: String,
    },

    /// Move a stage to an exact position (1-based, clamped)
    Reorder {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,

        position: u32,
    },
}

#[derive(Subcommand)]
enum FieldCommands {
    /// List a stage's form schema
    List {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,
    },

    /// Add a field of the given type with editor defaults
    Add {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,

        /// Field type: text, email, number, date, file, select, textarea,
        /// checkbox, radio
        field_type: String,
    },

    /// Remove a field
    Remove {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,

        #[arg(value_parser = clap_id_validator)]
        field_id: String,
    },

    /// Set a field's label
    SetLabel {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,

        #[arg(value_parser = clap_id_validator)]
        field_id: String,

        #[arg(value_parser = clap_name_validator)]
        label: String,
    },

    /// Mark a field required or optional
    Require {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,

        #[arg(value_parser = clap_id_validator)]
        field_id: String,

        /// Pass false to make the field optional again
        #[arg(default_value_t = true)]
        required: bool,
    },

    /// Append an option to a select/radio field
    OptionAdd {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,

        #[arg(value_parser = clap_id_validator)]
        field_id: String,

        option: String,
    },

    /// Remove an option from a select/radio field by index (0-based)
    OptionRemove {
        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_id_validator)]
        stage_id: String,

        #[arg(value_parser = clap_id_validator)]
        field_id: String,

        index: usize,
    },
}

#[derive(Subcommand)]
enum DocCommands {
    /// Register a new document (its first upload is version 1)
    Create {
        /// Document type name (e.g. "Letter of Intent")
        document_type: String,

        #[arg(value_parser = clap_id_validator)]
        project_id: String,

        #[arg(value_parser = clap_name_validator)]
        project_type: String,

        #[arg(value_parser = clap_name_validator)]
        project_status: String,

        #[arg(long, default_value = "admin")]
        uploaded_by: String,

        /// File size in bytes
        #[arg(long, default_value_t = 0)]
        size: u64,

        #[arg(long)]
        note: Option<String>,
    },

    /// Upload a new version of an existing document
    Upload {
        #[arg(value_parser = clap_id_validator)]
        document_id: String,

        #[arg(long, default_value = "admin")]
        uploaded_by: String,

        /// File size in bytes
        #[arg(long, default_value_t = 0)]
        size: u64,

        #[arg(long)]
        note: Option<String>,
    },

    /// Show a document's version history, newest first
    Versions {
        #[arg(value_parser = clap_id_validator)]
        document_id: String,
    },

    /// Summarize a project's documents per pipeline stage
    ByStage {
        #[arg(value_parser = clap_id_validator)]
        project_id: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let data_dir = cli.data_dir;

    match cli.command {
        Commands::Init { force } => init::execute(data_dir, force),

        Commands::Stage { command } => match command {
            StageCommands::List { project_type } => stage::list(data_dir, project_type),
            StageCommands::Add { project_type, name } => stage::add(data_dir, project_type, name),
            StageCommands::Rename {
                project_type,
                stage_id,
                name,
            } => stage::rename(data_dir, project_type, stage_id, name),
            StageCommands::Remove {
                project_type,
                stage_id,
            } => stage::remove(data_dir, project_type, stage_id),
            StageCommands::Move {
                project_type,
                stage_id,
                direction,
            } => {
                let direction: Direction = direction.parse()?;
                stage::move_stage(data_dir, project_type, stage_id, direction)
            }
            StageCommands::Reorder {
                project_type,
                stage_id,
                position,
            } => stage::reorder(data_dir, project_type, stage_id, position),
        },

        Commands::Field { command } => match command {
            FieldCommands::List {
                project_type,
                stage_id,
            } => field::list(data_dir, project_type, stage_id),
            FieldCommands::Add {
                project_type,
                stage_id,
                field_type,
            } => {
                let field_type: FieldType = field_type.parse()?;
                field::add(data_dir, project_type, stage_id, field_type)
            }
            FieldCommands::Remove {
                project_type,
                stage_id,
                field_id,
            } => field::remove(data_dir, project_type, stage_id, field_id),
            FieldCommands::SetLabel {
                project_type,
                stage_id,
                field_id,
                label,
            } => field::set_label(data_dir, project_type, stage_id, field_id, label),
            FieldCommands::Require {
                project_type,
                stage_id,
                field_id,
                required,
            } => field::require(data_dir, project_type, stage_id, field_id, required),
            FieldCommands::OptionAdd {
                project_type,
                stage_id,
                field_id,
                option,
            } => field::option_add(data_dir, project_type, stage_id, field_id, option),
            FieldCommands::OptionRemove {
                project_type,
                stage_id,
                field_id,
                index,
            } => field::option_remove(data_dir, project_type, stage_id, field_id, index),
        },

        Commands::Classify {
            document_type,
            project_type,
            project_status,
        } => classify::execute(document_type, project_type, project_status),

        Commands::Doc { command } => match command {
            DocCommands::Create {
                document_type,
                project_id,
                project_type,
                project_status,
                uploaded_by,
                size,
                note,
            } => {
                let document_type: DocumentType = document_type.parse()?;
                document::create(
                    data_dir,
                    document_type,
                    project_id,
                    project_type,
                    project_status,
                    uploaded_by,
                    size,
                    note,
                )
            }
            DocCommands::Upload {
                document_id,
                uploaded_by,
                size,
                note,
            } => document::upload(data_dir, document_id, uploaded_by, size, note),
            DocCommands::Versions { document_id } => document::versions(data_dir, document_id),
            DocCommands::ByStage { project_id } => document::by_stage(data_dir, project_id),
        },

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}
