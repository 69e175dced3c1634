use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod batch;
pub mod convert;
pub mod inspect;
pub mod list;

/// Output container for single-file conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Binary glTF with buffers embedded
    Glb,
    /// Indexed JSON only, buffer URIs left as-is
    Gltf,
}

impl OutputFormat {
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Glb => "glb",
            Self::Gltf => "gltf",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Convert one named scene file
    Convert {
        /// Source JSON file
        source: PathBuf,

        /// Output file (defaults to the source with the format's extension)
        destination: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Glb)]
        format: OutputFormat,

        /// Directory buffer URIs are relative to (defaults to the source's directory; GLB only)
        #[arg(long)]
        resource_dir: Option<PathBuf>,

        /// Emit -1 for unknown names instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Convert every source file in a directory
    Batch {
        /// Config file (defaults to ./glbpress.toml when present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Input directory
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Source file extension, without the dot
        #[arg(short, long)]
        extension: Option<String>,

        /// Search subdirectories
        #[arg(short, long)]
        recursive: bool,

        /// Emit -1 for unknown names instead of failing
        #[arg(long)]
        lenient: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },

    /// List packaged .glb files in a directory
    List {
        /// Directory to list
        dir: PathBuf,

        /// Print a JSON array
        #[arg(long)]
        json: bool,
    },

    /// Show header, chunks and document counts of a GLB file
    Inspect {
        /// GLB file
        file: PathBuf,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying command fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Convert {
                source,
                destination,
                format,
                resource_dir,
                lenient,
            } => convert::execute(
                source,
                destination.as_deref(),
                *format,
                resource_dir.as_deref(),
                *lenient,
            ),
            Commands::Batch {
                config,
                input,
                output,
                extension,
                recursive,
                lenient,
                quiet,
            } => batch::execute(&batch::BatchArgs {
                config: config.clone(),
                input: input.clone(),
                output: output.clone(),
                extension: extension.clone(),
                recursive: *recursive,
                lenient: *lenient,
                quiet: *quiet,
            }),
            Commands::List { dir, json } => list::execute(dir, *json),
            Commands::Inspect { file } => inspect::execute(file),
        }
    }
}
