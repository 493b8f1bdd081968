mod diagnostics;
mod outline;
mod refs;
mod schema;
mod serve;
mod session;

use clap::{Parser, Subcommand};
use scriptscope_core::WorkerConfig;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "scriptscope",
    version,
    about = "Structural outlines and member-access analysis for TypeScript and JavaScript",
    long_about = "Scriptscope parses TypeScript, TSX, JavaScript and JSX sources and reports \
                  their structural outline, the members accessed on chosen root identifiers, \
                  and syntax errors. The `serve` command speaks the worker protocol over stdio."
)]
pub struct Cli {
    /// Worker configuration file (JSON)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Also log to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the outline of a source file
    Outline {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Emit JSON instead of indented text
        #[arg(long)]
        json: bool,
        /// With --json, nest entries under their parents
        #[arg(long, requires = "json")]
        tree: bool,
    },
    /// List the members accessed on tracked root identifiers
    Refs {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        /// Root identifier to track (repeatable)
        #[arg(short, long = "root", value_name = "NAME", required = true)]
        roots: Vec<String>,
        /// Declaration file whose constants resolve computed indices (repeatable)
        #[arg(long = "lib", value_name = "PATH")]
        libs: Vec<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Report syntax errors
    Diagnostics {
        #[arg(value_name = "FILE")]
        path: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Answer worker requests read as JSON lines from stdin
    #[command(
        long_about = "Reads one JSON-encoded worker request per line from stdin and writes exactly \
                      one JSON-encoded response per line to stdout. Logs never go to stdout."
    )]
    Serve,
    /// Print the JSON schema of the worker protocol and configuration
    Schema,
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let component = match &cli.command {
        Commands::Serve => "serve",
        _ => "cli",
    };
    let _guard = scriptscope_runtime::init_logging(component, cli.verbose);

    let config = load_config(cli.config.as_deref())?;
    let rt = tokio::runtime::Runtime::new()?;

    match cli.command {
        Commands::Outline { path, json, tree } => {
            rt.block_on(outline::run(&config, &path, json, tree))
        }
        Commands::Refs {
            path,
            roots,
            libs,
            json,
        } => rt.block_on(refs::run(&config, &path, &roots, &libs, json)),
        Commands::Diagnostics { path, json } => rt.block_on(diagnostics::run(&config, &path, json)),
        Commands::Serve => rt.block_on(serve::run(&config)),
        Commands::Schema => schema::run(),
    }
}

fn load_config(path: Option<&Path>) -> Result<WorkerConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(WorkerConfig::load(path)?),
        None => Ok(WorkerConfig::default()),
    }
}
