mod cmd_access;
mod cmd_check;
mod cmd_paths;
mod cmd_type;
mod cmd_validate;
mod input;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dotpath")]
#[command(about = "Enumerate, resolve, and access dot-paths in JSON data")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List the valid paths into a schema
    Paths {
        /// Schema file (use - for stdin)
        #[arg(short, long)]
        schema: String,

        /// Levels to enumerate
        #[arg(long, default_value_t = dotpath::v1::DEFAULT_DEPTH)]
        depth: usize,

        /// Only list paths that can be assigned to
        #[arg(long)]
        writable: bool,

        /// Continue from a partial path instead of the root
        #[arg(long)]
        offset: Option<String>,

        /// Output as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Show the type of the value at a path
    Type {
        /// Schema file (use - for stdin)
        #[arg(short, long)]
        schema: String,

        /// Dot-path to resolve
        path: String,

        /// Resolve as a write target (no absence markers)
        #[arg(long)]
        set_mode: bool,

        /// Output the resolved shape as JSON
        #[arg(long)]
        json: bool,
    },
    /// Check paths against a schema
    Check {
        /// Schema file (use - for stdin)
        #[arg(short, long)]
        schema: String,

        /// Require the paths to be writable
        #[arg(long)]
        writable: bool,

        /// Paths to check
        #[arg(required = true)]
        paths: Vec<String>,
    },
    /// Read the value at a path (exits non-zero when nothing is there)
    Get {
        /// Data file (use - for stdin)
        #[arg(short, long)]
        input: String,

        /// Dot-path to read (empty for the whole document)
        path: String,

        /// Check the path against a schema first
        #[arg(long)]
        schema: Option<PathBuf>,
    },
    /// Write a JSON value at a path
    Set {
        /// Data file (use - for stdin)
        #[arg(short, long)]
        input: String,

        /// Dot-path to write
        path: String,

        /// JSON value to write
        value: String,

        /// Check the path against a schema first
        #[arg(long)]
        schema: Option<PathBuf>,

        /// Write the result back to the input file
        #[arg(long)]
        in_place: bool,
    },
    /// Validate a schema document
    Validate {
        /// Schema file
        #[arg(short, long)]
        schema: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Paths {
            schema,
            depth,
            writable,
            offset,
            json,
        } => cmd_paths::run(schema, depth, writable, offset, json, cli.pretty),
        Commands::Type {
            schema,
            path,
            set_mode,
            json,
        } => cmd_type::run(schema, path, set_mode, json, cli.pretty),
        Commands::Check {
            schema,
            writable,
            paths,
        } => cmd_check::run(schema, paths, writable),
        Commands::Get {
            input,
            path,
            schema,
        } => cmd_access::run_get(input, path, schema, cli.pretty),
        Commands::Set {
            input,
            path,
            value,
            schema,
            in_place,
        } => cmd_access::run_set(input, path, value, schema, in_place, cli.pretty),
        Commands::Validate { schema } => cmd_validate::run(schema),
    }
}
